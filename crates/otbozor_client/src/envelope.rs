//! The backend wraps every answer as `{ success, data?, message, pagination? }`.
use otbozor_core::Pagination;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{classify_status, ApiError, ErrorKind};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<ErrorData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorData {
    #[serde(default)]
    listing_id: Option<String>,
}

/// Turns a status + body into the envelope, or into an `ApiError` when the
/// status is not 2xx or the envelope says `success: false`.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<Envelope<T>, ApiError> {
    if !(200..300).contains(&status) {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let listing_id = parsed.data.and_then(|d| d.listing_id);
        let message = parsed.message.or(parsed.error).unwrap_or_default();
        return Err(ApiError::new(classify_status(status, listing_id), message).with_status(status));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Envelope {
            success: Some(true),
            data: None,
            message: None,
            pagination: None,
        });
    }

    let envelope: Envelope<T> = serde_json::from_slice(body).map_err(|err| {
        ApiError::new(ErrorKind::Unknown, format!("unexpected response: {err}")).with_status(status)
    })?;
    if envelope.success == Some(false) {
        return Err(
            ApiError::new(ErrorKind::Validation, envelope.message.unwrap_or_default())
                .with_status(status),
        );
    }
    Ok(envelope)
}

pub(crate) fn require_data<T>(envelope: Envelope<T>) -> Result<T, ApiError> {
    envelope
        .data
        .ok_or_else(|| ApiError::new(ErrorKind::Unknown, "response carried no data"))
}

pub(crate) fn into_page<T>(envelope: Envelope<Vec<T>>) -> Paged<T> {
    let items = envelope.data.unwrap_or_default();
    let pagination = envelope.pagination.unwrap_or(Pagination {
        page: 1,
        limit: items.len() as u32,
        total: items.len() as u64,
        total_pages: u32::from(!items.is_empty()),
    });
    Paged { items, pagination }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otbozor_core::FALLBACK_ERROR;

    #[test]
    fn success_false_is_validation_error() {
        let body = br#"{"success":false,"message":"Narx majburiy"}"#;
        let err = decode_envelope::<serde_json::Value>(200, body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Narx majburiy");
    }

    #[test]
    fn payment_required_reads_listing_id() {
        let body = br#"{"success":false,"message":"To'lov kerak","data":{"listingId":"l-5"}}"#;
        let err = decode_envelope::<serde_json::Value>(402, body).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::PaymentRequired {
                listing_id: Some("l-5".into())
            }
        );
        assert_eq!(err.status, Some(402));
    }

    #[test]
    fn html_error_page_falls_back_to_localized_message() {
        let err = decode_envelope::<serde_json::Value>(502, b"<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(err.message, FALLBACK_ERROR);
    }

    #[test]
    fn garbage_on_success_is_unknown() {
        let err = decode_envelope::<serde_json::Value>(200, b"not json").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[test]
    fn missing_pagination_is_derived_from_items() {
        let envelope: Envelope<Vec<u8>> =
            decode_envelope(200, br#"{"success":true,"data":[1,2,3]}"#).unwrap();
        let page = into_page(envelope);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 1);
    }
}
