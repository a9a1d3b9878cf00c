use std::fmt;

use otbozor_core::{ListingId, FALLBACK_ERROR};

/// Closed set of failure classes the screens branch on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, timeout or a 5xx answer.
    Network,
    /// The backend refused the request as invalid.
    Validation,
    /// Payment is needed first; carries the listing to pay for when known.
    PaymentRequired { listing_id: Option<ListingId> },
    Unauthorized,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Validation => write!(f, "validation error"),
            ErrorKind::PaymentRequired {
                listing_id: Some(id),
            } => write!(f, "payment required for listing {id}"),
            ErrorKind::PaymentRequired { listing_id: None } => write!(f, "payment required"),
            ErrorKind::Unauthorized => write!(f, "unauthorized"),
            ErrorKind::Unknown => write!(f, "unknown error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    /// Human-readable text, already localized by the backend or the fallback.
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind,
            message: if message.trim().is_empty() {
                FALLBACK_ERROR.to_string()
            } else {
                message
            },
            status: None,
        }
    }

    /// No answer arrived in time on the caller's side.
    pub fn timed_out() -> Self {
        Self::new(ErrorKind::Network, "Javob kutish vaqti tugadi")
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Fills in the listing id of a payment-required error that came without one.
    pub(crate) fn for_listing(mut self, id: &str) -> Self {
        if let ErrorKind::PaymentRequired { listing_id: None } = self.kind {
            self.kind = ErrorKind::PaymentRequired {
                listing_id: Some(id.to_string()),
            };
        }
        self
    }

    pub fn payment_required_for(&self) -> Option<&ListingId> {
        match &self.kind {
            ErrorKind::PaymentRequired { listing_id } => listing_id.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }
}

/// Error class for a non-2xx status.
pub(crate) fn classify_status(status: u16, listing_id: Option<ListingId>) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::Unauthorized,
        402 => ErrorKind::PaymentRequired { listing_id },
        400 | 404 | 409 | 422 => ErrorKind::Validation,
        500..=599 => ErrorKind::Network,
        _ => ErrorKind::Unknown,
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ErrorKind::Network, format!("request timed out: {err}"));
    }
    if err.is_builder() {
        return ApiError::new(ErrorKind::Unknown, err.to_string());
    }
    ApiError::new(ErrorKind::Network, err.to_string())
}
