use otbozor_core::{Invoice, ReactivationQuote};
use reqwest::Method;
use serde::Serialize;

use crate::client::{encode, ApiClient};
use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceRequest<'a> {
    listing_id: &'a str,
}

impl ApiClient {
    pub async fn reactivation_quote(&self, listing_id: &str) -> Result<ReactivationQuote, ApiError> {
        self.get_data(self.endpoint(&["api", "payments", "reactivation-quote", listing_id])?)
            .await
    }

    /// No idempotency key is sent; callers keep the button disabled while this runs.
    pub async fn create_reactivation_invoice(&self, listing_id: &str) -> Result<Invoice, ApiError> {
        let url = self.endpoint(&["api", "payments", "create-reactivation-invoice"])?;
        let body = encode(&InvoiceRequest { listing_id })?;
        self.send_data(Method::POST, url, Some(body)).await
    }

    pub async fn create_listing_invoice(&self, listing_id: &str) -> Result<Invoice, ApiError> {
        let url = self.endpoint(&["api", "payments", "create-listing-invoice"])?;
        let body = encode(&InvoiceRequest { listing_id })?;
        self.send_data(Method::POST, url, Some(body)).await
    }
}
