//! Admin endpoints: listing moderation, product upkeep, user bans.
use otbozor_core::admin::AdminListingQuery;
use otbozor_core::{Listing, Product, ProductUpdate, User};
use reqwest::Method;
use serde::Serialize;

use crate::client::{encode, with_query, ApiClient};
use crate::envelope::Paged;
use crate::error::ApiError;

#[derive(Serialize)]
struct ReasonBody<'a> {
    reason: &'a str,
}

impl ApiClient {
    pub async fn admin_listings(&self, query: &AdminListingQuery) -> Result<Paged<Listing>, ApiError> {
        let mut pairs: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
            ("regionId", query.region_id.clone().unwrap_or_default()),
            ("saleSource", query.sale_source.clone().unwrap_or_default()),
        ];
        pairs.extend(
            query
                .tab
                .query_pairs()
                .into_iter()
                .map(|(key, value)| (key, value.to_string())),
        );
        let url = with_query(self.endpoint(&["api", "admin", "listings"])?, &pairs);
        self.get_page(url).await
    }

    pub async fn approve_listing(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "listings", id, "approve"])?;
        self.send_unit(Method::POST, url, None).await
    }

    pub async fn reject_listing(&self, id: &str, reason: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "listings", id, "reject"])?;
        self.send_unit(Method::POST, url, Some(encode(&ReasonBody { reason })?))
            .await
    }

    pub async fn admin_delete_listing(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "listings", id])?;
        self.send_unit(Method::DELETE, url, None).await
    }

    pub async fn admin_products(&self, page: u32) -> Result<Paged<Product>, ApiError> {
        let url = with_query(
            self.endpoint(&["api", "admin", "products"])?,
            &[("page", page.to_string())],
        );
        self.get_page(url).await
    }

    /// Wholesale replacement; the backend validates the status change.
    pub async fn update_product(&self, id: &str, update: &ProductUpdate) -> Result<Product, ApiError> {
        let url = self.endpoint(&["api", "admin", "products", id])?;
        self.send_data(Method::PUT, url, Some(encode(update)?)).await
    }

    pub async fn admin_delete_product(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "products", id])?;
        self.send_unit(Method::DELETE, url, None).await
    }

    pub async fn admin_users(&self, page: u32, search: Option<&str>) -> Result<Paged<User>, ApiError> {
        let url = with_query(
            self.endpoint(&["api", "admin", "users"])?,
            &[
                ("page", page.to_string()),
                ("search", search.unwrap_or_default().to_string()),
            ],
        );
        self.get_page(url).await
    }

    pub async fn ban_user(&self, id: &str, reason: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "users", id, "ban"])?;
        self.send_unit(Method::POST, url, Some(encode(&ReasonBody { reason })?))
            .await
    }

    pub async fn unban_user(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "users", id, "unban"])?;
        self.send_unit(Method::POST, url, None).await
    }
}
