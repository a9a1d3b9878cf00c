//! Public listing search, the owner's own listings, media and favorites.
use otbozor_core::{Listing, ListingDraft, LocalMedia, MediaItem, Product};
use reqwest::Method;
use serde::Serialize;

use crate::client::{encode, with_query, ApiClient};
use crate::envelope::Paged;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSearch {
    pub page: u32,
    pub limit: u32,
    pub text: Option<String>,
    pub region_id: Option<String>,
    pub breed_id: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

impl Default for ListingSearch {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 24,
            text: None,
            region_id: None,
            breed_id: None,
            min_price: None,
            max_price: None,
        }
    }
}

impl ListingSearch {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("search", self.text.clone().unwrap_or_default()),
            ("regionId", self.region_id.clone().unwrap_or_default()),
            ("breedId", self.breed_id.clone().unwrap_or_default()),
            ("minPrice", self.min_price.map(|p| p.to_string()).unwrap_or_default()),
            ("maxPrice", self.max_price.map(|p| p.to_string()).unwrap_or_default()),
        ]
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AttachRequest<'a> {
    listing_id: &'a str,
    media: &'a [LocalMedia],
}

impl ApiClient {
    pub async fn listings(&self, search: &ListingSearch) -> Result<Paged<Listing>, ApiError> {
        let url = with_query(self.endpoint(&["api", "listings"])?, &search.query_pairs());
        self.get_page(url).await
    }

    pub async fn listing_by_slug(&self, slug: &str) -> Result<Listing, ApiError> {
        self.get_data(self.endpoint(&["api", "listings", slug])?).await
    }

    pub async fn my_listings(&self) -> Result<Vec<Listing>, ApiError> {
        let page = self
            .get_page(self.endpoint(&["api", "my", "listings"])?)
            .await?;
        Ok(page.items)
    }

    pub async fn my_listing(&self, id: &str) -> Result<Listing, ApiError> {
        self.get_data(self.endpoint(&["api", "my", "listings", id])?)
            .await
    }

    pub async fn create_listing_draft(&self, draft: &ListingDraft) -> Result<Listing, ApiError> {
        let url = self.endpoint(&["api", "my", "listings"])?;
        self.send_data(Method::POST, url, Some(encode(draft)?)).await
    }

    pub async fn update_listing_draft(
        &self,
        id: &str,
        draft: &ListingDraft,
    ) -> Result<Listing, ApiError> {
        let url = self.endpoint(&["api", "my", "listings", id])?;
        self.send_data(Method::PATCH, url, Some(encode(draft)?))
            .await
            .map_err(|err| err.for_listing(id))
    }

    pub async fn delete_my_listing(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "my", "listings", id])?;
        self.send_unit(Method::DELETE, url, None).await
    }

    /// Sends the listing to moderation. A 402 comes back as
    /// `PaymentRequired` carrying `id`.
    pub async fn submit_listing(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "my", "listings", id, "submit"])?;
        self.send_unit(Method::POST, url, None)
            .await
            .map_err(|err| err.for_listing(id))
    }

    pub async fn archive_my_listing(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "my", "listings", id, "archive"])?;
        self.send_unit(Method::POST, url, None).await
    }

    pub async fn attach_media(
        &self,
        listing_id: &str,
        media: &[LocalMedia],
    ) -> Result<Vec<MediaItem>, ApiError> {
        let url = self.endpoint(&["api", "media", "attach"])?;
        let body = encode(&AttachRequest { listing_id, media })?;
        self.send_data(Method::POST, url, Some(body))
            .await
            .map_err(|err| err.for_listing(listing_id))
    }

    pub async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
        let page = self
            .get_page(self.endpoint(&["api", "my", "products"])?)
            .await?;
        Ok(page.items)
    }

    pub async fn favorites(&self) -> Result<Vec<Listing>, ApiError> {
        let page = self.get_page(self.endpoint(&["api", "favorites"])?).await?;
        Ok(page.items)
    }

    pub async fn add_favorite(&self, listing_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "favorites", listing_id])?;
        self.send_unit(Method::POST, url, None).await
    }

    pub async fn remove_favorite(&self, listing_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "favorites", listing_id])?;
        self.send_unit(Method::DELETE, url, None).await
    }
}
