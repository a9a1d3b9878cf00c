use otbozor_core::{Breed, District, Event, Product, Region};

use crate::client::{with_query, ApiClient};
use crate::envelope::Paged;
use crate::error::ApiError;

impl ApiClient {
    pub async fn regions(&self) -> Result<Vec<Region>, ApiError> {
        self.get_data(self.endpoint(&["api", "regions"])?).await
    }

    pub async fn districts(&self, region_id: &str) -> Result<Vec<District>, ApiError> {
        self.get_data(self.endpoint(&["api", "regions", region_id, "districts"])?)
            .await
    }

    pub async fn breeds(&self) -> Result<Vec<Breed>, ApiError> {
        self.get_data(self.endpoint(&["api", "breeds"])?).await
    }

    pub async fn products(&self, page: u32, category_id: Option<&str>) -> Result<Paged<Product>, ApiError> {
        let url = with_query(
            self.endpoint(&["api", "products"])?,
            &[
                ("page", page.to_string()),
                ("categoryId", category_id.unwrap_or_default().to_string()),
            ],
        );
        self.get_page(url).await
    }

    /// Upcoming Ko'pkari events.
    pub async fn events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_data(self.endpoint(&["api", "events"])?).await
    }

    pub async fn event_by_slug(&self, slug: &str) -> Result<Event, ApiError> {
        self.get_data(self.endpoint(&["api", "events", slug])?).await
    }
}
