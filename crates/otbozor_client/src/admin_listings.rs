//! Cache-aside access to the admin moderation table.
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::try_join_all;
use otbozor_core::admin::{AdminListingQuery, AdminTab};
use otbozor_core::{Listing, Pagination};
use otbozor_logging::{market_debug, market_info};

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::client::ApiClient;
use crate::error::ApiError;

pub const ADMIN_CACHE_TTL: Duration = Duration::from_secs(180);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminListingPage {
    pub rows: Vec<Listing>,
    pub pagination: Pagination,
}

/// Admin listing reads go through a shared page cache; every moderation
/// action clears it.
#[derive(Debug, Clone)]
pub struct AdminListingsService {
    api: ApiClient,
    cache: Arc<TtlCache<String, AdminListingPage>>,
}

impl AdminListingsService {
    pub fn new(api: ApiClient) -> Self {
        Self::with_clock(api, Arc::new(SystemClock))
    }

    pub fn with_clock(api: ApiClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            cache: Arc::new(TtlCache::new(ADMIN_CACHE_TTL, clock)),
        }
    }

    pub fn cache(&self) -> &TtlCache<String, AdminListingPage> {
        &self.cache
    }

    pub async fn page(&self, query: &AdminListingQuery) -> Result<Arc<AdminListingPage>, ApiError> {
        let key = query.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            market_debug!("admin listings cache hit {key}");
            return Ok(hit);
        }
        let fetched = self.api.admin_listings(query).await?;
        Ok(self.cache.insert(
            key,
            AdminListingPage {
                rows: fetched.items,
                pagination: fetched.pagination,
            },
        ))
    }

    /// Totals per tab, fetched in parallel with one-row probes. Not cached.
    pub async fn tab_counts(&self, base: &AdminListingQuery) -> Result<Vec<(AdminTab, u64)>, ApiError> {
        let probes = AdminTab::ALL.into_iter().map(|tab| {
            let probe = base.count_probe(tab);
            async move {
                let page = self.api.admin_listings(&probe).await?;
                Ok::<_, ApiError>((tab, page.pagination.total))
            }
        });
        try_join_all(probes).await
    }

    pub async fn approve(&self, listing_id: &str) -> Result<(), ApiError> {
        self.api.approve_listing(listing_id).await?;
        self.after_mutation("approved", listing_id);
        Ok(())
    }

    pub async fn reject(&self, listing_id: &str, reason: &str) -> Result<(), ApiError> {
        self.api.reject_listing(listing_id, reason).await?;
        self.after_mutation("rejected", listing_id);
        Ok(())
    }

    pub async fn delete(&self, listing_id: &str) -> Result<(), ApiError> {
        self.api.admin_delete_listing(listing_id).await?;
        self.after_mutation("deleted", listing_id);
        Ok(())
    }

    fn after_mutation(&self, what: &str, listing_id: &str) {
        market_info!("Listing {listing_id} {what}; dropping cached admin pages");
        self.cache.invalidate_all();
    }
}
