//! Admin listing moderation table: tabs, filters, pagination and per-row
//! approve / reject / delete.
mod query;
mod update;

use std::collections::BTreeMap;

use crate::model::{Listing, ListingId, Pagination};
use crate::policy::Role;
use crate::view_model::ListingRowView;

pub use query::{AdminListingQuery, AdminTab, ADMIN_PAGE_SIZE};
pub use update::update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminMsg {
    Opened,
    TabSelected(AdminTab),
    PageSelected(u32),
    RegionChanged(Option<String>),
    SaleSourceChanged(Option<String>),
    PageLoaded {
        query: AdminListingQuery,
        rows: Vec<Listing>,
        pagination: Pagination,
    },
    PageLoadFailed { message: String },
    CountsLoaded(Vec<(AdminTab, u64)>),
    ApproveClicked { listing_id: ListingId },
    /// `reason` is `None` when the reason prompt was dismissed.
    RejectClicked {
        listing_id: ListingId,
        reason: Option<String>,
    },
    DeleteClicked { listing_id: ListingId, confirmed: bool },
    ActionSucceeded { listing_id: ListingId },
    ActionFailed { message: String },
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminEffect {
    LoadPage { query: AdminListingQuery },
    /// One probe per tab, sharing the filters of `base`.
    LoadTabCounts { base: AdminListingQuery },
    Approve { listing_id: ListingId },
    Reject { listing_id: ListingId, reason: String },
    Delete { listing_id: ListingId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminState {
    pub(crate) query: AdminListingQuery,
    pub(crate) rows: Vec<Listing>,
    pub(crate) pagination: Option<Pagination>,
    pub(crate) counts: BTreeMap<AdminTab, u64>,
    pub(crate) loading: bool,
    pub(crate) pending_action: Option<ListingId>,
    pub(crate) error: Option<String>,
    pub(crate) notice: Option<String>,
    dirty: bool,
}

impl AdminState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: AdminListingQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &AdminListingQuery {
        &self.query
    }

    pub fn view(&self) -> AdminViewModel {
        AdminViewModel {
            tab: self.query.tab,
            page: self.query.page,
            total_pages: self.pagination.map_or(0, |p| p.total_pages),
            total: self.pagination.map_or(0, |p| p.total),
            rows: self
                .rows
                .iter()
                .map(|listing| ListingRowView::build(listing, Role::Admin))
                .collect(),
            tab_counts: AdminTab::ALL
                .into_iter()
                .map(|tab| (tab, self.counts.get(&tab).copied()))
                .collect(),
            loading: self.loading,
            busy_row: self.pending_action.clone(),
            error: self.error.clone(),
            notice: self.notice.clone(),
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminViewModel {
    pub tab: AdminTab,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub rows: Vec<ListingRowView>,
    pub tab_counts: Vec<(AdminTab, Option<u64>)>,
    pub loading: bool,
    pub busy_row: Option<ListingId>,
    pub error: Option<String>,
    pub notice: Option<String>,
}
