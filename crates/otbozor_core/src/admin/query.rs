use std::fmt;
use std::str::FromStr;

use crate::filter::UnknownFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AdminTab {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
    Expired,
    Paid,
    Archived,
}

impl AdminTab {
    pub const ALL: [AdminTab; 7] = [
        AdminTab::All,
        AdminTab::Pending,
        AdminTab::Approved,
        AdminTab::Rejected,
        AdminTab::Expired,
        AdminTab::Paid,
        AdminTab::Archived,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AdminTab::All => "all",
            AdminTab::Pending => "pending",
            AdminTab::Approved => "approved",
            AdminTab::Rejected => "rejected",
            AdminTab::Expired => "expired",
            AdminTab::Paid => "paid",
            AdminTab::Archived => "archived",
        }
    }

    /// Query parameters this tab adds to the admin listing request.
    pub fn query_pairs(self) -> Vec<(&'static str, &'static str)> {
        match self {
            AdminTab::All => Vec::new(),
            AdminTab::Pending => vec![("status", "PENDING")],
            AdminTab::Approved => vec![("status", "APPROVED")],
            AdminTab::Rejected => vec![("status", "REJECTED")],
            AdminTab::Expired => vec![("status", "EXPIRED")],
            AdminTab::Paid => vec![("isPaid", "true")],
            AdminTab::Archived => vec![("status", "ARCHIVED")],
        }
    }
}

impl fmt::Display for AdminTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AdminTab {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminTab::ALL
            .into_iter()
            .find(|tab| tab.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

pub const ADMIN_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdminListingQuery {
    pub tab: AdminTab,
    pub page: u32,
    pub region_id: Option<String>,
    pub sale_source: Option<String>,
    pub limit: u32,
}

impl Default for AdminListingQuery {
    fn default() -> Self {
        Self {
            tab: AdminTab::All,
            page: 1,
            region_id: None,
            sale_source: None,
            limit: ADMIN_PAGE_SIZE,
        }
    }
}

impl AdminListingQuery {
    /// `tab:page:region:saleSource`, empty segments for unset filters.
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.tab.key(),
            self.page,
            self.region_id.as_deref().unwrap_or(""),
            self.sale_source.as_deref().unwrap_or("")
        )
    }

    /// The cheapest request that still reports `pagination.total` for `tab`.
    pub fn count_probe(&self, tab: AdminTab) -> Self {
        Self {
            tab,
            page: 1,
            limit: 1,
            ..self.clone()
        }
    }
}
