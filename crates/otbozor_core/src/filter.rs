use std::fmt;
use std::str::FromStr;

use crate::model::{Listing, ListingStatus, Product, ProductStatus};

/// Tabs on the owner's listing page. Every key except `All` belongs to a
/// partition of (status, paid): each listing matches exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListingFilter {
    #[default]
    All,
    Active,
    Pending,
    Unpaid,
    Inactive,
    Rejected,
    Expired,
}

impl ListingFilter {
    pub const PARTITION: [ListingFilter; 6] = [
        ListingFilter::Active,
        ListingFilter::Pending,
        ListingFilter::Unpaid,
        ListingFilter::Inactive,
        ListingFilter::Rejected,
        ListingFilter::Expired,
    ];

    pub fn matches(self, status: ListingStatus, paid: bool) -> bool {
        match self {
            ListingFilter::All => true,
            ListingFilter::Active => status == ListingStatus::Approved,
            ListingFilter::Pending => status == ListingStatus::Pending,
            ListingFilter::Unpaid => status == ListingStatus::Draft && !paid,
            ListingFilter::Inactive => {
                (status == ListingStatus::Draft && paid) || status == ListingStatus::Archived
            }
            ListingFilter::Rejected => status == ListingStatus::Rejected,
            ListingFilter::Expired => status == ListingStatus::Expired,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ListingFilter::All => "all",
            ListingFilter::Active => "active",
            ListingFilter::Pending => "pending",
            ListingFilter::Unpaid => "unpaid",
            ListingFilter::Inactive => "inactive",
            ListingFilter::Rejected => "rejected",
            ListingFilter::Expired => "expired",
        }
    }
}

impl fmt::Display for ListingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl fmt::Display for UnknownFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter {:?}", self.0)
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for ListingFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        std::iter::once(ListingFilter::All)
            .chain(ListingFilter::PARTITION)
            .find(|filter| filter.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

pub fn filter_listings(listings: &[Listing], filter: ListingFilter) -> Vec<&Listing> {
    listings
        .iter()
        .filter(|listing| filter.matches(listing.status, listing.is_settled()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ProductFilter {
    pub const PARTITION: [ProductFilter; 2] = [ProductFilter::Active, ProductFilter::Inactive];

    pub fn matches(self, status: ProductStatus) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Active => status == ProductStatus::Published,
            ProductFilter::Inactive => {
                matches!(status, ProductStatus::Draft | ProductStatus::Archived)
            }
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ProductFilter::All => "all",
            ProductFilter::Active => "active",
            ProductFilter::Inactive => "inactive",
        }
    }
}

impl FromStr for ProductFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        std::iter::once(ProductFilter::All)
            .chain(ProductFilter::PARTITION)
            .find(|filter| filter.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

pub fn filter_products(products: &[Product], filter: ProductFilter) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| filter.matches(product.status))
        .collect()
}
