//! Shapes mirrored from the marketplace backend's JSON responses.
//!
//! Nothing here is owned by the client: values are rendered, occasionally
//! sent back wholesale, and refetched after every mutation.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ListingId = String;
pub type ProductId = String;
pub type UserId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Archived,
    Expired,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 6] = [
        ListingStatus::Draft,
        ListingStatus::Pending,
        ListingStatus::Approved,
        ListingStatus::Rejected,
        ListingStatus::Archived,
        ListingStatus::Expired,
    ];

    pub fn as_api_str(self) -> &'static str {
        match self {
            ListingStatus::Draft => "DRAFT",
            ListingStatus::Pending => "PENDING",
            ListingStatus::Approved => "APPROVED",
            ListingStatus::Rejected => "REJECTED",
            ListingStatus::Archived => "ARCHIVED",
            ListingStatus::Expired => "EXPIRED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Draft,
    Published,
    Archived,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Draft,
        ProductStatus::Published,
        ProductStatus::Archived,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Banned,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Uzs,
    Usd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorseGender {
    Stallion,
    Mare,
    Gelding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// Region, district, breed and category references all share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

pub type Region = NamedRef;
pub type District = NamedRef;
pub type Breed = NamedRef;
pub type Category = NamedRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub url: String,
    #[serde(default, rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub sort_order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub price_amount: Option<u64>,
    #[serde(default)]
    pub currency: Currency,
    pub status: ListingStatus,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub used_credit: bool,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub district: Option<District>,
    #[serde(default)]
    pub breed: Option<Breed>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub boost_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub premium_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sale_source: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub gender: Option<HorseGender>,
    #[serde(default)]
    pub birth_year: Option<u16>,
    #[serde(default)]
    pub is_negotiable: bool,
    #[serde(default)]
    pub has_documents: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Whether a boost is active at `now`.
    pub fn is_boosted(&self, now: DateTime<Utc>) -> bool {
        self.boost_expires_at.is_some_and(|until| until > now)
    }

    pub fn is_premium(&self, now: DateTime<Utc>) -> bool {
        self.premium_expires_at.is_some_and(|until| until > now)
    }

    /// Paid either directly or by spending a credit.
    pub fn is_settled(&self) -> bool {
        self.is_paid || self.used_credit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub price_amount: Option<u64>,
    #[serde(default)]
    pub currency: Currency,
    pub status: ProductStatus,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

/// Fields an admin may change on a product; sent as a wholesale PUT body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub title: String,
    pub price_amount: Option<u64>,
    pub currency: Currency,
    pub status: ProductStatus,
    pub category_id: Option<String>,
}

impl From<&Product> for ProductUpdate {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price_amount: product.price_amount,
            currency: product.currency,
            status: product.status,
            category_id: product.category.as_ref().map(|c| c.id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub telegram_username: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_verified: bool,
    pub status: UserStatus,
    #[serde(default)]
    pub listings_count: u64,
}

/// A Ko'pkari event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    pub location: String,
    #[serde(default)]
    pub prize_pool: Option<String>,
    #[serde(default)]
    pub organizer_name: Option<String>,
    #[serde(default)]
    pub organizer_phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivationQuote {
    pub listing_id: ListingId,
    pub amount: u64,
    #[serde(default)]
    pub currency: Currency,
    pub duration_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub payment_id: String,
    pub checkout_url: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
}

// The token stays out of debug output.
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// The editable body of a listing, as sent by the creation/edit wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub breed_id: Option<String>,
    pub gender: Option<HorseGender>,
    pub birth_year: Option<u16>,
    pub region_id: Option<String>,
    pub district_id: Option<String>,
    pub price_amount: Option<u64>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub is_negotiable: bool,
    #[serde(default)]
    pub has_documents: bool,
}

impl From<&Listing> for ListingDraft {
    fn from(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            description: listing.description.clone().unwrap_or_default(),
            breed_id: listing.breed.as_ref().map(|b| b.id.clone()),
            gender: listing.gender,
            birth_year: listing.birth_year,
            region_id: listing.region.as_ref().map(|r| r.id.clone()),
            district_id: listing.district.as_ref().map(|d| d.id.clone()),
            price_amount: listing.price_amount,
            currency: listing.currency,
            is_negotiable: listing.is_negotiable,
            has_documents: listing.has_documents,
        }
    }
}

/// Media picked locally that has not been attached to a listing yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalMedia {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}
