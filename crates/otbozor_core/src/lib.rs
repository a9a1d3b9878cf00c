//! Marketplace client core: pure state machines, the status-to-action policy
//! and view-model helpers. No IO happens here.
pub mod admin;
pub mod favorites;
mod filter;
mod model;
pub mod my_listings;
mod paging;
mod policy;
pub mod reactivation;
mod view_model;
pub mod wizard;

pub use filter::{filter_listings, filter_products, ListingFilter, ProductFilter, UnknownFilter};
pub use model::{
    AuthSession, Breed, Category, Currency, District, Event, HorseGender, Invoice, Listing,
    ListingDraft, ListingId, ListingStatus, LocalMedia, MediaItem, MediaKind, NamedRef,
    Pagination, Product, ProductId, ProductStatus, ProductUpdate, ReactivationQuote, Region, User,
    UserId, UserStatus,
};
pub use paging::{clamp_page, page_slice, total_pages};
pub use policy::{
    actions_for, badge_for, listing_actions, product_actions, Action, ActionSet, Badge, BadgeTone,
    EntityKind, EntityStatus, Role,
};
pub use view_model::{format_price, ListingRowView, ProductRowView, FALLBACK_ERROR};
