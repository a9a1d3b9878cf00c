use crate::model::{Currency, Listing, ListingId, Product, ProductId};
use crate::policy::{badge_for, listing_actions, product_actions, ActionSet, Badge, EntityStatus, Role};

/// Localized fallback shown when a failure carries no message of its own.
pub const FALLBACK_ERROR: &str = "Xatolik yuz berdi";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRowView {
    pub id: ListingId,
    pub title: String,
    pub price: String,
    pub region: Option<String>,
    pub badge: Badge,
    pub actions: ActionSet,
    pub rejection_reason: Option<String>,
}

impl ListingRowView {
    pub fn build(listing: &Listing, role: Role) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price: format_price(listing.price_amount, listing.currency),
            region: listing.region.as_ref().map(|r| r.name.clone()),
            badge: badge_for(
                EntityStatus::Listing(listing.status),
                listing.is_settled(),
            ),
            actions: listing_actions(listing, role),
            rejection_reason: listing.rejection_reason.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRowView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub badge: Badge,
    pub actions: ActionSet,
}

impl ProductRowView {
    pub fn build(product: &Product, role: Role) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: format_price(product.price_amount, product.currency),
            badge: badge_for(EntityStatus::Product(product.status), true),
            actions: product_actions(product, role),
        }
    }
}

/// `12 500 000 so'm`, `$1,200`, or `Kelishiladi` when no price is set.
pub fn format_price(amount: Option<u64>, currency: Currency) -> String {
    let Some(amount) = amount else {
        return "Kelishiladi".to_string();
    };
    match currency {
        Currency::Uzs => format!("{} so'm", group_digits(amount, ' ')),
        Currency::Usd => format!("${}", group_digits(amount, ',')),
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
