#![allow(dead_code)]

use std::sync::Once;

use otbozor_core::{Currency, Listing, ListingStatus, NamedRef};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(otbozor_logging::initialize_for_tests);
}

pub fn listing(id: &str, status: ListingStatus, paid: bool) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Qorabayir {id}"),
        slug: format!("qorabayir-{id}"),
        price_amount: Some(45_000_000),
        currency: Currency::Uzs,
        status,
        is_paid: paid,
        used_credit: false,
        region: Some(NamedRef {
            id: "r-1".into(),
            name: "Samarqand".into(),
            slug: None,
        }),
        district: None,
        breed: None,
        media: Vec::new(),
        view_count: 0,
        favorite_count: 0,
        boost_expires_at: None,
        premium_expires_at: None,
        sale_source: None,
        rejection_reason: None,
        description: None,
        gender: None,
        birth_year: None,
        is_negotiable: false,
        has_documents: false,
        created_at: None,
    }
}

pub fn numbered_listings(count: usize) -> Vec<Listing> {
    (1..=count)
        .map(|i| listing(&format!("l-{i}"), ListingStatus::Approved, true))
        .collect()
}
