//! Plain-text rendering of the core view models.
use std::fmt::Write;

use chrono::{DateTime, Utc};
use otbozor_client::Paged;
use otbozor_core::admin::AdminViewModel;
use otbozor_core::favorites::FavoritesViewModel;
use otbozor_core::my_listings::MyListingsViewModel;
use otbozor_core::reactivation::ReactivationViewModel;
use otbozor_core::wizard::{RequiredField, WizardOutcome, WizardViewModel};
use otbozor_core::{
    format_price, ActionSet, Badge, BadgeTone, Listing, ListingRowView, NamedRef, ProductRowView,
};

fn tone_marker(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Neutral => " ",
        BadgeTone::Info => "i",
        BadgeTone::Success => "+",
        BadgeTone::Warning => "!",
        BadgeTone::Danger => "x",
    }
}

fn badge(badge: &Badge) -> String {
    format!("[{}] {}", tone_marker(badge.tone), badge.label)
}

fn actions(actions: &ActionSet) -> String {
    if actions.is_empty() {
        return "-".to_string();
    }
    actions
        .iter()
        .map(|action| action.label())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn banner(out: &mut String, error: Option<&str>) {
    if let Some(error) = error {
        let _ = writeln!(out, "Xato: {error}");
    }
}

fn listing_row(out: &mut String, row: &ListingRowView) {
    let _ = writeln!(out, "{}  {}", row.id, row.title);
    let _ = writeln!(
        out,
        "    {}  {}  {}",
        badge(&row.badge),
        row.price,
        row.region.as_deref().unwrap_or("")
    );
    if let Some(reason) = &row.rejection_reason {
        let _ = writeln!(out, "    Rad etish sababi: {reason}");
    }
    let _ = writeln!(out, "    Amallar: {}", actions(&row.actions));
}

pub(crate) fn my_listings(view: &MyListingsViewModel) -> String {
    let mut out = String::new();
    let tabs: Vec<String> = view
        .counts
        .iter()
        .map(|(filter, count)| {
            if *filter == view.filter {
                format!("*{filter} ({count})*")
            } else {
                format!("{filter} ({count})")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));
    banner(&mut out, view.error.as_deref());
    if view.rows.is_empty() {
        let _ = writeln!(out, "E'lonlar yo'q");
    }
    for row in &view.rows {
        listing_row(&mut out, row);
    }
    out
}

pub(crate) fn products(rows: &[ProductRowView]) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        let _ = writeln!(out, "Mahsulotlar yo'q");
    }
    for row in rows {
        let _ = writeln!(out, "{}  {}  {}  {}", row.id, row.title, row.price, badge(&row.badge));
    }
    out
}

pub(crate) fn favorites(view: &FavoritesViewModel) -> String {
    let mut out = String::new();
    banner(&mut out, view.error.as_deref());
    if view.items.is_empty() {
        let _ = writeln!(out, "Sevimlilar ro'yxati bo'sh");
        return out;
    }
    for item in &view.items {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            item.id,
            item.title,
            format_price(item.price_amount, item.currency)
        );
    }
    let _ = writeln!(
        out,
        "Sahifa {}/{} ({} ta)",
        view.current_page,
        view.total_pages.max(1),
        view.total_items
    );
    out
}

pub(crate) fn admin(view: &AdminViewModel) -> String {
    let mut out = String::new();
    let tabs: Vec<String> = view
        .tab_counts
        .iter()
        .map(|(tab, count)| {
            let count = count.map_or_else(|| "…".to_string(), |c| c.to_string());
            if *tab == view.tab {
                format!("*{tab} ({count})*")
            } else {
                format!("{tab} ({count})")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));
    banner(&mut out, view.error.as_deref());
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "{notice}");
    }
    for row in &view.rows {
        listing_row(&mut out, row);
    }
    let _ = writeln!(
        out,
        "Sahifa {}/{} (jami {})",
        view.page,
        view.total_pages.max(1),
        view.total
    );
    out
}

pub(crate) fn required_field(field: RequiredField) -> &'static str {
    match field {
        RequiredField::Title => "sarlavha",
        RequiredField::Breed => "zot",
        RequiredField::BirthYear => "tug'ilgan yil",
        RequiredField::Region => "viloyat",
        RequiredField::District => "tuman",
        RequiredField::PriceAmount => "narx",
        RequiredField::Media => "kamida bitta rasm yoki video",
    }
}

pub(crate) fn wizard(view: &WizardViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Qadam {}/{}", view.step_number, view.total_steps);
    if !view.missing.is_empty() {
        let fields: Vec<&str> = view.missing.iter().map(|f| required_field(*f)).collect();
        let _ = writeln!(out, "To'ldirilmagan: {}", fields.join(", "));
    }
    banner(&mut out, view.error.as_deref());
    match &view.outcome {
        Some(WizardOutcome::Submitted { listing_id }) => {
            let _ = writeln!(out, "E'lon {listing_id} moderatsiyaga yuborildi");
        }
        Some(WizardOutcome::PaymentRequired { listing_id }) => {
            let _ = writeln!(out, "E'lon {listing_id} saqlandi, yuborishdan oldin to'lov kerak");
        }
        None => {}
    }
    out
}

pub(crate) fn reactivation(view: &ReactivationViewModel) -> String {
    let mut out = String::new();
    banner(&mut out, view.error.as_deref());
    if let (Some(price), Some(days)) = (&view.price, view.duration_days) {
        let _ = writeln!(out, "Qayta faollashtirish: {price}, {days} kun");
    }
    out
}

pub(crate) fn browse(page: &Paged<Listing>, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for listing in &page.items {
        let marker = if listing.is_premium(now) {
            "★ "
        } else if listing.is_boosted(now) {
            "↑ "
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{marker}{}  {}  {}",
            listing.slug,
            listing.title,
            format_price(listing.price_amount, listing.currency)
        );
    }
    let _ = writeln!(
        out,
        "Sahifa {}/{} (jami {})",
        page.pagination.page,
        page.pagination.total_pages.max(1),
        page.pagination.total
    );
    out
}

pub(crate) fn references(items: &[NamedRef]) -> String {
    items
        .iter()
        .map(|item| format!("{}  {}\n", item.id, item.name))
        .collect()
}
