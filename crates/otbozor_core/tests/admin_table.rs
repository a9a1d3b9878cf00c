mod common;

use otbozor_core::admin::{update, AdminEffect, AdminListingQuery, AdminMsg, AdminState, AdminTab};
use otbozor_core::{Action, ListingStatus, Pagination};
use pretty_assertions::assert_eq;

use common::{init_logging, listing};

fn loaded(rows: Vec<otbozor_core::Listing>) -> AdminState {
    let state = AdminState::new();
    let (state, _) = update(state, AdminMsg::Opened);
    let query = state.query().clone();
    let (state, _) = update(
        state,
        AdminMsg::PageLoaded {
            query,
            pagination: Pagination {
                page: 1,
                limit: 20,
                total: rows.len() as u64,
                total_pages: 1,
            },
            rows,
        },
    );
    state
}

#[test]
fn opening_loads_page_and_counts() {
    init_logging();
    let (state, effects) = update(AdminState::new(), AdminMsg::Opened);
    let query = AdminListingQuery::default();
    assert_eq!(
        effects,
        vec![
            AdminEffect::LoadPage {
                query: query.clone()
            },
            AdminEffect::LoadTabCounts { base: query },
        ]
    );
    assert!(state.view().loading);
}

#[test]
fn tab_change_resets_page() {
    let state = AdminState::with_query(AdminListingQuery {
        page: 3,
        ..AdminListingQuery::default()
    });
    let (state, effects) = update(state, AdminMsg::TabSelected(AdminTab::Pending));
    assert_eq!(state.query().page, 1);
    assert_eq!(state.query().tab, AdminTab::Pending);
    assert_eq!(effects.len(), 1);
}

#[test]
fn stale_page_response_is_ignored() {
    let (state, _) = update(AdminState::new(), AdminMsg::Opened);
    let stale_query = state.query().clone();
    let (state, _) = update(state, AdminMsg::TabSelected(AdminTab::Rejected));
    let (state, _) = update(
        state,
        AdminMsg::PageLoaded {
            query: stale_query,
            rows: vec![listing("l-1", ListingStatus::Pending, true)],
            pagination: Pagination::default(),
        },
    );
    assert!(state.view().rows.is_empty());
    assert!(state.view().loading);
}

#[test]
fn approve_only_for_rows_that_allow_it() {
    let state = loaded(vec![
        listing("pending", ListingStatus::Pending, true),
        listing("approved", ListingStatus::Approved, true),
    ]);

    let (state, effects) = update(
        state,
        AdminMsg::ApproveClicked {
            listing_id: "approved".into(),
        },
    );
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        AdminMsg::ApproveClicked {
            listing_id: "pending".into(),
        },
    );
    assert_eq!(
        effects,
        vec![AdminEffect::Approve {
            listing_id: "pending".into()
        }]
    );
    assert_eq!(state.view().busy_row.as_deref(), Some("pending"));

    // A second action while one is in flight is refused.
    let (_, effects) = update(
        state,
        AdminMsg::DeleteClicked {
            listing_id: "approved".into(),
            confirmed: true,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn reject_needs_a_reason_and_delete_needs_confirmation() {
    let state = loaded(vec![listing("p", ListingStatus::Pending, true)]);

    let (state, effects) = update(
        state,
        AdminMsg::RejectClicked {
            listing_id: "p".into(),
            reason: None,
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        AdminMsg::RejectClicked {
            listing_id: "p".into(),
            reason: Some("   ".into()),
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(
        state,
        AdminMsg::DeleteClicked {
            listing_id: "p".into(),
            confirmed: false,
        },
    );
    assert!(effects.is_empty());

    let (_, effects) = update(
        state,
        AdminMsg::RejectClicked {
            listing_id: "p".into(),
            reason: Some(" Rasm sifatsiz ".into()),
        },
    );
    assert_eq!(
        effects,
        vec![AdminEffect::Reject {
            listing_id: "p".into(),
            reason: "Rasm sifatsiz".into()
        }]
    );
}

#[test]
fn success_reloads_page_and_counts() {
    let state = loaded(vec![listing("p", ListingStatus::Pending, true)]);
    let (state, _) = update(
        state,
        AdminMsg::ApproveClicked {
            listing_id: "p".into(),
        },
    );
    let (state, effects) = update(
        state,
        AdminMsg::ActionSucceeded {
            listing_id: "p".into(),
        },
    );
    assert!(matches!(effects[0], AdminEffect::LoadPage { .. }));
    assert!(matches!(effects[1], AdminEffect::LoadTabCounts { .. }));
    assert_eq!(state.view().busy_row, None);
}

#[test]
fn failure_surfaces_message_and_frees_row() {
    let state = loaded(vec![listing("p", ListingStatus::Pending, true)]);
    let (state, _) = update(
        state,
        AdminMsg::ApproveClicked {
            listing_id: "p".into(),
        },
    );
    let (state, effects) = update(
        state,
        AdminMsg::ActionFailed {
            message: "Ruxsat yo'q".into(),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("Ruxsat yo'q"));
    assert_eq!(view.busy_row, None);
    assert!(view.rows[0].actions.contains(Action::Approve));
}

#[test]
fn counts_fill_every_tab() {
    let (state, _) = update(
        AdminState::new(),
        AdminMsg::CountsLoaded(AdminTab::ALL.into_iter().map(|tab| (tab, 2)).collect()),
    );
    let view = state.view();
    assert_eq!(view.tab_counts.len(), AdminTab::ALL.len());
    assert!(view.tab_counts.iter().all(|(_, count)| *count == Some(2)));
}

#[test]
fn page_selection_is_clamped_to_known_pages() {
    let (state, _) = update(AdminState::new(), AdminMsg::Opened);
    let query = state.query().clone();
    let (state, _) = update(
        state,
        AdminMsg::PageLoaded {
            query,
            rows: Vec::new(),
            pagination: Pagination {
                page: 1,
                limit: 20,
                total: 45,
                total_pages: 3,
            },
        },
    );
    let (state, effects) = update(state, AdminMsg::PageSelected(9));
    assert_eq!(state.query().page, 3);
    assert_eq!(effects.len(), 1);
}

#[test]
fn emptied_last_page_steps_back() {
    let state = AdminState::with_query(AdminListingQuery {
        page: 2,
        ..AdminListingQuery::default()
    });
    let (state, _) = update(state, AdminMsg::Opened);
    let query = state.query().clone();
    let (state, effects) = update(
        state,
        AdminMsg::PageLoaded {
            query,
            rows: Vec::new(),
            pagination: Pagination {
                page: 2,
                limit: 20,
                total: 20,
                total_pages: 1,
            },
        },
    );
    assert_eq!(state.query().page, 1);
    assert_eq!(
        effects,
        vec![AdminEffect::LoadPage {
            query: AdminListingQuery::default()
        }]
    );
    assert!(state.view().loading);

    let (state, effects) = update(
        state,
        AdminMsg::PageLoaded {
            query: AdminListingQuery::default(),
            rows: vec![listing("p", ListingStatus::Pending, true)],
            pagination: Pagination {
                page: 1,
                limit: 20,
                total: 20,
                total_pages: 1,
            },
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.page, 1);
    assert_eq!(view.rows.len(), 1);
}
