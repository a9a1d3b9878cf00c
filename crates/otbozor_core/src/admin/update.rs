use super::{AdminEffect, AdminMsg, AdminState};
use crate::model::ListingId;
use crate::policy::{listing_actions, Action, Role};

/// Pure update function for the moderation table.
pub fn update(mut state: AdminState, msg: AdminMsg) -> (AdminState, Vec<AdminEffect>) {
    let effects = match msg {
        AdminMsg::Opened => reload(&mut state),
        AdminMsg::TabSelected(tab) => {
            if tab == state.query.tab {
                return (state, Vec::new());
            }
            state.query.tab = tab;
            state.query.page = 1;
            load_page(&mut state)
        }
        AdminMsg::PageSelected(page) => {
            let last = state.pagination.map_or(1, |p| p.total_pages.max(1));
            let page = page.clamp(1, last);
            if page == state.query.page {
                return (state, Vec::new());
            }
            state.query.page = page;
            load_page(&mut state)
        }
        AdminMsg::RegionChanged(region_id) => {
            if region_id == state.query.region_id {
                return (state, Vec::new());
            }
            state.query.region_id = region_id;
            state.query.page = 1;
            reload(&mut state)
        }
        AdminMsg::SaleSourceChanged(sale_source) => {
            if sale_source == state.query.sale_source {
                return (state, Vec::new());
            }
            state.query.sale_source = sale_source;
            state.query.page = 1;
            reload(&mut state)
        }
        AdminMsg::PageLoaded {
            query,
            rows,
            pagination,
        } => {
            // A response for a query the user already moved away from.
            if query != state.query {
                return (state, Vec::new());
            }
            state.rows = rows;
            state.pagination = Some(pagination);
            state.counts.insert(query.tab, pagination.total);
            // The last page can vanish under us after a delete or reject.
            let last = pagination.total_pages.max(1);
            if state.query.page > last {
                state.query.page = last;
                load_page(&mut state)
            } else {
                state.loading = false;
                state.mark_dirty();
                Vec::new()
            }
        }
        AdminMsg::PageLoadFailed { message } => {
            state.loading = false;
            state.error = Some(message);
            state.mark_dirty();
            Vec::new()
        }
        AdminMsg::CountsLoaded(counts) => {
            state.counts.extend(counts);
            state.mark_dirty();
            Vec::new()
        }
        AdminMsg::ApproveClicked { listing_id } => {
            if !begin_action(&mut state, &listing_id, Action::Approve) {
                return (state, Vec::new());
            }
            vec![AdminEffect::Approve { listing_id }]
        }
        AdminMsg::RejectClicked { listing_id, reason } => {
            let Some(reason) = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty())
            else {
                return (state, Vec::new());
            };
            if !begin_action(&mut state, &listing_id, Action::Reject) {
                return (state, Vec::new());
            }
            vec![AdminEffect::Reject { listing_id, reason }]
        }
        AdminMsg::DeleteClicked {
            listing_id,
            confirmed,
        } => {
            if !confirmed || !begin_action(&mut state, &listing_id, Action::Delete) {
                return (state, Vec::new());
            }
            vec![AdminEffect::Delete { listing_id }]
        }
        AdminMsg::ActionSucceeded { listing_id } => {
            if state.pending_action.as_ref() != Some(&listing_id) {
                return (state, Vec::new());
            }
            state.pending_action = None;
            state.notice = Some("Bajarildi".to_string());
            reload(&mut state)
        }
        AdminMsg::ActionFailed { message } => {
            state.pending_action = None;
            state.error = Some(message);
            state.mark_dirty();
            Vec::new()
        }
        AdminMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Gates a row action on the policy table and the one-action-at-a-time rule.
fn begin_action(state: &mut AdminState, listing_id: &ListingId, action: Action) -> bool {
    if state.pending_action.is_some() {
        return false;
    }
    let Some(row) = state.rows.iter().find(|row| &row.id == listing_id) else {
        return false;
    };
    if !listing_actions(row, Role::Admin).contains(action) {
        return false;
    }
    state.pending_action = Some(listing_id.clone());
    state.error = None;
    state.notice = None;
    state.mark_dirty();
    true
}

fn load_page(state: &mut AdminState) -> Vec<AdminEffect> {
    state.loading = true;
    state.error = None;
    state.mark_dirty();
    vec![AdminEffect::LoadPage {
        query: state.query.clone(),
    }]
}

fn reload(state: &mut AdminState) -> Vec<AdminEffect> {
    let mut effects = load_page(state);
    effects.push(AdminEffect::LoadTabCounts {
        base: state.query.clone(),
    });
    effects
}
