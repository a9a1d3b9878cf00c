//! The owner's listing page: filter tabs, per-row badges and actions.
use crate::filter::{filter_listings, ListingFilter};
use crate::model::{Listing, ListingId};
use crate::policy::{listing_actions, Action, Role};
use crate::view_model::ListingRowView;
use crate::wizard::WizardStep;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MyListingsMsg {
    Opened,
    Loaded(Vec<Listing>),
    LoadFailed { message: String },
    FilterSelected(ListingFilter),
    ActionClicked { listing_id: ListingId, action: Action },
    ActionSucceeded { listing_id: ListingId },
    ActionFailed { listing_id: ListingId, message: String },
    /// Payment provider returned to the app; the backend state has moved on.
    PaymentReturned,
    CheckoutReady { listing_id: ListingId, url: String },
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MyListingsEffect {
    LoadListings,
    SubmitListing { listing_id: ListingId },
    ArchiveListing { listing_id: ListingId },
    DeleteListing { listing_id: ListingId },
    PayListing { listing_id: ListingId },
    OpenCheckout { url: String },
    OpenWizard { listing_id: ListingId, step: WizardStep },
    StartReactivation { listing_id: ListingId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MyListingsState {
    listings: Vec<Listing>,
    filter: ListingFilter,
    busy: Option<ListingId>,
    loading: bool,
    error: Option<String>,
    dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyListingsViewModel {
    pub filter: ListingFilter,
    pub rows: Vec<ListingRowView>,
    /// Count per partition key, for the tab labels.
    pub counts: Vec<(ListingFilter, usize)>,
    pub busy_row: Option<ListingId>,
    pub loading: bool,
    pub error: Option<String>,
}

impl MyListingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: ListingFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn view(&self) -> MyListingsViewModel {
        let counts = std::iter::once(ListingFilter::All)
            .chain(ListingFilter::PARTITION)
            .map(|filter| (filter, filter_listings(&self.listings, filter).len()))
            .collect();
        MyListingsViewModel {
            filter: self.filter,
            rows: filter_listings(&self.listings, self.filter)
                .into_iter()
                .map(|listing| ListingRowView::build(listing, Role::Owner))
                .collect(),
            counts,
            busy_row: self.busy.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

pub fn update(
    mut state: MyListingsState,
    msg: MyListingsMsg,
) -> (MyListingsState, Vec<MyListingsEffect>) {
    let effects = match msg {
        MyListingsMsg::Opened | MyListingsMsg::PaymentReturned => {
            state.loading = true;
            state.error = None;
            state.dirty = true;
            vec![MyListingsEffect::LoadListings]
        }
        MyListingsMsg::Loaded(listings) => {
            state.listings = listings;
            state.loading = false;
            state.error = None;
            state.dirty = true;
            Vec::new()
        }
        MyListingsMsg::LoadFailed { message } => {
            state.loading = false;
            state.error = Some(message);
            state.dirty = true;
            Vec::new()
        }
        MyListingsMsg::FilterSelected(filter) => {
            if filter != state.filter {
                state.filter = filter;
                state.dirty = true;
            }
            Vec::new()
        }
        MyListingsMsg::ActionClicked { listing_id, action } => {
            action_clicked(&mut state, listing_id, action)
        }
        MyListingsMsg::ActionSucceeded { listing_id } => {
            if state.busy.as_ref() == Some(&listing_id) {
                state.busy = None;
            }
            state.loading = true;
            state.dirty = true;
            vec![MyListingsEffect::LoadListings]
        }
        MyListingsMsg::ActionFailed { listing_id, message } => {
            if state.busy.as_ref() == Some(&listing_id) {
                state.busy = None;
            }
            state.error = Some(message);
            state.dirty = true;
            Vec::new()
        }
        MyListingsMsg::CheckoutReady { listing_id, url } => {
            if state.busy.as_ref() != Some(&listing_id) {
                return (state, Vec::new());
            }
            state.busy = None;
            state.dirty = true;
            vec![MyListingsEffect::OpenCheckout { url }]
        }
        MyListingsMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn action_clicked(
    state: &mut MyListingsState,
    listing_id: ListingId,
    action: Action,
) -> Vec<MyListingsEffect> {
    if state.busy.is_some() {
        return Vec::new();
    }
    let Some(listing) = state.listings.iter().find(|l| l.id == listing_id) else {
        return Vec::new();
    };
    if !listing_actions(listing, Role::Owner).contains(action) {
        return Vec::new();
    }

    let effect = match action {
        Action::Edit => {
            return vec![MyListingsEffect::OpenWizard {
                listing_id,
                step: WizardStep::BasicInfo,
            }]
        }
        Action::Finish => {
            return vec![MyListingsEffect::OpenWizard {
                listing_id,
                step: WizardStep::Review,
            }]
        }
        Action::Reactivate => return vec![MyListingsEffect::StartReactivation { listing_id }],
        Action::Submit => MyListingsEffect::SubmitListing {
            listing_id: listing_id.clone(),
        },
        Action::Archive => MyListingsEffect::ArchiveListing {
            listing_id: listing_id.clone(),
        },
        Action::Delete => MyListingsEffect::DeleteListing {
            listing_id: listing_id.clone(),
        },
        Action::Pay => MyListingsEffect::PayListing {
            listing_id: listing_id.clone(),
        },
        Action::Approve | Action::Reject => return Vec::new(),
    };
    state.busy = Some(listing_id);
    state.error = None;
    state.dirty = true;
    vec![effect]
}
