//! Bridges the pure screen state machines and the background engine.
//!
//! Effects become engine requests; engine events become screen messages.
use std::collections::VecDeque;
use std::time::Duration;

use otbozor_client::{
    ApiError, EngineEvent, EngineHandle, EngineReply, EngineRequest, SubmissionOutcome,
    SubmissionRequest, ViewScope,
};
use otbozor_core::admin::{AdminEffect, AdminMsg};
use otbozor_core::favorites::{FavoritesEffect, FavoritesMsg};
use otbozor_core::my_listings::{MyListingsEffect, MyListingsMsg};
use otbozor_core::reactivation::{ReactivationEffect, ReactivationMsg};
use otbozor_core::wizard::{WizardEffect, WizardMsg};
use otbozor_core::ListingId;
use otbozor_logging::{market_debug, market_warn};

/// What a screen effect turns into.
pub(crate) enum Step<M> {
    Request(EngineRequest),
    Msg(M),
    /// Handled outside the engine (printing, navigation).
    External(External),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum External {
    OpenCheckout { url: String },
    OpenWizard { listing_id: ListingId, finish: bool },
    StartReactivation { listing_id: ListingId },
    PayListing { listing_id: ListingId },
    ShowMyListings,
}

/// One screen's requests, sharing a view scope.
pub(crate) struct EffectRunner<'a> {
    engine: &'a EngineHandle,
    scope: ViewScope,
    timeout: Duration,
    in_flight: usize,
    external: Vec<External>,
}

impl<'a> EffectRunner<'a> {
    pub fn new(engine: &'a EngineHandle, timeout: Duration) -> Self {
        Self {
            engine,
            scope: engine.open_scope(),
            timeout,
            in_flight: 0,
            external: Vec::new(),
        }
    }

    /// Feeds `first` through `update`, runs the resulting effects and keeps
    /// going until no request is outstanding.
    pub fn drive<S, M, E>(
        &mut self,
        mut state: S,
        first: Vec<M>,
        update: fn(S, M) -> (S, Vec<E>),
        to_step: fn(E) -> Step<M>,
        to_msg: fn(EngineEvent) -> M,
    ) -> S {
        let mut inbox: VecDeque<M> = first.into();
        loop {
            while let Some(msg) = inbox.pop_front() {
                let (next, effects) = update(state, msg);
                state = next;
                for effect in effects {
                    match to_step(effect) {
                        Step::Request(request) => {
                            market_debug!("Dispatching {}", request_name(&request));
                            self.engine.dispatch(&self.scope, request);
                            self.in_flight += 1;
                        }
                        Step::Msg(msg) => inbox.push_back(msg),
                        Step::External(external) => self.external.push(external),
                    }
                }
            }
            if self.in_flight == 0 {
                return state;
            }
            match self.next_event() {
                Some(event) => {
                    self.in_flight -= 1;
                    inbox.push_back(to_msg(event));
                }
                None => {
                    market_warn!("Gave up waiting for {} request(s)", self.in_flight);
                    self.in_flight = 0;
                    return state;
                }
            }
        }
    }

    /// Sends one request outside any screen and waits for its answer.
    pub fn fetch(&mut self, request: EngineRequest) -> Result<EngineReply, ApiError> {
        self.engine.dispatch(&self.scope, request);
        self.in_flight += 1;
        match self.next_event() {
            Some(event) => {
                self.in_flight -= 1;
                event.result
            }
            None => {
                self.in_flight = 0;
                Err(ApiError::timed_out())
            }
        }
    }

    /// Like [`fetch`](Self::fetch), but hands the answer to the screen's event mapping.
    pub fn fetch_msg<M>(&mut self, request: EngineRequest, to_msg: fn(EngineEvent) -> M) -> M {
        let result = self.fetch(request.clone());
        to_msg(EngineEvent {
            scope: self.scope.id(),
            request,
            result,
        })
    }

    pub fn take_external(&mut self) -> Vec<External> {
        std::mem::take(&mut self.external)
    }

    fn next_event(&self) -> Option<EngineEvent> {
        loop {
            let event = self.engine.recv_timeout(self.timeout)?;
            if event.scope == self.scope.id() {
                return Some(event);
            }
            market_debug!("Dropping event for stale scope {}", event.scope);
        }
    }
}

fn request_name(request: &EngineRequest) -> &'static str {
    match request {
        EngineRequest::Browse(_) => "browse",
        EngineRequest::LoadMyListings => "my listings",
        EngineRequest::LoadMyProducts => "my products",
        EngineRequest::LoadFavorites => "favorites",
        EngineRequest::AddFavorite { .. } => "add favorite",
        EngineRequest::RemoveFavorite { .. } => "remove favorite",
        EngineRequest::LoadWizardResources { .. } => "wizard resources",
        EngineRequest::LoadDistricts { .. } => "districts",
        EngineRequest::SaveDraft { .. } => "save draft",
        EngineRequest::Submit(_) => "submission",
        EngineRequest::SubmitListing { .. } => "submit listing",
        EngineRequest::ArchiveListing { .. } => "archive listing",
        EngineRequest::DeleteListing { .. } => "delete listing",
        EngineRequest::CreateListingInvoice { .. } => "listing invoice",
        EngineRequest::ReactivationQuote { .. } => "reactivation quote",
        EngineRequest::CreateReactivationInvoice { .. } => "reactivation invoice",
        EngineRequest::AdminPage(_) => "admin page",
        EngineRequest::AdminTabCounts(_) => "admin tab counts",
        EngineRequest::Approve { .. } => "approve",
        EngineRequest::Reject { .. } => "reject",
        EngineRequest::AdminDelete { .. } => "admin delete",
        EngineRequest::VerifyCode { .. } => "verify code",
        EngineRequest::Me => "me",
        EngineRequest::Logout => "logout",
    }
}

pub(crate) fn my_listings_step(effect: MyListingsEffect) -> Step<MyListingsMsg> {
    match effect {
        MyListingsEffect::LoadListings => Step::Request(EngineRequest::LoadMyListings),
        MyListingsEffect::SubmitListing { listing_id } => {
            Step::Request(EngineRequest::SubmitListing { listing_id })
        }
        MyListingsEffect::ArchiveListing { listing_id } => {
            Step::Request(EngineRequest::ArchiveListing { listing_id })
        }
        MyListingsEffect::DeleteListing { listing_id } => {
            Step::Request(EngineRequest::DeleteListing { listing_id })
        }
        MyListingsEffect::PayListing { listing_id } => {
            Step::Request(EngineRequest::CreateListingInvoice { listing_id })
        }
        MyListingsEffect::OpenCheckout { url } => Step::External(External::OpenCheckout { url }),
        MyListingsEffect::OpenWizard { listing_id, step } => Step::External(External::OpenWizard {
            listing_id,
            finish: step == otbozor_core::wizard::WizardStep::Review,
        }),
        MyListingsEffect::StartReactivation { listing_id } => {
            Step::External(External::StartReactivation { listing_id })
        }
    }
}

pub(crate) fn my_listings_msg(event: EngineEvent) -> MyListingsMsg {
    let EngineEvent {
        request, result, ..
    } = event;
    match (request, result) {
        (EngineRequest::LoadMyListings, Ok(EngineReply::MyListings(listings))) => {
            MyListingsMsg::Loaded(listings)
        }
        (EngineRequest::LoadMyListings, Err(err)) => MyListingsMsg::LoadFailed {
            message: err.message,
        },
        (EngineRequest::CreateListingInvoice { listing_id }, Ok(EngineReply::Invoice(invoice))) => {
            MyListingsMsg::CheckoutReady {
                listing_id,
                url: invoice.checkout_url,
            }
        }
        (
            EngineRequest::SubmitListing { listing_id }
            | EngineRequest::ArchiveListing { listing_id }
            | EngineRequest::DeleteListing { listing_id },
            Ok(_),
        ) => MyListingsMsg::ActionSucceeded { listing_id },
        (
            EngineRequest::SubmitListing { listing_id }
            | EngineRequest::ArchiveListing { listing_id }
            | EngineRequest::DeleteListing { listing_id }
            | EngineRequest::CreateListingInvoice { listing_id },
            Err(err),
        ) => MyListingsMsg::ActionFailed {
            listing_id,
            message: err.message,
        },
        _ => MyListingsMsg::NoOp,
    }
}

pub(crate) fn favorites_step(effect: FavoritesEffect) -> Step<FavoritesMsg> {
    match effect {
        FavoritesEffect::LoadFavorites => Step::Request(EngineRequest::LoadFavorites),
        FavoritesEffect::RemoveFavorite { listing_id } => {
            Step::Request(EngineRequest::RemoveFavorite { listing_id })
        }
    }
}

pub(crate) fn favorites_msg(event: EngineEvent) -> FavoritesMsg {
    match (event.request, event.result) {
        (EngineRequest::LoadFavorites, Ok(EngineReply::Favorites(items))) => {
            FavoritesMsg::Loaded(items)
        }
        (EngineRequest::LoadFavorites, Err(err)) => FavoritesMsg::LoadFailed {
            message: err.message,
        },
        (EngineRequest::RemoveFavorite { listing_id }, Err(err)) => FavoritesMsg::RemoveFailed {
            listing_id,
            message: err.message,
        },
        _ => FavoritesMsg::NoOp,
    }
}

pub(crate) fn reactivation_step(effect: ReactivationEffect) -> Step<ReactivationMsg> {
    match effect {
        ReactivationEffect::FetchQuote { listing_id } => {
            Step::Request(EngineRequest::ReactivationQuote { listing_id })
        }
        ReactivationEffect::CreateInvoice { listing_id } => {
            Step::Request(EngineRequest::CreateReactivationInvoice { listing_id })
        }
        ReactivationEffect::OpenCheckout { url } => Step::External(External::OpenCheckout { url }),
    }
}

pub(crate) fn reactivation_msg(event: EngineEvent) -> ReactivationMsg {
    match (event.request, event.result) {
        (_, Ok(EngineReply::Quote(quote))) => ReactivationMsg::QuoteLoaded(quote),
        (_, Ok(EngineReply::Invoice(invoice))) => ReactivationMsg::InvoiceCreated(invoice),
        (EngineRequest::ReactivationQuote { .. }, Err(err)) => ReactivationMsg::QuoteFailed {
            message: err.message,
        },
        (_, Err(err)) => ReactivationMsg::InvoiceFailed {
            message: err.message,
        },
        (_, Ok(_)) => ReactivationMsg::InvoiceFailed {
            message: otbozor_core::FALLBACK_ERROR.to_string(),
        },
    }
}

pub(crate) fn admin_step(effect: AdminEffect) -> Step<AdminMsg> {
    Step::Request(match effect {
        AdminEffect::LoadPage { query } => EngineRequest::AdminPage(query),
        AdminEffect::LoadTabCounts { base } => EngineRequest::AdminTabCounts(base),
        AdminEffect::Approve { listing_id } => EngineRequest::Approve { listing_id },
        AdminEffect::Reject { listing_id, reason } => EngineRequest::Reject { listing_id, reason },
        AdminEffect::Delete { listing_id } => EngineRequest::AdminDelete { listing_id },
    })
}

pub(crate) fn admin_msg(event: EngineEvent) -> AdminMsg {
    match (event.request, event.result) {
        (EngineRequest::AdminPage(query), Ok(EngineReply::AdminPage(page))) => AdminMsg::PageLoaded {
            query,
            rows: page.rows.clone(),
            pagination: page.pagination,
        },
        (EngineRequest::AdminPage(_), Err(err)) => AdminMsg::PageLoadFailed {
            message: err.message,
        },
        (EngineRequest::AdminTabCounts(_), Ok(EngineReply::TabCounts(counts))) => {
            AdminMsg::CountsLoaded(counts)
        }
        (EngineRequest::AdminTabCounts(_), Err(err)) => {
            market_warn!("Tab counts unavailable: {}", err);
            AdminMsg::NoOp
        }
        (
            EngineRequest::Approve { listing_id }
            | EngineRequest::Reject { listing_id, .. }
            | EngineRequest::AdminDelete { listing_id },
            Ok(_),
        ) => AdminMsg::ActionSucceeded { listing_id },
        (_, Err(err)) => AdminMsg::ActionFailed {
            message: err.message,
        },
        _ => AdminMsg::NoOp,
    }
}

pub(crate) fn wizard_step(effect: WizardEffect) -> Step<WizardMsg> {
    match effect {
        WizardEffect::SaveDraft { listing_id, draft } => {
            Step::Request(EngineRequest::SaveDraft { listing_id, draft })
        }
        WizardEffect::Submit {
            listing_id,
            draft,
            media,
        } => Step::Request(EngineRequest::Submit(SubmissionRequest {
            listing_id,
            draft,
            media,
        })),
        WizardEffect::NavigateToPayment { listing_id } => {
            Step::External(External::PayListing { listing_id })
        }
        WizardEffect::NavigateToMyListings => Step::External(External::ShowMyListings),
    }
}

pub(crate) fn wizard_msg(event: EngineEvent) -> WizardMsg {
    match (event.request, event.result) {
        (_, Ok(EngineReply::WizardResources(resources))) => match resources.listing {
            Some(listing) => WizardMsg::Load(Box::new(listing)),
            None => WizardMsg::NoOp,
        },
        (EngineRequest::LoadWizardResources { .. }, Err(err)) => WizardMsg::LoadFailed {
            message: err.message,
        },
        (_, Ok(EngineReply::DraftSaved { listing_id })) => WizardMsg::DraftSaved { listing_id },
        (EngineRequest::SaveDraft { .. }, Err(err)) => WizardMsg::DraftSaveFailed {
            message: err.message,
        },
        (_, Ok(EngineReply::Submission(SubmissionOutcome::Submitted { listing_id }))) => {
            WizardMsg::Submitted { listing_id }
        }
        (_, Ok(EngineReply::Submission(SubmissionOutcome::PaymentRequired { listing_id }))) => {
            WizardMsg::PaymentRequired { listing_id }
        }
        (EngineRequest::Submit(_), Err(err)) => WizardMsg::SubmitFailed {
            message: err.message,
        },
        _ => WizardMsg::NoOp,
    }
}
