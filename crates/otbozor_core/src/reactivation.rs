//! Reactivation of an expired listing: quote, confirm, then hand off to checkout.
use crate::model::{Invoice, ListingId, ReactivationQuote};
use crate::view_model::{format_price, FALLBACK_ERROR};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReactivationPhase {
    #[default]
    Idle,
    LoadingQuote { listing_id: ListingId },
    Confirming { quote: ReactivationQuote },
    CreatingInvoice { quote: ReactivationQuote },
    Redirecting { checkout_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactivationMsg {
    ReactivateClicked { listing_id: ListingId },
    QuoteLoaded(ReactivationQuote),
    QuoteFailed { message: String },
    ConfirmClicked,
    CancelClicked,
    InvoiceCreated(Invoice),
    InvoiceFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactivationEffect {
    FetchQuote { listing_id: ListingId },
    CreateInvoice { listing_id: ListingId },
    OpenCheckout { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReactivationState {
    phase: ReactivationPhase,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactivationViewModel {
    pub modal_open: bool,
    pub price: Option<String>,
    pub duration_days: Option<u32>,
    pub confirm_enabled: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl ReactivationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ReactivationPhase {
        &self.phase
    }

    pub fn view(&self) -> ReactivationViewModel {
        let quote = match &self.phase {
            ReactivationPhase::Confirming { quote } | ReactivationPhase::CreatingInvoice { quote } => {
                Some(quote)
            }
            _ => None,
        };
        ReactivationViewModel {
            modal_open: quote.is_some(),
            price: quote.map(|q| format_price(Some(q.amount), q.currency)),
            duration_days: quote.map(|q| q.duration_days),
            confirm_enabled: matches!(self.phase, ReactivationPhase::Confirming { .. }),
            loading: matches!(
                self.phase,
                ReactivationPhase::LoadingQuote { .. } | ReactivationPhase::CreatingInvoice { .. }
            ),
            error: self.error.clone(),
        }
    }
}

pub fn update(
    mut state: ReactivationState,
    msg: ReactivationMsg,
) -> (ReactivationState, Vec<ReactivationEffect>) {
    let phase = std::mem::take(&mut state.phase);
    let (phase, effects) = match (msg, phase) {
        (ReactivationMsg::ReactivateClicked { listing_id }, ReactivationPhase::Idle) => {
            state.error = None;
            (
                ReactivationPhase::LoadingQuote {
                    listing_id: listing_id.clone(),
                },
                vec![ReactivationEffect::FetchQuote { listing_id }],
            )
        }
        (ReactivationMsg::QuoteLoaded(quote), ReactivationPhase::LoadingQuote { listing_id })
            if quote.listing_id == listing_id =>
        {
            (ReactivationPhase::Confirming { quote }, Vec::new())
        }
        // A quote for some other listing cannot be confirmed.
        (ReactivationMsg::QuoteLoaded(_), ReactivationPhase::LoadingQuote { .. }) => {
            state.error = Some(FALLBACK_ERROR.to_string());
            (ReactivationPhase::Idle, Vec::new())
        }
        (ReactivationMsg::QuoteFailed { message }, ReactivationPhase::LoadingQuote { .. }) => {
            state.error = Some(message);
            (ReactivationPhase::Idle, Vec::new())
        }
        (ReactivationMsg::ConfirmClicked, ReactivationPhase::Confirming { quote }) => {
            let listing_id = quote.listing_id.clone();
            (
                ReactivationPhase::CreatingInvoice { quote },
                vec![ReactivationEffect::CreateInvoice { listing_id }],
            )
        }
        (ReactivationMsg::CancelClicked, ReactivationPhase::Confirming { .. }) => {
            (ReactivationPhase::Idle, Vec::new())
        }
        (ReactivationMsg::InvoiceCreated(invoice), ReactivationPhase::CreatingInvoice { .. }) => {
            let url = invoice.checkout_url;
            (
                ReactivationPhase::Redirecting {
                    checkout_url: url.clone(),
                },
                vec![ReactivationEffect::OpenCheckout { url }],
            )
        }
        (ReactivationMsg::InvoiceFailed { message }, ReactivationPhase::CreatingInvoice { quote }) => {
            state.error = Some(message);
            (ReactivationPhase::Confirming { quote }, Vec::new())
        }
        // Anything else, including a second confirm while the invoice is pending.
        (_, phase) => (phase, Vec::new()),
    };
    state.phase = phase;

    (state, effects)
}
