use otbozor_core::reactivation::{
    update, ReactivationEffect, ReactivationMsg, ReactivationPhase, ReactivationState,
};
use otbozor_core::{Currency, Invoice, ReactivationQuote, FALLBACK_ERROR};
use pretty_assertions::assert_eq;

fn quote(listing_id: &str) -> ReactivationQuote {
    ReactivationQuote {
        listing_id: listing_id.into(),
        amount: 50_000,
        currency: Currency::Uzs,
        duration_days: 30,
    }
}

fn confirming() -> ReactivationState {
    let (state, effects) = update(
        ReactivationState::new(),
        ReactivationMsg::ReactivateClicked {
            listing_id: "l-9".into(),
        },
    );
    assert_eq!(
        effects,
        vec![ReactivationEffect::FetchQuote {
            listing_id: "l-9".into()
        }]
    );
    let (state, _) = update(state, ReactivationMsg::QuoteLoaded(quote("l-9")));
    state
}

#[test]
fn quote_opens_confirmation_modal() {
    let view = confirming().view();
    assert!(view.modal_open);
    assert!(view.confirm_enabled);
    assert_eq!(view.price.as_deref(), Some("50 000 so'm"));
    assert_eq!(view.duration_days, Some(30));
}

#[test]
fn confirm_creates_invoice_then_opens_checkout() {
    let (state, effects) = update(confirming(), ReactivationMsg::ConfirmClicked);
    assert_eq!(
        effects,
        vec![ReactivationEffect::CreateInvoice {
            listing_id: "l-9".into()
        }]
    );
    assert!(!state.view().confirm_enabled);

    let (state, effects) = update(
        state,
        ReactivationMsg::InvoiceCreated(Invoice {
            payment_id: "p-1".into(),
            checkout_url: "https://pay.example/checkout/p-1".into(),
        }),
    );
    assert_eq!(
        effects,
        vec![ReactivationEffect::OpenCheckout {
            url: "https://pay.example/checkout/p-1".into()
        }]
    );
    assert!(matches!(state.phase(), ReactivationPhase::Redirecting { .. }));
}

#[test]
fn double_confirm_issues_one_invoice_request() {
    let (state, first) = update(confirming(), ReactivationMsg::ConfirmClicked);
    let (_, second) = update(state, ReactivationMsg::ConfirmClicked);
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn quote_for_another_listing_fails_the_request() {
    let (state, _) = update(
        ReactivationState::new(),
        ReactivationMsg::ReactivateClicked {
            listing_id: "l-1".into(),
        },
    );
    let (state, effects) = update(state, ReactivationMsg::QuoteLoaded(quote("l-2")));
    assert!(effects.is_empty());
    assert_eq!(state.phase(), &ReactivationPhase::Idle);
    let view = state.view();
    assert!(!view.modal_open);
    assert!(!view.confirm_enabled);
    assert_eq!(view.error.as_deref(), Some(FALLBACK_ERROR));
}

#[test]
fn cancel_closes_modal_and_invoice_failure_returns_to_it() {
    let (state, _) = update(confirming(), ReactivationMsg::CancelClicked);
    assert_eq!(state.phase(), &ReactivationPhase::Idle);

    let (state, _) = update(confirming(), ReactivationMsg::ConfirmClicked);
    let (state, _) = update(
        state,
        ReactivationMsg::InvoiceFailed {
            message: "To'lov tizimi javob bermadi".into(),
        },
    );
    let view = state.view();
    assert!(view.modal_open);
    assert!(view.confirm_enabled);
    assert_eq!(view.error.as_deref(), Some("To'lov tizimi javob bermadi"));
}
