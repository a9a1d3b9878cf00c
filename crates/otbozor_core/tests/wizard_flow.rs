mod common;

use otbozor_core::wizard::{
    update, DraftField, RequiredField, WizardEffect, WizardMode, WizardMsg, WizardOutcome,
    WizardState, WizardStep,
};
use otbozor_core::{ListingStatus, LocalMedia, MediaKind};
use pretty_assertions::assert_eq;

use common::{init_logging, listing};

fn apply(state: WizardState, msgs: Vec<WizardMsg>) -> (WizardState, Vec<WizardEffect>) {
    let mut effects = Vec::new();
    let mut state = state;
    for msg in msgs {
        let (next, mut produced) = update(state, msg);
        state = next;
        effects.append(&mut produced);
    }
    (state, effects)
}

fn field(f: DraftField) -> WizardMsg {
    WizardMsg::FieldChanged(f)
}

/// Fills steps 1 and 2 and stops on the price step.
fn at_price_step() -> WizardState {
    let (state, effects) = apply(
        WizardState::new(),
        vec![
            field(DraftField::Title("Qorabayir ayg'ir".into())),
            field(DraftField::Breed(Some("b-karabair".into()))),
            field(DraftField::BirthYear(Some(2019))),
            WizardMsg::NextClicked,
            field(DraftField::Region(Some("r-1".into()))),
            field(DraftField::District(Some("d-4".into()))),
            WizardMsg::NextClicked,
        ],
    );
    assert!(effects.is_empty());
    assert_eq!(state.step(), WizardStep::PriceFeatures);
    state
}

#[test]
fn required_fields_gate_the_first_step() {
    init_logging();
    let (state, effects) = update(WizardState::new(), WizardMsg::NextClicked);
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.step, WizardStep::BasicInfo);
    assert_eq!(
        view.missing,
        vec![RequiredField::Title, RequiredField::Breed, RequiredField::BirthYear]
    );
}

#[test]
fn blank_title_does_not_count() {
    let (state, _) = apply(
        WizardState::new(),
        vec![
            field(DraftField::Title("   ".into())),
            field(DraftField::Breed(Some("b".into()))),
            field(DraftField::BirthYear(Some(2020))),
            WizardMsg::NextClicked,
        ],
    );
    assert_eq!(state.step(), WizardStep::BasicInfo);
    assert_eq!(state.view().missing, vec![RequiredField::Title]);
}

#[test]
fn missing_price_never_leaves_step_three() {
    init_logging();
    let state = at_price_step();

    let (state, effects) = apply(
        state,
        vec![WizardMsg::NextClicked, WizardMsg::NextClicked, WizardMsg::SubmitClicked],
    );
    assert!(effects.is_empty());
    assert_eq!(state.step(), WizardStep::PriceFeatures);
    assert_eq!(state.view().missing, vec![RequiredField::PriceAmount]);

    // Zero is not a price either.
    let (state, effects) = apply(
        state,
        vec![field(DraftField::PriceAmount(Some(0))), WizardMsg::NextClicked],
    );
    assert!(effects.is_empty());
    assert_eq!(state.step(), WizardStep::PriceFeatures);
}

#[test]
fn leaving_price_step_saves_draft_before_advancing() {
    init_logging();
    let state = at_price_step();
    let (state, effects) = apply(
        state,
        vec![
            field(DraftField::PriceAmount(Some(60_000_000))),
            WizardMsg::NextClicked,
        ],
    );

    assert_eq!(effects.len(), 1);
    let WizardEffect::SaveDraft { listing_id, draft } = &effects[0] else {
        panic!("expected SaveDraft, got {effects:?}");
    };
    assert_eq!(listing_id, &None);
    assert_eq!(draft.price_amount, Some(60_000_000));
    assert_eq!(state.step(), WizardStep::PriceFeatures);
    assert!(state.view().saving);

    // Clicking again while the save is in flight does nothing.
    let (state, effects) = update(state, WizardMsg::NextClicked);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        WizardMsg::DraftSaved {
            listing_id: "l-42".into(),
        },
    );
    let view = state.view();
    assert_eq!(view.step, WizardStep::Media);
    assert_eq!(view.listing_id.as_deref(), Some("l-42"));
    assert!(!view.saving);
    assert!(!state.has_unsaved_changes());
}

#[test]
fn failed_draft_save_keeps_step_and_reports() {
    let state = at_price_step();
    let (state, _) = apply(
        state,
        vec![
            field(DraftField::PriceAmount(Some(1))),
            WizardMsg::NextClicked,
            WizardMsg::DraftSaveFailed {
                message: "Xatolik yuz berdi".into(),
            },
        ],
    );
    let view = state.view();
    assert_eq!(view.step, WizardStep::PriceFeatures);
    assert_eq!(view.error.as_deref(), Some("Xatolik yuz berdi"));
    assert!(!view.saving);
}

fn at_review_step() -> WizardState {
    let (state, _) = apply(
        at_price_step(),
        vec![
            field(DraftField::PriceAmount(Some(60_000_000))),
            WizardMsg::NextClicked,
            WizardMsg::DraftSaved {
                listing_id: "l-42".into(),
            },
            WizardMsg::MediaAdded(LocalMedia {
                url: "file:///tmp/ot.jpg".into(),
                kind: MediaKind::Image,
            }),
            WizardMsg::NextClicked,
        ],
    );
    assert_eq!(state.step(), WizardStep::Review);
    state
}

#[test]
fn media_step_requires_one_item() {
    let (state, _) = apply(
        at_price_step(),
        vec![
            field(DraftField::PriceAmount(Some(5))),
            WizardMsg::NextClicked,
            WizardMsg::DraftSaved {
                listing_id: "l-1".into(),
            },
            WizardMsg::NextClicked,
        ],
    );
    assert_eq!(state.step(), WizardStep::Media);
    assert_eq!(state.view().missing, vec![RequiredField::Media]);
}

#[test]
fn clean_submit_skips_draft_and_carries_media() {
    let (state, effects) = update(at_review_step(), WizardMsg::SubmitClicked);
    assert_eq!(
        effects,
        vec![WizardEffect::Submit {
            listing_id: Some("l-42".into()),
            draft: None,
            media: vec![LocalMedia {
                url: "file:///tmp/ot.jpg".into(),
                kind: MediaKind::Image,
            }],
        }]
    );
    assert!(state.view().submitting);

    let (state, effects) = update(
        state,
        WizardMsg::Submitted {
            listing_id: "l-42".into(),
        },
    );
    assert_eq!(effects, vec![WizardEffect::NavigateToMyListings]);
    assert_eq!(
        state.view().outcome,
        Some(WizardOutcome::Submitted {
            listing_id: "l-42".into()
        })
    );
}

#[test]
fn edits_after_save_resend_the_draft() {
    let (state, effects) = apply(
        at_review_step(),
        vec![
            field(DraftField::Description("Yaxshi ot".into())),
            WizardMsg::SubmitClicked,
        ],
    );
    let [WizardEffect::Submit { draft, .. }] = effects.as_slice() else {
        panic!("expected one Submit, got {effects:?}");
    };
    assert_eq!(draft.as_ref().map(|d| d.description.as_str()), Some("Yaxshi ot"));
    assert!(state.view().submitting);
}

#[test]
fn payment_required_redirects_with_listing_id() {
    let (state, _) = update(at_review_step(), WizardMsg::SubmitClicked);
    let (state, effects) = update(
        state,
        WizardMsg::PaymentRequired {
            listing_id: "l-42".into(),
        },
    );
    assert_eq!(
        effects,
        vec![WizardEffect::NavigateToPayment {
            listing_id: "l-42".into()
        }]
    );
    assert_eq!(
        state.view().outcome,
        Some(WizardOutcome::PaymentRequired {
            listing_id: "l-42".into()
        })
    );
}

#[test]
fn submit_failure_allows_manual_retry() {
    let (state, _) = update(at_review_step(), WizardMsg::SubmitClicked);
    let (state, _) = update(
        state,
        WizardMsg::SubmitFailed {
            message: "Server xatosi".into(),
        },
    );
    assert_eq!(state.view().error.as_deref(), Some("Server xatosi"));
    let (_, effects) = update(state, WizardMsg::SubmitClicked);
    assert_eq!(effects.len(), 1);
}

#[test]
fn back_never_validates_and_stops_at_first_step() {
    let (state, _) = apply(
        at_price_step(),
        vec![
            WizardMsg::BackClicked,
            WizardMsg::BackClicked,
            WizardMsg::BackClicked,
        ],
    );
    assert_eq!(state.step(), WizardStep::BasicInfo);
    assert!(!state.view().can_go_back);
}

#[test]
fn changing_region_clears_district() {
    let (state, _) = apply(
        at_price_step(),
        vec![field(DraftField::Region(Some("r-2".into())))],
    );
    assert_eq!(state.draft().district_id, None);
}

#[test]
fn edit_mode_loads_listing_and_skips_redundant_save() {
    let mut existing = listing("l-7", ListingStatus::Rejected, true);
    existing.breed = Some(otbozor_core::NamedRef {
        id: "b-1".into(),
        name: "Axaltaka".into(),
        slug: None,
    });
    existing.birth_year = Some(2018);
    existing.district = Some(otbozor_core::NamedRef {
        id: "d-1".into(),
        name: "Urgut".into(),
        slug: None,
    });
    existing.media = vec![otbozor_core::MediaItem {
        id: "m-1".into(),
        url: "https://cdn.example/m-1.jpg".into(),
        kind: MediaKind::Image,
        sort_order: 0,
    }];

    let (state, effects) = apply(
        WizardState::new(),
        vec![
            WizardMsg::Load(Box::new(existing)),
            WizardMsg::NextClicked,
            WizardMsg::NextClicked,
            WizardMsg::NextClicked,
            WizardMsg::NextClicked,
        ],
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.mode, WizardMode::Edit);
    assert_eq!(view.step, WizardStep::Review);
    assert_eq!(view.media_count, 1);
}

#[test]
fn failed_resource_load_is_reported_in_any_state() {
    let (state, effects) = update(
        WizardState::new(),
        WizardMsg::LoadFailed {
            message: "Tarmoq xatosi".into(),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("Tarmoq xatosi"));
    assert_eq!(view.step, WizardStep::BasicInfo);
    assert_eq!(view.listing_id, None);
}
