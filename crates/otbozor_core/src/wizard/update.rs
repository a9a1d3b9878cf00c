use super::msg::{DraftField, WizardEffect, WizardMsg};
use super::state::{missing_fields, InFlight, WizardOutcome, WizardState, WizardStep};

/// Pure update function for the listing wizard.
pub fn update(mut state: WizardState, msg: WizardMsg) -> (WizardState, Vec<WizardEffect>) {
    let effects = match msg {
        WizardMsg::Load(listing) => {
            state.load(&listing);
            Vec::new()
        }
        WizardMsg::LoadFailed { message } => {
            state.error = Some(message);
            state.mark_dirty();
            Vec::new()
        }
        WizardMsg::FieldChanged(field) => {
            if state.in_flight.is_some() {
                return (state, Vec::new());
            }
            apply_field(&mut state, field);
            state.unsaved = true;
            state.error = None;
            let missing = missing_fields(state.step, &state.draft, state.media_count());
            state.missing.retain(|field| missing.contains(field));
            state.mark_dirty();
            Vec::new()
        }
        WizardMsg::MediaAdded(media) => {
            if state.in_flight.is_some() {
                return (state, Vec::new());
            }
            state.media.push(media);
            state.missing.clear();
            state.mark_dirty();
            Vec::new()
        }
        WizardMsg::MediaRemoved { index } => {
            if state.in_flight.is_some() || index >= state.media.len() {
                return (state, Vec::new());
            }
            state.media.remove(index);
            state.mark_dirty();
            Vec::new()
        }
        WizardMsg::NextClicked => next_clicked(&mut state),
        WizardMsg::BackClicked => {
            if state.in_flight.is_none() {
                if let Some(prev) = state.step.prev() {
                    state.step = prev;
                    state.missing.clear();
                    state.error = None;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        WizardMsg::DraftSaved { listing_id } => {
            if state.in_flight != Some(InFlight::SavingDraft) {
                return (state, Vec::new());
            }
            state.in_flight = None;
            state.listing_id = Some(listing_id);
            state.unsaved = false;
            if let Some(next) = state.step.next() {
                state.step = next;
            }
            state.mark_dirty();
            Vec::new()
        }
        WizardMsg::DraftSaveFailed { message } => {
            if state.in_flight != Some(InFlight::SavingDraft) {
                return (state, Vec::new());
            }
            state.in_flight = None;
            state.error = Some(message);
            state.mark_dirty();
            Vec::new()
        }
        WizardMsg::SubmitClicked => submit_clicked(&mut state),
        WizardMsg::Submitted { listing_id } => {
            if state.in_flight != Some(InFlight::Submitting) {
                return (state, Vec::new());
            }
            state.in_flight = None;
            state.unsaved = false;
            state.listing_id = Some(listing_id.clone());
            state.outcome = Some(WizardOutcome::Submitted { listing_id });
            state.mark_dirty();
            vec![WizardEffect::NavigateToMyListings]
        }
        WizardMsg::PaymentRequired { listing_id } => {
            if state.in_flight != Some(InFlight::Submitting) {
                return (state, Vec::new());
            }
            // The draft and media made it to the server before payment was asked for.
            state.in_flight = None;
            state.unsaved = false;
            state.media.clear();
            state.listing_id = Some(listing_id.clone());
            state.outcome = Some(WizardOutcome::PaymentRequired {
                listing_id: listing_id.clone(),
            });
            state.mark_dirty();
            vec![WizardEffect::NavigateToPayment { listing_id }]
        }
        WizardMsg::SubmitFailed { message } => {
            if state.in_flight != Some(InFlight::Submitting) {
                return (state, Vec::new());
            }
            state.in_flight = None;
            state.error = Some(message);
            state.mark_dirty();
            Vec::new()
        }
        WizardMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn next_clicked(state: &mut WizardState) -> Vec<WizardEffect> {
    if state.in_flight.is_some() || state.step == WizardStep::Review {
        return Vec::new();
    }
    let missing = missing_fields(state.step, &state.draft, state.media_count());
    if !missing.is_empty() {
        state.missing = missing;
        state.mark_dirty();
        return Vec::new();
    }
    state.missing.clear();
    state.error = None;
    state.mark_dirty();

    if state.step == WizardStep::PriceFeatures && (state.unsaved || state.listing_id.is_none()) {
        state.in_flight = Some(InFlight::SavingDraft);
        return vec![WizardEffect::SaveDraft {
            listing_id: state.listing_id.clone(),
            draft: state.draft.clone(),
        }];
    }

    if let Some(next) = state.step.next() {
        state.step = next;
    }
    Vec::new()
}

fn submit_clicked(state: &mut WizardState) -> Vec<WizardEffect> {
    if state.in_flight.is_some() || state.step != WizardStep::Review {
        return Vec::new();
    }
    let media_count = state.media_count();
    let blocking = WizardStep::ALL
        .into_iter()
        .map(|step| (step, missing_fields(step, &state.draft, media_count)))
        .find(|(_, missing)| !missing.is_empty());
    if let Some((step, missing)) = blocking {
        state.step = step;
        state.missing = missing;
        state.mark_dirty();
        return Vec::new();
    }

    state.in_flight = Some(InFlight::Submitting);
    state.error = None;
    state.mark_dirty();
    let draft = (state.unsaved || state.listing_id.is_none()).then(|| state.draft.clone());
    vec![WizardEffect::Submit {
        listing_id: state.listing_id.clone(),
        draft,
        media: state.media.clone(),
    }]
}

fn apply_field(state: &mut WizardState, field: DraftField) {
    let draft = &mut state.draft;
    match field {
        DraftField::Title(title) => draft.title = title,
        DraftField::Description(text) => draft.description = text,
        DraftField::Breed(id) => draft.breed_id = id,
        DraftField::Gender(gender) => draft.gender = gender,
        DraftField::BirthYear(year) => draft.birth_year = year,
        DraftField::Region(id) => {
            if draft.region_id != id {
                draft.district_id = None;
            }
            draft.region_id = id;
        }
        DraftField::District(id) => draft.district_id = id,
        DraftField::PriceAmount(amount) => draft.price_amount = amount,
        DraftField::Currency(currency) => draft.currency = currency,
        DraftField::Negotiable(flag) => draft.is_negotiable = flag,
        DraftField::HasDocuments(flag) => draft.has_documents = flag,
    }
}
