use crate::model::{Listing, ListingDraft, ListingId, LocalMedia, MediaItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    BasicInfo,
    Location,
    PriceFeatures,
    Media,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::BasicInfo,
        WizardStep::Location,
        WizardStep::PriceFeatures,
        WizardStep::Media,
        WizardStep::Review,
    ];

    /// 1-based position shown in the step indicator.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.number()).copied()
    }

    pub fn prev(self) -> Option<Self> {
        (self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Title,
    Breed,
    BirthYear,
    Region,
    District,
    PriceAmount,
    Media,
}

/// Fields that still block leaving `step`.
pub fn missing_fields(step: WizardStep, draft: &ListingDraft, media_count: usize) -> Vec<RequiredField> {
    let mut missing = Vec::new();
    match step {
        WizardStep::BasicInfo => {
            if draft.title.trim().is_empty() {
                missing.push(RequiredField::Title);
            }
            if draft.breed_id.is_none() {
                missing.push(RequiredField::Breed);
            }
            if draft.birth_year.is_none() {
                missing.push(RequiredField::BirthYear);
            }
        }
        WizardStep::Location => {
            if draft.region_id.is_none() {
                missing.push(RequiredField::Region);
            }
            if draft.district_id.is_none() {
                missing.push(RequiredField::District);
            }
        }
        WizardStep::PriceFeatures => {
            if !draft.price_amount.is_some_and(|amount| amount > 0) {
                missing.push(RequiredField::PriceAmount);
            }
        }
        WizardStep::Media => {
            if media_count == 0 {
                missing.push(RequiredField::Media);
            }
        }
        WizardStep::Review => {}
    }
    missing
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardMode {
    #[default]
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlight {
    SavingDraft,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Submitted { listing_id: ListingId },
    PaymentRequired { listing_id: ListingId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    pub(crate) mode: WizardMode,
    pub(crate) step: WizardStep,
    pub(crate) draft: ListingDraft,
    pub(crate) listing_id: Option<ListingId>,
    pub(crate) media: Vec<LocalMedia>,
    pub(crate) existing_media: Vec<MediaItem>,
    /// Draft differs from what the server last saved.
    pub(crate) unsaved: bool,
    pub(crate) in_flight: Option<InFlight>,
    pub(crate) missing: Vec<RequiredField>,
    pub(crate) error: Option<String>,
    pub(crate) outcome: Option<WizardOutcome>,
    dirty: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            unsaved: true,
            ..Self::default()
        }
    }

    pub fn view(&self) -> WizardViewModel {
        WizardViewModel {
            mode: self.mode,
            step: self.step,
            step_number: self.step.number(),
            total_steps: WizardStep::ALL.len(),
            listing_id: self.listing_id.clone(),
            can_go_back: self.step.prev().is_some() && self.in_flight.is_none(),
            saving: self.in_flight == Some(InFlight::SavingDraft),
            submitting: self.in_flight == Some(InFlight::Submitting),
            media_count: self.media.len() + self.existing_media.len(),
            missing: self.missing.clone(),
            error: self.error.clone(),
            outcome: self.outcome.clone(),
            draft: self.draft.clone(),
        }
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub(crate) fn load(&mut self, listing: &Listing) {
        self.mode = WizardMode::Edit;
        self.step = WizardStep::BasicInfo;
        self.draft = ListingDraft::from(listing);
        self.listing_id = Some(listing.id.clone());
        self.existing_media = listing.media.clone();
        self.media.clear();
        self.unsaved = false;
        self.in_flight = None;
        self.missing.clear();
        self.error = None;
        self.outcome = None;
        self.mark_dirty();
    }

    pub(crate) fn media_count(&self) -> usize {
        self.media.len() + self.existing_media.len()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub mode: WizardMode,
    pub step: WizardStep,
    pub step_number: usize,
    pub total_steps: usize,
    pub listing_id: Option<ListingId>,
    pub can_go_back: bool,
    pub saving: bool,
    pub submitting: bool,
    pub media_count: usize,
    pub missing: Vec<RequiredField>,
    pub error: Option<String>,
    pub outcome: Option<WizardOutcome>,
    pub draft: ListingDraft,
}
