use crate::model::{Currency, HorseGender, Listing, ListingDraft, ListingId, LocalMedia};

/// A single edit to the draft form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Title(String),
    Description(String),
    Breed(Option<String>),
    Gender(Option<HorseGender>),
    BirthYear(Option<u16>),
    /// Changing the region clears the district.
    Region(Option<String>),
    District(Option<String>),
    PriceAmount(Option<u64>),
    Currency(Currency),
    Negotiable(bool),
    HasDocuments(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMsg {
    /// Edit mode: populate the form from an existing listing.
    Load(Box<Listing>),
    /// The listing or the reference lists could not be fetched.
    LoadFailed { message: String },
    FieldChanged(DraftField),
    MediaAdded(LocalMedia),
    MediaRemoved { index: usize },
    NextClicked,
    BackClicked,
    /// Server acknowledged the implicit draft save.
    DraftSaved { listing_id: ListingId },
    DraftSaveFailed { message: String },
    SubmitClicked,
    Submitted { listing_id: ListingId },
    /// Backend asked for payment before the listing can go to review.
    PaymentRequired { listing_id: ListingId },
    SubmitFailed { message: String },
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    /// Create the draft when `listing_id` is `None`, update it otherwise.
    SaveDraft {
        listing_id: Option<ListingId>,
        draft: ListingDraft,
    },
    /// Save (if `draft` is present), attach media, then submit for review.
    Submit {
        listing_id: Option<ListingId>,
        draft: Option<ListingDraft>,
        media: Vec<LocalMedia>,
    },
    NavigateToPayment { listing_id: ListingId },
    NavigateToMyListings,
}
