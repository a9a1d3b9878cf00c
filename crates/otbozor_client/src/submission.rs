//! The final wizard submission: save, attach media, submit for review.
//!
//! Steps run strictly in order and stop at the first failure. Nothing is
//! rolled back; a draft saved before a later failure stays saved.
use async_trait::async_trait;
use otbozor_core::{Listing, ListingDraft, ListingId, LocalMedia, MediaItem};
use otbozor_logging::{market_debug, market_info};

use crate::client::ApiClient;
use crate::error::{ApiError, ErrorKind};

/// The owner endpoints the submission sequence needs.
#[async_trait]
pub trait ListingDrafts: Send + Sync {
    async fn create_draft(&self, draft: &ListingDraft) -> Result<Listing, ApiError>;
    async fn update_draft(&self, id: &str, draft: &ListingDraft) -> Result<Listing, ApiError>;
    async fn attach(&self, id: &str, media: &[LocalMedia]) -> Result<Vec<MediaItem>, ApiError>;
    async fn submit(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl ListingDrafts for ApiClient {
    async fn create_draft(&self, draft: &ListingDraft) -> Result<Listing, ApiError> {
        self.create_listing_draft(draft).await
    }

    async fn update_draft(&self, id: &str, draft: &ListingDraft) -> Result<Listing, ApiError> {
        self.update_listing_draft(id, draft).await
    }

    async fn attach(&self, id: &str, media: &[LocalMedia]) -> Result<Vec<MediaItem>, ApiError> {
        self.attach_media(id, media).await
    }

    async fn submit(&self, id: &str) -> Result<(), ApiError> {
        self.submit_listing(id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub listing_id: Option<ListingId>,
    /// Present when the form has changes the server has not seen.
    pub draft: Option<ListingDraft>,
    pub media: Vec<LocalMedia>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted { listing_id: ListingId },
    /// The listing exists (and is saved) but has to be paid before review.
    PaymentRequired { listing_id: ListingId },
}

/// Creates or updates the draft and returns the listing id it lives under.
pub async fn save_draft(
    api: &dyn ListingDrafts,
    listing_id: Option<&str>,
    draft: &ListingDraft,
) -> Result<ListingId, ApiError> {
    let saved = match listing_id {
        Some(id) => api.update_draft(id, draft).await?,
        None => api.create_draft(draft).await?,
    };
    market_debug!("Draft saved as {}", saved.id);
    Ok(saved.id)
}

pub async fn run_submission(
    api: &dyn ListingDrafts,
    request: SubmissionRequest,
) -> Result<SubmissionOutcome, ApiError> {
    let SubmissionRequest {
        listing_id,
        draft,
        media,
    } = request;

    let id = match (listing_id, draft) {
        (listing_id, Some(draft)) => {
            match save_draft(api, listing_id.as_deref(), &draft).await {
                Ok(id) => id,
                Err(err) => return payment_or_error(err, listing_id.as_deref()),
            }
        }
        (Some(id), None) => id,
        (None, None) => {
            return Err(ApiError::new(
                ErrorKind::Validation,
                "nothing to submit: no saved listing and no draft",
            ))
        }
    };

    if !media.is_empty() {
        if let Err(err) = api.attach(&id, &media).await {
            return payment_or_error(err, Some(&id));
        }
    }

    match api.submit(&id).await {
        Ok(()) => {
            market_info!("Listing {id} sent to moderation");
            Ok(SubmissionOutcome::Submitted { listing_id: id })
        }
        Err(err) => payment_or_error(err, Some(&id)),
    }
}

fn payment_or_error(err: ApiError, known_id: Option<&str>) -> Result<SubmissionOutcome, ApiError> {
    let err = match known_id {
        Some(id) => err.for_listing(id),
        None => err,
    };
    match err.payment_required_for() {
        Some(listing_id) => {
            market_info!("Listing {listing_id} needs payment before review");
            Ok(SubmissionOutcome::PaymentRequired {
                listing_id: listing_id.clone(),
            })
        }
        None => Err(err),
    }
}
