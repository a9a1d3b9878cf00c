//! Marketplace client IO: the REST client, the admin page cache, the
//! submission sequence and the background engine that runs them.
mod admin;
mod admin_listings;
mod auth;
mod cache;
mod catalog;
mod client;
mod engine;
mod envelope;
mod error;
mod listings;
mod payments;
mod persist;
mod settings;
mod submission;

pub use admin_listings::{AdminListingPage, AdminListingsService, ADMIN_CACHE_TTL};
pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use client::ApiClient;
pub use engine::{
    EngineEvent, EngineHandle, EngineReply, EngineRequest, ScopeId, ViewScope, WizardResources,
};
pub use envelope::Paged;
pub use error::{ApiError, ErrorKind};
pub use listings::ListingSearch;
pub use persist::{ensure_state_dir, read_optional, remove_if_exists, write_atomic, PersistError};
pub use settings::{AuthStrategy, ClientSettings, DEFAULT_API_URL};
pub use submission::{
    run_submission, save_draft, ListingDrafts, SubmissionOutcome, SubmissionRequest,
};
