//! Background IO engine.
//!
//! A tokio runtime lives on its own thread. The UI side sends requests over
//! a channel and polls events back, so the core state machines never await.
//! Every request belongs to a [`ViewScope`]; dropping the scope aborts its
//! requests and no event is published for them.
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use futures_util::future::try_join3;
use otbozor_core::admin::{AdminListingQuery, AdminTab};
use otbozor_core::{
    AuthSession, Breed, District, Invoice, Listing, ListingDraft, ListingId, Product, ReactivationQuote,
    Region, User,
};
use otbozor_logging::{market_debug, market_error};
use tokio_util::sync::CancellationToken;

use crate::admin_listings::{AdminListingPage, AdminListingsService};
use crate::client::ApiClient;
use crate::envelope::Paged;
use crate::error::ApiError;
use crate::listings::ListingSearch;
use crate::settings::AuthStrategy;
use crate::submission::{run_submission, save_draft, SubmissionOutcome, SubmissionRequest};

pub type ScopeId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineRequest {
    Browse(ListingSearch),
    LoadMyListings,
    LoadMyProducts,
    LoadFavorites,
    AddFavorite { listing_id: ListingId },
    RemoveFavorite { listing_id: ListingId },
    /// Regions, breeds and (in edit mode) the listing, loaded together.
    LoadWizardResources { listing_id: Option<ListingId> },
    LoadDistricts { region_id: String },
    SaveDraft {
        listing_id: Option<ListingId>,
        draft: ListingDraft,
    },
    Submit(SubmissionRequest),
    SubmitListing { listing_id: ListingId },
    ArchiveListing { listing_id: ListingId },
    DeleteListing { listing_id: ListingId },
    CreateListingInvoice { listing_id: ListingId },
    ReactivationQuote { listing_id: ListingId },
    CreateReactivationInvoice { listing_id: ListingId },
    AdminPage(AdminListingQuery),
    AdminTabCounts(AdminListingQuery),
    Approve { listing_id: ListingId },
    Reject { listing_id: ListingId, reason: String },
    AdminDelete { listing_id: ListingId },
    VerifyCode { code: String },
    Me,
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardResources {
    pub regions: Vec<Region>,
    pub breeds: Vec<Breed>,
    pub listing: Option<Listing>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineReply {
    Listings(Paged<Listing>),
    MyListings(Vec<Listing>),
    MyProducts(Vec<Product>),
    Favorites(Vec<Listing>),
    WizardResources(Box<WizardResources>),
    Districts(Vec<District>),
    DraftSaved { listing_id: ListingId },
    Submission(SubmissionOutcome),
    Quote(ReactivationQuote),
    Invoice(Invoice),
    AdminPage(Arc<AdminListingPage>),
    TabCounts(Vec<(AdminTab, u64)>),
    Session(AuthSession),
    CurrentUser(User),
    /// The request succeeded and had nothing to return.
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub scope: ScopeId,
    pub request: EngineRequest,
    pub result: Result<EngineReply, ApiError>,
}

/// Lifetime of one screen's requests. Dropping it cancels them.
#[derive(Debug)]
pub struct ViewScope {
    id: ScopeId,
    token: CancellationToken,
}

impl ViewScope {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Same as dropping the scope.
    pub fn close(self) {}
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

enum EngineCommand {
    Run {
        scope: ScopeId,
        token: CancellationToken,
        request: EngineRequest,
    },
    SetAuth(AuthStrategy),
}

#[derive(Debug)]
struct Services {
    api: ApiClient,
    admin: AdminListingsService,
}

/// Counts a spawned request as pending until the task ends, even by panic.
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    next_scope: Arc<AtomicU64>,
    pending: Arc<AtomicUsize>,
}

impl EngineHandle {
    pub fn new(api: ApiClient) -> std::io::Result<Self> {
        let admin = AdminListingsService::new(api.clone());
        Self::with_services(api, admin)
    }

    /// Lets the caller supply the admin service, e.g. one with a manual clock.
    pub fn with_services(api: ApiClient, admin: AdminListingsService) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("otbozor-engine")
            .build()?;

        let task_pending = pending.clone();
        thread::Builder::new()
            .name("otbozor-engine-loop".into())
            .spawn(move || {
                let mut services = Arc::new(Services { api, admin });
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::SetAuth(auth) => {
                            let api = services.api.with_auth(auth);
                            let admin = AdminListingsService::new(api.clone());
                            services = Arc::new(Services { api, admin });
                        }
                        EngineCommand::Run {
                            scope,
                            token,
                            request,
                        } => {
                            let services = services.clone();
                            let event_tx = event_tx.clone();
                            let guard = PendingGuard(task_pending.clone());
                            runtime.spawn(async move {
                                let _guard = guard;
                                run_scoped(&services, scope, token, request, &event_tx).await;
                            });
                        }
                    }
                }
                market_debug!("Engine command channel closed; shutting down");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            next_scope: Arc::new(AtomicU64::new(1)),
            pending,
        })
    }

    pub fn open_scope(&self) -> ViewScope {
        ViewScope {
            id: self.next_scope.fetch_add(1, Ordering::SeqCst),
            token: CancellationToken::new(),
        }
    }

    pub fn dispatch(&self, scope: &ViewScope, request: EngineRequest) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        let command = EngineCommand::Run {
            scope: scope.id,
            token: scope.token.clone(),
            request,
        };
        if self.cmd_tx.send(command).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            market_error!("Engine thread is gone; request dropped");
        }
    }

    /// Requests dispatched after this use `auth`. Cached admin pages are dropped.
    pub fn set_auth(&self, auth: AuthStrategy) {
        let _ = self.cmd_tx.send(EngineCommand::SetAuth(auth));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.receiver().try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.receiver().recv_timeout(timeout).ok()
    }

    /// No request is running or queued. Events may still wait in the channel.
    pub fn is_idle(&self) -> bool {
        self.pending.load(Ordering::SeqCst) == 0
    }

    fn receiver(&self) -> std::sync::MutexGuard<'_, mpsc::Receiver<EngineEvent>> {
        self.event_rx.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn run_scoped(
    services: &Services,
    scope: ScopeId,
    token: CancellationToken,
    request: EngineRequest,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let result = tokio::select! {
        _ = token.cancelled() => None,
        result = handle_request(services, &request) => Some(result),
    };
    match result {
        Some(result) if !token.is_cancelled() => {
            let _ = event_tx.send(EngineEvent {
                scope,
                request,
                result,
            });
        }
        _ => market_debug!("Scope {scope} closed; result dropped"),
    }
}

async fn handle_request(
    services: &Services,
    request: &EngineRequest,
) -> Result<EngineReply, ApiError> {
    let api = &services.api;
    let admin = &services.admin;
    match request {
        EngineRequest::Browse(search) => api.listings(search).await.map(EngineReply::Listings),
        EngineRequest::LoadMyListings => api.my_listings().await.map(EngineReply::MyListings),
        EngineRequest::LoadMyProducts => api.my_products().await.map(EngineReply::MyProducts),
        EngineRequest::LoadFavorites => api.favorites().await.map(EngineReply::Favorites),
        EngineRequest::AddFavorite { listing_id } => {
            api.add_favorite(listing_id).await.map(|()| EngineReply::Done)
        }
        EngineRequest::RemoveFavorite { listing_id } => {
            api.remove_favorite(listing_id).await.map(|()| EngineReply::Done)
        }
        EngineRequest::LoadWizardResources { listing_id } => {
            let listing = async {
                match listing_id {
                    Some(id) => api.my_listing(id).await.map(Some),
                    None => Ok(None),
                }
            };
            let (regions, breeds, listing) =
                try_join3(api.regions(), api.breeds(), listing).await?;
            Ok(EngineReply::WizardResources(Box::new(WizardResources {
                regions,
                breeds,
                listing,
            })))
        }
        EngineRequest::LoadDistricts { region_id } => {
            api.districts(region_id).await.map(EngineReply::Districts)
        }
        EngineRequest::SaveDraft { listing_id, draft } => {
            save_draft(api, listing_id.as_deref(), draft)
                .await
                .map(|listing_id| EngineReply::DraftSaved { listing_id })
        }
        EngineRequest::Submit(submission) => run_submission(api, submission.clone())
            .await
            .map(EngineReply::Submission),
        EngineRequest::SubmitListing { listing_id } => api
            .submit_listing(listing_id)
            .await
            .map(|()| EngineReply::Done),
        EngineRequest::ArchiveListing { listing_id } => api
            .archive_my_listing(listing_id)
            .await
            .map(|()| EngineReply::Done),
        EngineRequest::DeleteListing { listing_id } => api
            .delete_my_listing(listing_id)
            .await
            .map(|()| EngineReply::Done),
        EngineRequest::CreateListingInvoice { listing_id } => api
            .create_listing_invoice(listing_id)
            .await
            .map(EngineReply::Invoice),
        EngineRequest::ReactivationQuote { listing_id } => api
            .reactivation_quote(listing_id)
            .await
            .map(EngineReply::Quote),
        EngineRequest::CreateReactivationInvoice { listing_id } => api
            .create_reactivation_invoice(listing_id)
            .await
            .map(EngineReply::Invoice),
        EngineRequest::AdminPage(query) => admin.page(query).await.map(EngineReply::AdminPage),
        EngineRequest::AdminTabCounts(base) => {
            admin.tab_counts(base).await.map(EngineReply::TabCounts)
        }
        EngineRequest::Approve { listing_id } => {
            admin.approve(listing_id).await.map(|()| EngineReply::Done)
        }
        EngineRequest::Reject { listing_id, reason } => admin
            .reject(listing_id, reason)
            .await
            .map(|()| EngineReply::Done),
        EngineRequest::AdminDelete { listing_id } => {
            admin.delete(listing_id).await.map(|()| EngineReply::Done)
        }
        EngineRequest::VerifyCode { code } => {
            api.verify_telegram_code(code).await.map(EngineReply::Session)
        }
        EngineRequest::Me => api.me().await.map(EngineReply::CurrentUser),
        EngineRequest::Logout => api.logout().await.map(|()| EngineReply::Done),
    }
}
