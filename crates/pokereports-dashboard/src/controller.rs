//! The page controller: owns the dashboard state and sequences calls to
//! the report directory, the link probe and the download hand-off.
//!
//! All methods take `&self`. State lives behind one async mutex that is
//! only held to read or transition state, never across a network call, so
//! the in-flight guards are real: a second `submit_create` issued while
//! the first is awaiting the API sees `Creating` and is refused.
//!
//! Nothing here retries on its own. Every retry is a user action
//! (`refresh`, `recover_from_auth_error`).

use std::sync::Arc;

use pokereports_client::{ClientError, LinkProbe, ReportDirectory};
use pokereports_core::{Report, ReportId, SortDirection};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::categories::CategorySource;
use crate::handoff::DownloadHandoff;
use crate::input::InvalidCount;
use crate::notify::{Notification, Notifier};
use crate::state::{CreateState, LoadState, Modal, PageState};

pub const TYPES_LOAD_ERROR: &str = "Error loading Pokémon types. Please try again later.";
pub const REPORTS_LOAD_ERROR: &str = "Error loading reports. Please try again later.";
pub const CREATE_FAILED: &str = "Could not create the report. Please try again.";
pub const REFRESH_OK: &str = "Reports refreshed successfully";
pub const REFRESH_FAILED: &str = "Could not refresh the reports. Please try again.";
pub const DOWNLOAD_URL_MISSING: &str = "Download URL not available";
pub const DOWNLOAD_FAILED: &str = "Error downloading the report";
pub const DELETE_ID_MISSING: &str = "No id available to delete";

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{0}")]
    Validation(String),

    #[error("a {0} is already in progress")]
    Busy(&'static str),

    #[error("report {0} is not completed yet")]
    NotCompleted(String),

    #[error("delete task failed: {0}")]
    Task(String),
}

impl From<InvalidCount> for ControllerError {
    fn from(e: InvalidCount) -> Self {
        ControllerError::Validation(e.to_string())
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Guard failed: missing selection or something already in flight.
    Refused,
    /// The API accepted the request; carries its response body.
    Created(Value),
    Failed(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Only completed reports can be downloaded.
    Refused,
    Unavailable,
    HandedOff,
    /// The link was rejected as expired; the auth-error dialog is open.
    AuthError,
    Failed,
}

/// A delete request that has been sent but not necessarily finished.
///
/// The controller does not wait for it and does not touch the report list;
/// the deletion shows up on the next explicit reload.
#[derive(Debug)]
pub struct PendingDelete {
    id: ReportId,
    handle: JoinHandle<Result<Value, ClientError>>,
}

impl PendingDelete {
    pub fn id(&self) -> &ReportId {
        &self.id
    }

    /// Wait for the API's answer to the delete request.
    pub async fn outcome(self) -> Result<Value, ControllerError> {
        match self.handle.await {
            Ok(result) => result.map_err(ControllerError::from),
            Err(e) => Err(ControllerError::Task(e.to_string())),
        }
    }
}

pub struct PageController {
    directory: Arc<dyn ReportDirectory>,
    categories: Arc<dyn CategorySource>,
    probe: Arc<dyn LinkProbe>,
    handoff: Arc<dyn DownloadHandoff>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<PageState>,
}

impl PageController {
    pub fn new(
        directory: Arc<dyn ReportDirectory>,
        categories: Arc<dyn CategorySource>,
        probe: Arc<dyn LinkProbe>,
        handoff: Arc<dyn DownloadHandoff>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            directory,
            categories,
            probe,
            handoff,
            notifier,
            state: Mutex::new(PageState::default()),
        }
    }

    /// A copy of the current state, for rendering.
    pub async fn snapshot(&self) -> PageState {
        self.state.lock().await.clone()
    }

    async fn update<R>(&self, f: impl FnOnce(&mut PageState) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state)
    }

    // ── Mount ────────────────────────────────────────────────────────────

    /// Load the category list and the report list concurrently. Either may
    /// fail without affecting the other.
    pub async fn mount(&self) {
        self.update(|s| {
            s.types_load = LoadState::Loading;
            s.reports_load = LoadState::Loading;
            s.error = None;
        })
        .await;

        let (types, reports) =
            tokio::join!(self.categories.categories(), self.directory.list_reports());

        self.update(|s| {
            match types {
                Ok(categories) => {
                    info!(count = categories.len(), "categories loaded");
                    s.categories = categories;
                    s.types_load = LoadState::Loaded;
                }
                Err(reason) => {
                    warn!(%reason, "loading categories failed");
                    s.types_load = LoadState::Failed(reason);
                    s.error = Some(TYPES_LOAD_ERROR.to_string());
                }
            }
            // Failure is recorded on the state; mount has no caller to tell.
            let _ = apply_report_load(s, reports);
        })
        .await;
    }

    // ── Report list ──────────────────────────────────────────────────────

    /// Re-fetch the report list. Refused while another reload is in flight.
    ///
    /// On failure the banner is set and the previously loaded list stays.
    pub async fn load_reports(&self) -> Result<(), ControllerError> {
        let started = self.update(begin_reload).await;
        if !started {
            return Err(ControllerError::Busy("report reload"));
        }
        self.fetch_reports().await
    }

    async fn fetch_reports(&self) -> Result<(), ControllerError> {
        let result = self.directory.list_reports().await;
        self.update(|s| apply_report_load(s, result)).await
    }

    /// User-initiated reload with success/failure notifications. The error
    /// is returned as well, so a retry affordance can react to it.
    pub async fn refresh(&self) -> Result<(), ControllerError> {
        let started = self.update(begin_refresh).await;
        if !started {
            return Err(ControllerError::Busy("refresh"));
        }
        self.finish_refresh().await
    }

    async fn finish_refresh(&self) -> Result<(), ControllerError> {
        let result = self.fetch_reports().await;
        self.update(|s| s.refreshing = false).await;

        match &result {
            Ok(()) => self.notifier.notify(Notification::success(REFRESH_OK)),
            Err(_) => self.notifier.notify(Notification::error(REFRESH_FAILED)),
        }
        result
    }

    pub async fn set_sort(&self, direction: SortDirection) {
        self.update(|s| s.set_sort(direction)).await;
    }

    pub async fn toggle_sort(&self) {
        self.update(|s| {
            let direction = s.sort.toggled();
            s.set_sort(direction);
        })
        .await;
    }

    // ── Report creation ──────────────────────────────────────────────────

    /// Choose the category filter. Must be one of the loaded categories
    /// (compared ignoring case); the stored value uses the list's spelling.
    pub async fn select_type(&self, pokemon_type: &str) -> Result<(), ControllerError> {
        self.update(|s| {
            if s.types_load != LoadState::Loaded {
                return Err(ControllerError::Validation(
                    "Pokémon types are not loaded".to_string(),
                ));
            }
            let Some(found) = s
                .categories
                .iter()
                .find(|c| c.eq_ignore_ascii_case(pokemon_type))
            else {
                return Err(ControllerError::Validation(format!(
                    "unknown Pokémon type: {pokemon_type}"
                )));
            };
            s.selected_type = Some(found.clone());
            Ok(())
        })
        .await
    }

    /// Edit the record-count field. A rejected edit keeps the old value and
    /// sets the inline message.
    pub async fn select_count(&self, input: &str) -> Result<(), ControllerError> {
        self.update(|s| s.count.set(input)).await?;
        Ok(())
    }

    /// Ask the API for a new report, then reload the list.
    pub async fn submit_create(&self) -> SubmitOutcome {
        let pokemon_type = self
            .update(|s| {
                if !s.can_submit() {
                    return None;
                }
                s.create = CreateState::Creating;
                s.selected_type.clone()
            })
            .await;
        let Some(pokemon_type) = pokemon_type else {
            info!("create refused: selection incomplete or busy");
            return SubmitOutcome::Refused;
        };

        let outcome = match self.directory.create_report(&pokemon_type).await {
            Ok(body) => {
                self.notifier.notify(Notification::success(format!(
                    "A new report was generated for type {pokemon_type}."
                )));
                if let Err(e) = self.load_reports().await {
                    warn!(error = %e, "reload after create failed");
                }
                SubmitOutcome::Created(body)
            }
            Err(e) => {
                error!(%pokemon_type, error = %e, "create report failed");
                self.notifier.notify(Notification::error(CREATE_FAILED));
                SubmitOutcome::Failed(e)
            }
        };

        self.update(|s| s.create = CreateState::Idle).await;
        outcome
    }

    // ── Download ─────────────────────────────────────────────────────────

    /// Check the report's link, then hand it to the download mechanism.
    ///
    /// A link the storage account rejects (or that cannot be reached at
    /// all) opens the auth-error dialog instead of a toast: the fix is to
    /// reload the list for fresh links, which a toast cannot explain.
    pub async fn probe_download(&self, report: &Report) -> DownloadOutcome {
        if !report.is_completed() {
            return DownloadOutcome::Refused;
        }
        let Some(url) = report.url.as_deref() else {
            self.notifier.notify(Notification::error(DOWNLOAD_URL_MISSING));
            return DownloadOutcome::Unavailable;
        };

        match self.probe.probe(url).await {
            Ok(()) => match self.handoff.open(report, url).await {
                Ok(()) => DownloadOutcome::HandedOff,
                Err(e) => {
                    error!(id = %report.display_id(), error = %e, "download hand-off failed");
                    self.notifier.notify(Notification::error(DOWNLOAD_FAILED));
                    DownloadOutcome::Failed
                }
            },
            Err(e) if e.needs_reauth() => {
                warn!(id = %report.display_id(), error = %e, "download link needs re-authentication");
                self.update(|s| s.modal = Modal::AuthError).await;
                DownloadOutcome::AuthError
            }
            Err(e) => {
                error!(id = %report.display_id(), error = %e, "download check failed");
                self.notifier.notify(Notification::error(DOWNLOAD_FAILED));
                DownloadOutcome::Failed
            }
        }
    }

    pub async fn dismiss_auth_error(&self) {
        self.update(|s| {
            if s.modal == Modal::AuthError {
                s.modal = Modal::Closed;
            }
        })
        .await;
    }

    /// The auth-error dialog's recovery action: close it and refresh once.
    /// Does nothing if the dialog is not open. While a reload is already in
    /// flight the dialog stays open and `Busy` is returned.
    pub async fn recover_from_auth_error(&self) -> Result<(), ControllerError> {
        let started = self
            .update(|s| {
                if s.modal != Modal::AuthError {
                    return Ok(false);
                }
                if !begin_refresh(s) {
                    return Err(ControllerError::Busy("refresh"));
                }
                s.modal = Modal::Closed;
                Ok(true)
            })
            .await?;
        if !started {
            return Ok(());
        }
        self.finish_refresh().await
    }

    // ── Delete ───────────────────────────────────────────────────────────

    /// Open the delete confirmation for a completed report.
    pub async fn request_delete(&self, report: Report) -> Result<(), ControllerError> {
        if !report.is_completed() {
            return Err(ControllerError::NotCompleted(report.display_id()));
        }
        self.update(|s| s.modal = Modal::ConfirmDelete(report)).await;
        Ok(())
    }

    pub async fn cancel_delete(&self) {
        self.update(|s| {
            if matches!(s.modal, Modal::ConfirmDelete(_)) {
                s.modal = Modal::Closed;
            }
        })
        .await;
    }

    /// Send the delete for the report awaiting confirmation.
    ///
    /// Returns `Ok(None)` when no confirmation is open. A report without an
    /// id is refused before any request is made and the prompt stays open.
    /// Otherwise the request is spawned and the prompt closes immediately;
    /// the report list is not reloaded.
    pub async fn confirm_delete(&self) -> Result<Option<PendingDelete>, ControllerError> {
        let report = self
            .update(|s| match &s.modal {
                Modal::ConfirmDelete(report) => Some(report.clone()),
                _ => None,
            })
            .await;
        let Some(report) = report else {
            return Ok(None);
        };

        let Some(id) = report.id.clone() else {
            self.notifier.notify(Notification::error(DELETE_ID_MISSING));
            return Err(ControllerError::Validation(DELETE_ID_MISSING.to_string()));
        };

        let directory = Arc::clone(&self.directory);
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            let result = directory.delete_report(&task_id).await;
            if let Err(e) = &result {
                error!(id = %task_id, error = %e, "delete request failed");
            }
            result
        });

        info!(%id, "delete requested");
        self.update(|s| s.modal = Modal::Closed).await;
        Ok(Some(PendingDelete { id, handle }))
    }
}

/// Mark the report list as loading unless a load is already in flight.
fn begin_reload(s: &mut PageState) -> bool {
    if s.loading_reports() {
        return false;
    }
    s.reports_load = LoadState::Loading;
    s.error = None;
    true
}

fn begin_refresh(s: &mut PageState) -> bool {
    if s.refreshing || !begin_reload(s) {
        return false;
    }
    s.refreshing = true;
    true
}

fn apply_report_load(
    s: &mut PageState,
    result: Result<Vec<Report>, ClientError>,
) -> Result<(), ControllerError> {
    match result {
        Ok(reports) => {
            info!(count = reports.len(), "reports loaded");
            s.replace_reports(reports);
            s.reports_load = LoadState::Loaded;
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, network = e.is_network(), "loading reports failed");
            s.reports_load = LoadState::Failed(e.to_string());
            s.error = Some(REPORTS_LOAD_ERROR.to_string());
            Err(e.into())
        }
    }
}
