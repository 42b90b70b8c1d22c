//! Loaders, form submission and per-row actions.
//!
//! Every handler catches at its own boundary: it never returns an error,
//! only an [`Outcome`] carrying the notice to show and the loaders to re-run.
//! Callers apply the outcome; nothing here touches UI state directly.

use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiTransport};
use crate::error::{DashError, Result};
use crate::models::{Experiment, NewExperiment, NewTarget, Target};
use crate::router::Loader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

/// A user-facing message raised by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            message: message.into(),
        }
    }

    /// Errors stay on screen until the user closes them.
    pub fn dismisses_itself(&self) -> bool {
        self.tone != Tone::Error
    }

    /// `"{context}: {error}"`, e.g. `Error creating experiment: 500 Internal Server Error`.
    /// Validation and unsupported errors are shown bare.
    pub fn from_error(context: &str, err: &DashError) -> Self {
        match err {
            DashError::Validation(msg) => Self {
                tone: Tone::Warning,
                message: msg.clone(),
            },
            DashError::Unsupported(_) => Self {
                tone: Tone::Warning,
                message: err.to_string(),
            },
            _ => Self {
                tone: Tone::Error,
                message: format!("{}: {}", context, err),
            },
        }
    }
}

/// Confirmation dialogs. The browser uses `window.confirm`, the CLI a flag or
/// a terminal prompt.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Prompt for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Experiment(Experiment),
    Target(Target),
}

/// What a handler wants the caller to do next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    pub succeeded: bool,
    pub notice: Option<Notice>,
    pub reload: Vec<Loader>,
    pub detail: Option<Detail>,
}

impl Outcome {
    /// The user backed out; nothing happened.
    pub fn cancelled() -> Self {
        Self::default()
    }

    fn ok(message: impl Into<String>, reload: &[Loader]) -> Self {
        Self {
            succeeded: true,
            notice: Some(Notice::success(message)),
            reload: reload.to_vec(),
            detail: None,
        }
    }

    fn failed(context: &str, err: &DashError) -> Self {
        if err.is_local() {
            warn!(error = %err, "{}", context);
        } else {
            error!(error = %err, "{}", context);
        }
        Self {
            notice: Some(Notice::from_error(context, err)),
            ..Default::default()
        }
    }
}

/// Loaders to re-run after anything that changes the experiment collection.
pub const EXPERIMENT_LOADERS: &[Loader] = &[Loader::Dashboard, Loader::Experiments];
pub const TARGET_LOADERS: &[Loader] = &[Loader::Targets];

// ── Loaders ──────────────────────────────────────────────────────────────────

/// Rendered state of one loader: the last good list and its spinner.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T> {
    pub items: Vec<T>,
    pub loading: bool,
    /// False until the first successful load.
    pub loaded: bool,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loaded: false,
        }
    }
}

impl<T> Panel<T> {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// The first fetch is still out: an empty list means "not known yet",
    /// not "nothing there".
    pub fn awaiting_first_load(&self) -> bool {
        self.loading && !self.loaded
    }

    /// Apply a finished fetch. The spinner is cleared on every path. A failed
    /// fetch keeps the previous rows and yields a notice; a stale one (the
    /// user navigated away meanwhile) is dropped silently.
    pub fn settle(&mut self, result: Result<Vec<T>>, current: bool, context: &str) -> Option<Notice> {
        self.loading = false;
        match result {
            Ok(items) if current => {
                self.items = items;
                self.loaded = true;
                None
            }
            Ok(_) => {
                info!("{}: dropped stale result", context);
                None
            }
            Err(e) => {
                error!(error = %e, "{}", context);
                Some(Notice::from_error(context, &e))
            }
        }
    }
}

pub fn load_context(loader: Loader) -> &'static str {
    match loader {
        Loader::Dashboard => "Error loading dashboard data",
        Loader::Experiments => "Error loading experiments",
        Loader::Targets => "Error loading targets",
    }
}

// ── Forms ────────────────────────────────────────────────────────────────────

/// POST a validated experiment. A validation error short-circuits before any
/// request is made.
pub async fn create_experiment<T: ApiTransport>(
    client: &ApiClient<T>,
    request: Result<NewExperiment>,
) -> Outcome {
    const CONTEXT: &str = "Error creating experiment";
    let request = match request {
        Ok(r) => r,
        Err(e) => return Outcome::failed(CONTEXT, &e),
    };
    match client.create_experiment(&request).await {
        Ok(_) => {
            info!(name = %request.name, kind = %request.kind, "experiment created");
            Outcome::ok("Experiment created successfully", EXPERIMENT_LOADERS)
        }
        Err(e) => Outcome::failed(CONTEXT, &e),
    }
}

pub async fn create_target<T: ApiTransport>(
    client: &ApiClient<T>,
    request: Result<NewTarget>,
) -> Outcome {
    const CONTEXT: &str = "Error creating target";
    let request = match request {
        Ok(r) => r,
        Err(e) => return Outcome::failed(CONTEXT, &e),
    };
    match client.create_target(&request).await {
        Ok(_) => {
            info!(name = %request.name, selector = %request.selector, "target created");
            Outcome::ok("Target created successfully", TARGET_LOADERS)
        }
        Err(e) => Outcome::failed(CONTEXT, &e),
    }
}

// ── Row actions ──────────────────────────────────────────────────────────────

pub async fn execute_experiment<T: ApiTransport>(client: &ApiClient<T>, id: &str) -> Outcome {
    match client.execute_experiment(id).await {
        Ok(()) => {
            info!(experiment = %id, "experiment started");
            Outcome::ok(
                format!("Experiment {} started successfully", id),
                EXPERIMENT_LOADERS,
            )
        }
        Err(e) => Outcome::failed("Error executing experiment", &e),
    }
}

pub async fn stop_experiment<T: ApiTransport>(client: &ApiClient<T>, id: &str) -> Outcome {
    match client.stop_experiment(id).await {
        Ok(()) => Outcome::ok(format!("Experiment {} stopped", id), EXPERIMENT_LOADERS),
        Err(e) => Outcome::failed("Error stopping experiment", &e),
    }
}

pub async fn delete_experiment<T: ApiTransport>(
    client: &ApiClient<T>,
    prompt: &impl Prompt,
    id: &str,
) -> Outcome {
    if !prompt.confirm("Are you sure you want to delete this experiment?") {
        return Outcome::cancelled();
    }
    match client.delete_experiment(id).await {
        Ok(()) => {
            info!(experiment = %id, "experiment deleted");
            Outcome::ok("Experiment deleted successfully", EXPERIMENT_LOADERS)
        }
        Err(e) => Outcome::failed("Error deleting experiment", &e),
    }
}

pub async fn delete_target<T: ApiTransport>(
    client: &ApiClient<T>,
    prompt: &impl Prompt,
    id: &str,
) -> Outcome {
    if !prompt.confirm("Are you sure you want to delete this target?") {
        return Outcome::cancelled();
    }
    match client.delete_target(id).await {
        Ok(()) => {
            info!(target_id = %id, "target deleted");
            Outcome::ok("Target deleted successfully", TARGET_LOADERS)
        }
        Err(e) => Outcome::failed("Error deleting target", &e),
    }
}

pub async fn view_experiment<T: ApiTransport>(client: &ApiClient<T>, id: &str) -> Outcome {
    match client.get_experiment(id).await {
        Ok(experiment) => Outcome {
            succeeded: true,
            detail: Some(Detail::Experiment(experiment)),
            ..Default::default()
        },
        Err(e) => Outcome::failed("Error loading experiment", &e),
    }
}

pub async fn view_target<T: ApiTransport>(client: &ApiClient<T>, id: &str) -> Outcome {
    match client.get_target(id).await {
        Ok(target) => Outcome {
            succeeded: true,
            detail: Some(Detail::Target(target)),
            ..Default::default()
        },
        Err(e) => Outcome::failed("Error loading target", &e),
    }
}
