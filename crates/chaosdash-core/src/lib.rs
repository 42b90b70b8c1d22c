//! chaosdash-core: client-side logic for the chaos experiment dashboard.
//!
//! Nothing in this crate knows about the DOM or the terminal. The API client
//! talks through an [`api::ApiTransport`], handlers return [`actions::Outcome`]s
//! and renderers return row models, so the browser frontend and the CLI share
//! one implementation and tests run without a network.

pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod render;
pub mod router;

pub use actions::{Notice, Outcome, Panel, Prompt, Tone};
pub use api::{ApiClient, ApiTransport, Method, RawResponse};
pub use config::DashboardConfig;
pub use error::{DashError, Result};
pub use models::{Experiment, ExperimentKind, ExperimentStatus, NewExperiment, NewTarget, Target};
pub use router::{Loader, Router, View};
