//! Table renderers: records in, display rows out.
//!
//! Everything here is pure. The frontend and the CLI both draw these row
//! models; neither decides ordering, badges or which actions a row offers.

use chrono::{DateTime, Local, Utc};
use serde_json::Value;
use tracing::warn;

use crate::models::{Experiment, ExperimentStatus, Target};

/// Rows shown by the dashboard's "recent experiments" table.
pub const RECENT_LIMIT: usize = 5;

pub const NO_EXPERIMENTS: &str = "No experiments found";
pub const NO_TARGETS: &str = "No targets found";
pub const LOADING: &str = "Loading...";

/// Status badge colour class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Secondary,
    Primary,
    Success,
    Danger,
}

impl Badge {
    pub fn for_status(status: &ExperimentStatus) -> Self {
        match status {
            ExperimentStatus::Running => Badge::Primary,
            ExperimentStatus::Completed => Badge::Success,
            ExperimentStatus::Failed => Badge::Danger,
            ExperimentStatus::Pending | ExperimentStatus::Other(_) => Badge::Secondary,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Badge::Secondary => "secondary",
            Badge::Primary => "primary",
            Badge::Success => "success",
            Badge::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    View,
    Execute,
    Stop,
    Delete,
}

impl RowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowAction::View => "view",
            RowAction::Execute => "execute",
            RowAction::Stop => "stop",
            RowAction::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(RowAction::View),
            "execute" => Some(RowAction::Execute),
            "stop" => Some(RowAction::Stop),
            "delete" => Some(RowAction::Delete),
            _ => None,
        }
    }
}

/// A click on a row control, resolved from the `data-action` / `data-id`
/// attributes by the table's single delegated handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEvent {
    pub action: RowAction,
    pub id: String,
}

impl RowEvent {
    pub fn from_attrs(action: Option<&str>, id: Option<&str>) -> Option<Self> {
        let action = RowAction::parse(action?)?;
        let id = id.filter(|id| !id.is_empty())?;
        Some(RowEvent {
            action,
            id: id.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentTable {
    /// Dashboard: newest five, no delete.
    Recent,
    /// Experiments view: everything, with created date and delete.
    Full,
}

impl ExperimentTable {
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ExperimentTable::Recent => &["Name", "Type", "Target", "Status", "Duration", "Actions"],
            ExperimentTable::Full => &[
                "Name", "Type", "Target", "Status", "Created", "Duration", "Actions",
            ],
        }
    }
}

pub const TARGET_HEADERS: &[&str] = &["Name", "Type", "Namespace", "Selector", "Created", "Actions"];

/// Either the fixed empty-state row or the record rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody<R> {
    Empty { message: &'static str, colspan: usize },
    Rows(Vec<R>),
}

impl<R> TableBody<R> {
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Empty { .. } => 1,
            TableBody::Rows(rows) => rows.len(),
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            TableBody::Empty { .. } => &[],
            TableBody::Rows(rows) => rows,
        }
    }

    /// Swap the empty-state message for a loading row while the first fetch
    /// is out.
    pub fn or_loading(self, awaiting_first_load: bool) -> Self {
        match self {
            TableBody::Empty { colspan, .. } if awaiting_first_load => TableBody::Empty {
                message: LOADING,
                colspan,
            },
            body => body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub target: String,
    pub status: String,
    pub badge: Badge,
    pub created: String,
    pub duration: String,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub namespace: String,
    pub selector: String,
    pub created: String,
    pub actions: Vec<RowAction>,
}

/// Newest first. Equal timestamps keep their input order.
pub fn sort_newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

/// Execute only while pending, stop only while running; view always; delete
/// only in the full table.
pub fn experiment_actions(status: &ExperimentStatus, table: ExperimentTable) -> Vec<RowAction> {
    let mut actions = vec![RowAction::View];
    match status {
        ExperimentStatus::Pending => actions.push(RowAction::Execute),
        ExperimentStatus::Running => actions.push(RowAction::Stop),
        _ => {}
    }
    if table == ExperimentTable::Full {
        actions.push(RowAction::Delete);
    }
    actions
}

pub fn render_experiments(experiments: &[Experiment], table: ExperimentTable) -> TableBody<ExperimentRow> {
    let mut sorted = sort_newest_first(experiments, |e| e.created_at);
    if table == ExperimentTable::Recent {
        sorted.truncate(RECENT_LIMIT);
    }
    if sorted.is_empty() {
        return TableBody::Empty {
            message: NO_EXPERIMENTS,
            colspan: table.headers().len(),
        };
    }
    TableBody::Rows(
        sorted
            .into_iter()
            .map(|e| ExperimentRow {
                actions: experiment_actions(&e.status, table),
                badge: Badge::for_status(&e.status),
                status: e.status.to_string(),
                kind: e.kind.to_string(),
                created: format_created(&e.created_at),
                duration: format_duration(e.duration),
                id: e.id,
                name: e.name,
                target: e.target,
            })
            .collect(),
    )
}

pub fn render_targets(targets: &[Target]) -> TableBody<TargetRow> {
    let sorted = sort_newest_first(targets, |t| t.created_at);
    if sorted.is_empty() {
        return TableBody::Empty {
            message: NO_TARGETS,
            colspan: TARGET_HEADERS.len(),
        };
    }
    TableBody::Rows(
        sorted
            .into_iter()
            .map(|t| TargetRow {
                created: format_created(&t.created_at),
                actions: vec![RowAction::View, RowAction::Delete],
                id: t.id,
                name: t.name,
                kind: t.kind,
                namespace: t.namespace,
                selector: t.selector,
            })
            .collect(),
    )
}

/// Dashboard summary cards. Always derived from the list, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub running: usize,
}

impl Summary {
    pub fn from_experiments(experiments: &[Experiment]) -> Self {
        let mut summary = Summary {
            total: experiments.len(),
            ..Default::default()
        };
        for e in experiments {
            match e.status {
                ExperimentStatus::Completed => summary.completed += 1,
                ExperimentStatus::Failed => summary.failed += 1,
                ExperimentStatus::Running => summary.running += 1,
                _ => {}
            }
        }
        summary
    }

    /// Pending and any status the dashboard has no card for.
    pub fn other(&self) -> usize {
        self.total - self.completed - self.failed - self.running
    }
}

pub fn format_duration(secs: u64) -> String {
    format!("{}s", secs)
}

/// Creation time in the viewer's local time zone.
pub fn format_created(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M, %d %b, %Y").to_string()
}

/// Entry of the experiment form's target dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOption {
    pub value: String,
    pub label: String,
    pub kind: String,
}

/// Dropdown entries keyed by selector. A selector shared by several targets
/// would make the binding ambiguous, so only the newest one is offered.
pub fn target_options(targets: &[Target]) -> Vec<TargetOption> {
    let mut seen = std::collections::HashSet::new();
    sort_newest_first(targets, |t| t.created_at)
        .into_iter()
        .filter(|t| {
            let fresh = seen.insert(t.selector.clone());
            if !fresh {
                warn!(selector = %t.selector, target = %t.id, "duplicate target selector hidden from dropdown");
            }
            fresh
        })
        .map(|t| TargetOption {
            label: format!("{} ({})", t.name, t.kind),
            value: t.selector,
            kind: t.kind,
        })
        .collect()
}

const SECRET_KEYS: &[&str] = &["auth_token"];

/// Flatten a parameter object into label/value pairs for the detail view.
/// Secrets are masked.
pub fn parameter_fields(parameters: &Value) -> Vec<(String, String)> {
    match parameters {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let shown = if SECRET_KEYS.contains(&k.as_str()) {
                    "********".to_string()
                } else {
                    match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    }
                };
                (k.clone(), shown)
            })
            .collect(),
        Value::Null => vec![],
        other => vec![("value".to_string(), other.to_string())],
    }
}

pub fn experiment_fields(e: &Experiment) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("ID", e.id.clone()),
        ("Name", e.name.clone()),
        ("Description", e.description.clone()),
        ("Type", e.kind.to_string()),
        ("Target", e.target.clone()),
        ("Status", e.status.to_string()),
        ("Duration", format_duration(e.duration)),
        ("Created", format_created(&e.created_at)),
    ];
    if let Some(updated) = &e.updated_at {
        fields.push(("Updated", format_created(updated)));
    }
    fields
}

pub fn target_fields(t: &Target) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("ID", t.id.clone()),
        ("Name", t.name.clone()),
        ("Description", t.description.clone()),
        ("Type", t.kind.clone()),
        ("Namespace", t.namespace.clone()),
        ("Selector", t.selector.clone()),
        ("Created", format_created(&t.created_at)),
    ];
    if let Some(updated) = &t.updated_at {
        fields.push(("Updated", format_created(updated)));
    }
    fields
}
