//! Terminal tables built from the dashboard's row models.

use chaosdash_core::render::{
    self, ExperimentRow, ExperimentTable, RowAction, Summary, TableBody, TargetRow, TARGET_HEADERS,
};
use chaosdash_core::{Experiment, Target};
use comfy_table::{presets::UTF8_FULL, Cell, Table};

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    let mut header = vec!["ID"];
    header.extend_from_slice(headers);
    table.set_header(header);
    table
}

fn actions(actions: &[RowAction]) -> String {
    actions
        .iter()
        .map(RowAction::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn empty_row(table: &mut Table, message: &str) {
    table.add_row([Cell::new(message)]);
}

pub fn experiments_table(experiments: &[Experiment], kind: ExperimentTable) -> Table {
    let mut table = new_table(kind.headers());
    match render::render_experiments(experiments, kind) {
        TableBody::Empty { message, .. } => empty_row(&mut table, message),
        TableBody::Rows(rows) => {
            for row in rows {
                table.add_row(experiment_cells(&row, kind));
            }
        }
    }
    table
}

fn experiment_cells(row: &ExperimentRow, kind: ExperimentTable) -> Vec<String> {
    let mut cells = vec![
        row.id.clone(),
        row.name.clone(),
        row.kind.clone(),
        row.target.clone(),
        row.status.clone(),
    ];
    if kind == ExperimentTable::Full {
        cells.push(row.created.clone());
    }
    cells.push(row.duration.clone());
    cells.push(actions(&row.actions));
    cells
}

pub fn targets_table(targets: &[Target]) -> Table {
    let mut table = new_table(TARGET_HEADERS);
    match render::render_targets(targets) {
        TableBody::Empty { message, .. } => empty_row(&mut table, message),
        TableBody::Rows(rows) => {
            for row in rows {
                table.add_row(target_cells(&row));
            }
        }
    }
    table
}

fn target_cells(row: &TargetRow) -> Vec<String> {
    vec![
        row.id.clone(),
        row.name.clone(),
        row.kind.clone(),
        row.namespace.clone(),
        row.selector.clone(),
        row.created.clone(),
        actions(&row.actions),
    ]
}

/// Two-column field/value table for the detail views.
pub fn fields_table<K: AsRef<str>>(fields: &[(K, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["Field", "Value"]);
    for (k, v) in fields {
        table.add_row([k.as_ref(), v.as_str()]);
    }
    table
}

pub fn summary_line(summary: &Summary) -> String {
    format!(
        "Total: {}   Running: {}   Completed: {}   Failed: {}",
        summary.total, summary.running, summary.completed, summary.failed
    )
}
