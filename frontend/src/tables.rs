use chaosdash_core::render::{
    render_experiments, render_targets, Badge, ExperimentRow, ExperimentTable, RowAction,
    TableBody, TargetRow, TARGET_HEADERS,
};
use chaosdash_core::{Experiment, Panel, Target};
use leptos::prelude::*;
use lucide_leptos::{Eye, Play, Square, Trash2};

use crate::state::{row_event, use_app};

const TH: &str = "px-6 py-4 font-semibold text-slate-300";
const TD: &str = "px-6 py-4 text-slate-400 text-sm";

fn badge_class(badge: Badge) -> &'static str {
    match badge {
        Badge::Secondary => "bg-slate-700 text-slate-300",
        Badge::Primary => "bg-blue-600/20 text-blue-400",
        Badge::Success => "bg-green-600/20 text-green-400",
        Badge::Danger => "bg-red-600/20 text-red-400",
    }
}

#[component]
pub fn StatusBadge(badge: Badge, label: String) -> impl IntoView {
    view! {
        <span class=format!("px-2 py-0.5 rounded text-xs font-medium {}", badge_class(badge))>
            {label}
        </span>
    }
}

fn action_button(action: RowAction, id: &str) -> impl IntoView {
    let (title, class, icon) = match action {
        RowAction::View => ("View", "hover:text-blue-400", view! { <Eye size=16 /> }.into_any()),
        RowAction::Execute => ("Execute", "hover:text-green-400", view! { <Play size=16 /> }.into_any()),
        RowAction::Stop => ("Stop", "hover:text-amber-400", view! { <Square size=16 /> }.into_any()),
        RowAction::Delete => ("Delete", "hover:text-red-400", view! { <Trash2 size=16 /> }.into_any()),
    };
    view! {
        <button
            class=format!("p-1.5 rounded-lg text-slate-500 hover:bg-slate-800 transition-colors {}", class)
            title=title
            data-action=action.as_str()
            data-id=id.to_string()
        >
            {icon}
        </button>
    }
}

fn actions_cell(actions: Vec<RowAction>, id: String) -> impl IntoView {
    view! {
        <td class="px-6 py-4">
            <div class="flex space-x-1">
                {actions.into_iter().map(|a| action_button(a, &id)).collect_view()}
            </div>
        </td>
    }
}

fn empty_row(message: &'static str, colspan: usize) -> AnyView {
    view! {
        <tr>
            <td colspan=colspan.to_string() class="px-6 py-10 text-center text-slate-500">
                {message}
            </td>
        </tr>
    }
    .into_any()
}

fn experiment_row(row: ExperimentRow, table: ExperimentTable) -> impl IntoView {
    let created = (table == ExperimentTable::Full).then(|| view! { <td class=TD>{row.created}</td> });
    view! {
        <tr class="hover:bg-slate-800/30 transition-colors">
            <td class="px-6 py-4 font-medium text-slate-100">{row.name}</td>
            <td class=TD>{row.kind}</td>
            <td class="px-6 py-4 text-slate-400 text-sm font-mono">{row.target}</td>
            <td class="px-6 py-4"><StatusBadge badge=row.badge label=row.status /></td>
            {created}
            <td class="px-6 py-4 text-slate-300 text-sm font-mono">{row.duration}</td>
            {actions_cell(row.actions, row.id)}
        </tr>
    }
}

fn target_row(row: TargetRow) -> impl IntoView {
    view! {
        <tr class="hover:bg-slate-800/30 transition-colors">
            <td class="px-6 py-4 font-medium text-slate-100">{row.name}</td>
            <td class=TD>{row.kind}</td>
            <td class=TD>{row.namespace}</td>
            <td class="px-6 py-4 text-slate-400 text-sm font-mono">{row.selector}</td>
            <td class=TD>{row.created}</td>
            {actions_cell(row.actions, row.id)}
        </tr>
    }
}

/// Thin bar shown while a reload runs over rows already on screen.
#[component]
fn Spinner(loading: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <div class="px-6 py-2 text-xs text-slate-500 animate-pulse">"Loading..."</div>
        </Show>
    }
}

/// Experiments table. A single click handler on the body resolves the
/// clicked action from the button's data attributes.
#[component]
pub fn ExperimentTableView(panel: RwSignal<Panel<Experiment>>, table: ExperimentTable) -> impl IntoView {
    let app = use_app();
    let body = Memo::new(move |_| {
        panel.with(|p| render_experiments(&p.items, table).or_loading(p.awaiting_first_load()))
    });
    let loading = Signal::derive(move || panel.with(|p| p.loading && p.loaded));

    view! {
        <div class="bg-slate-900 border border-slate-800 rounded-xl overflow-hidden">
            <Spinner loading=loading />
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-slate-800/50">
                        {table.headers().iter().map(|h| view! { <th class=TH>{*h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody
                    class="divide-y divide-slate-800"
                    on:click=move |ev| {
                        if let Some(event) = row_event(&ev) {
                            app.dispatch_experiment(event);
                        }
                    }
                >
                    {move || match body.get() {
                        TableBody::Empty { message, colspan } => empty_row(message, colspan),
                        TableBody::Rows(rows) => rows
                            .into_iter()
                            .map(|row| experiment_row(row, table))
                            .collect_view()
                            .into_any(),
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn TargetTableView(panel: RwSignal<Panel<Target>>) -> impl IntoView {
    let app = use_app();
    let body = Memo::new(move |_| {
        panel.with(|p| render_targets(&p.items).or_loading(p.awaiting_first_load()))
    });
    let loading = Signal::derive(move || panel.with(|p| p.loading && p.loaded));

    view! {
        <div class="bg-slate-900 border border-slate-800 rounded-xl overflow-hidden">
            <Spinner loading=loading />
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-slate-800/50">
                        {TARGET_HEADERS.iter().map(|h| view! { <th class=TH>{*h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody
                    class="divide-y divide-slate-800"
                    on:click=move |ev| {
                        if let Some(event) = row_event(&ev) {
                            app.dispatch_target(event);
                        }
                    }
                >
                    {move || match body.get() {
                        TableBody::Empty { message, colspan } => empty_row(message, colspan),
                        TableBody::Rows(rows) => rows.into_iter().map(target_row).collect_view().into_any(),
                    }}
                </tbody>
            </table>
        </div>
    }
}
