use chaosdash_core::actions::{Detail, Tone};
use chaosdash_core::render::{self, ExperimentTable, Summary};
use leptos::prelude::*;
use lucide_leptos::{Activity, CircleCheck, CircleX, FlaskConical, Plus, TriangleAlert, X};

use crate::state::{store_debug_flag, use_app, DebugLogs};
use crate::tables::{ExperimentTableView, TargetTableView};

#[component]
fn StatCard(label: &'static str, value: Signal<String>, children: Children) -> impl IntoView {
    view! {
        <div class="bg-slate-900 border border-slate-800 rounded-xl p-6 flex items-center space-x-4">
            <div class="p-3 bg-slate-800 rounded-lg">
                {children()}
            </div>
            <div>
                <p class="text-sm text-slate-400">{label}</p>
                <p class="text-2xl font-bold text-white">{move || value.get()}</p>
            </div>
        </div>
    }
}

#[component]
fn NewExperimentButton() -> impl IntoView {
    let app = use_app();
    view! {
        <button
            class="flex items-center space-x-2 px-4 py-2 bg-blue-600 hover:bg-blue-500 rounded-lg text-white font-medium transition-colors"
            on:click=move |_| app.open_experiment_modal()
        >
            <Plus size=18 />
            <span>"New Experiment"</span>
        </button>
    }
}

#[component]
pub fn DashboardView() -> impl IntoView {
    let app = use_app();
    let summary = Memo::new(move |_| app.recent.with(|p| Summary::from_experiments(&p.items)));
    let stat = move |f: fn(&Summary) -> usize| Signal::derive(move || f(&summary.get()).to_string());

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-white">"Dashboard Overview"</h1>
                <NewExperimentButton />
            </div>

            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <StatCard label="Total Experiments" value=stat(|s| s.total)>
                    <FlaskConical size=24 />
                </StatCard>
                <StatCard label="Active" value=stat(|s| s.running)>
                    <Activity size=24 />
                </StatCard>
                <StatCard label="Successful" value=stat(|s| s.completed)>
                    <CircleCheck size=24 />
                </StatCard>
                <StatCard label="Failed" value=stat(|s| s.failed)>
                    <CircleX size=24 />
                </StatCard>
            </div>

            <div class="space-y-4">
                <h2 class="text-xl font-semibold text-white">"Recent Experiments"</h2>
                <ExperimentTableView panel=app.recent table=ExperimentTable::Recent />
            </div>
        </div>
    }
}

#[component]
pub fn ExperimentsView() -> impl IntoView {
    let app = use_app();
    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-white">"Experiments"</h1>
                <NewExperimentButton />
            </div>
            <ExperimentTableView panel=app.experiments table=ExperimentTable::Full />
        </div>
    }
}

#[component]
pub fn TargetsView() -> impl IntoView {
    let app = use_app();
    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-white">"Targets"</h1>
                <button
                    class="flex items-center space-x-2 px-4 py-2 bg-blue-600 hover:bg-blue-500 rounded-lg text-white font-medium transition-colors"
                    on:click=move |_| app.target_modal.update(|m| m.show())
                >
                    <Plus size=18 />
                    <span>"New Target"</span>
                </button>
            </div>
            <TargetTableView panel=app.targets />
        </div>
    }
}

#[component]
pub fn ResultsView() -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-white">"Results"</h1>
            <div class="bg-slate-900 border border-slate-800 rounded-xl p-10 flex flex-col items-center space-y-3 text-slate-400">
                <TriangleAlert size=32 />
                <p>"Experiment results are not available yet."</p>
            </div>
        </div>
    }
}

#[component]
pub fn SettingsView() -> impl IntoView {
    let DebugLogs(debug_enabled) = use_context().expect("DebugLogs not provided");
    let toggle = move |_| {
        debug_enabled.update(|v| *v = !*v);
        store_debug_flag(debug_enabled.get_untracked());
    };

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-white">"Settings"</h1>
            <div class="bg-slate-900 border border-slate-800 rounded-2xl p-6 space-y-6">
                <div class="flex items-center justify-between">
                    <div>
                        <h3 class="text-lg font-medium text-white">"Debug Logs"</h3>
                        <p class="text-sm text-slate-400">"Log every API request to the browser console. Requires page reload."</p>
                    </div>
                    <button
                        on:click=toggle
                        class=move || format!(
                            "w-12 h-6 rounded-full transition-colors relative {}",
                            if debug_enabled.get() { "bg-blue-600" } else { "bg-slate-700" }
                        )
                    >
                        <div class=move || format!(
                            "absolute top-1 left-1 w-4 h-4 bg-white rounded-full transition-transform {}",
                            if debug_enabled.get() { "translate-x-6" } else { "" }
                        )></div>
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Slide-over showing the record picked with a row's view action.
#[component]
pub fn DetailPanel() -> impl IntoView {
    let app = use_app();

    let content = move || {
        app.detail.get().map(|detail| {
            let (title, fields, parameters) = match detail {
                Detail::Experiment(e) => (
                    "Experiment",
                    render::experiment_fields(&e),
                    render::parameter_fields(&e.parameters),
                ),
                Detail::Target(t) => ("Target", render::target_fields(&t), vec![]),
            };
            view! {
                <div class="fixed inset-0 z-40 flex justify-end bg-black/50" on:click=move |_| app.detail.set(None)>
                    <aside
                        class="w-full max-w-md h-full bg-slate-900 border-l border-slate-800 p-6 space-y-6 overflow-auto"
                        on:click=|ev| ev.stop_propagation()
                    >
                        <div class="flex items-center justify-between">
                            <h2 class="text-xl font-semibold text-white">{title}</h2>
                            <button class="text-slate-500 hover:text-white" on:click=move |_| app.detail.set(None)>
                                <X size=20 />
                            </button>
                        </div>
                        <dl class="space-y-3">
                            {fields.into_iter().map(|(k, v)| view! {
                                <div>
                                    <dt class="text-xs uppercase tracking-wide text-slate-500">{k}</dt>
                                    <dd class="text-slate-200 break-all">{v}</dd>
                                </div>
                            }).collect_view()}
                        </dl>
                        {(!parameters.is_empty()).then(|| view! {
                            <div class="space-y-3">
                                <h3 class="text-sm font-semibold text-slate-300">"Parameters"</h3>
                                <dl class="space-y-2">
                                    {parameters.into_iter().map(|(k, v)| view! {
                                        <div class="flex justify-between text-sm">
                                            <dt class="text-slate-500 font-mono">{k}</dt>
                                            <dd class="text-slate-200 font-mono break-all">{v}</dd>
                                        </div>
                                    }).collect_view()}
                                </dl>
                            </div>
                        })}
                    </aside>
                </div>
            }
        })
    };

    view! { {content} }
}

#[component]
pub fn Notices() -> impl IntoView {
    let app = use_app();
    view! {
        <div class="fixed bottom-6 right-6 z-50 space-y-2 w-96">
            <For
                each=move || app.notices.get()
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    let class = match notice.tone {
                        Tone::Success => "border-green-600/50 text-green-300",
                        Tone::Warning => "border-amber-600/50 text-amber-300",
                        Tone::Error => "border-red-600/50 text-red-300",
                    };
                    view! {
                        <div class=format!("flex items-start justify-between p-4 rounded-xl bg-slate-900 border shadow-lg {}", class)>
                            <p class="text-sm">{notice.message}</p>
                            <button class="ml-4 text-slate-500 hover:text-white" on:click=move |_| app.dismiss(id)>
                                <X size=16 />
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
