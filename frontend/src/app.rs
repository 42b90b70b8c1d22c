use chaosdash_core::{DashboardConfig, View};
use leptos::prelude::*;
use leptos::task::spawn_local;
use lucide_leptos::{
    ChartColumn, Crosshair, FlaskConical, LayoutDashboard, Settings as SettingsIcon, Zap,
};

use crate::modals::{NewExperimentModal, NewTargetModal};
use crate::state::{use_app, AppState, DebugLogs};
use crate::transport::fetch_dashboard_config;
use crate::views::{
    DashboardView, DetailPanel, ExperimentsView, Notices, ResultsView, SettingsView, TargetsView,
};

#[component]
pub fn App(debug_enabled: bool) -> impl IntoView {
    let app = AppState::new(&DashboardConfig::default());
    provide_context(app);
    provide_context(DebugLogs(RwSignal::new(debug_enabled)));

    // Loads wait for the hosting server to say where the API is. The user may
    // have moved on by then; reload whichever view is showing.
    spawn_local(async move {
        let config = fetch_dashboard_config().await;
        app.configure(&config);
        app.reload_active();
    });

    view! {
        <div class="flex h-screen bg-slate-950 text-slate-100 font-sans">
            // Sidebar
            <nav class="w-64 border-r border-slate-800 flex flex-col p-4 bg-slate-900/50">
                <div class="flex items-center space-x-3 px-2 py-6 mb-6">
                    <div class="p-2 bg-orange-600 rounded-lg shadow-lg shadow-orange-900/20">
                        <Zap size=24 />
                    </div>
                    <span class="text-2xl font-bold tracking-tight text-white">"ChaosDash"</span>
                </div>

                <div class="space-y-1">
                    <NavLink view=View::Dashboard><LayoutDashboard size=20 /></NavLink>
                    <NavLink view=View::Experiments><FlaskConical size=20 /></NavLink>
                    <NavLink view=View::Targets><Crosshair size=20 /></NavLink>
                    <NavLink view=View::Results><ChartColumn size=20 /></NavLink>
                </div>

                <div class="mt-auto">
                    <NavLink view=View::Settings><SettingsIcon size=20 /></NavLink>
                </div>
            </nav>

            // Main Content
            <main class="flex-grow overflow-auto p-8">
                {move || match app.router.with(|r| r.active()) {
                    View::Dashboard => view! { <DashboardView /> }.into_any(),
                    View::Experiments => view! { <ExperimentsView /> }.into_any(),
                    View::Targets => view! { <TargetsView /> }.into_any(),
                    View::Results => view! { <ResultsView /> }.into_any(),
                    View::Settings => view! { <SettingsView /> }.into_any(),
                }}
            </main>

            <NewExperimentModal />
            <NewTargetModal />
            <DetailPanel />
            <Notices />
        </div>
    }
    .into_any()
}

/// Sidebar entry. Exactly one carries the active marker.
#[component]
fn NavLink(view: View, children: Children) -> impl IntoView {
    let app = use_app();
    let active = Memo::new(move |_| app.router.with(|r| r.is_active(view)));

    view! {
        <button
            class=move || format!(
                "w-full flex items-center space-x-3 px-4 py-3 rounded-xl transition-all duration-200 group {}",
                if active.get() {
                    "bg-slate-800 text-white"
                } else {
                    "text-slate-400 hover:bg-slate-800 hover:text-white"
                }
            )
            on:click=move |_| app.navigate(view)
        >
            <div class="group-hover:text-blue-400 transition-colors">
                {children()}
            </div>
            <span class="font-medium">{view.title()}</span>
        </button>
    }
}
