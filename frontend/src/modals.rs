//! Creation modals. Inputs write straight into the core form structs; the
//! submit buttons hand off to [`AppState`](crate::state::AppState).

use chaosdash_core::forms::{Modal, TARGET_KINDS};
use chaosdash_core::render::target_options;
use chaosdash_core::ExperimentKind;
use leptos::prelude::*;
use lucide_leptos::X;

use crate::state::use_app;

const INPUT: &str = "w-full px-3 py-2 bg-slate-950 border border-slate-700 rounded-lg text-slate-100 focus:outline-none focus:border-blue-500";

fn text_input<F>(
    modal: RwSignal<Modal<F>>,
    label: &'static str,
    placeholder: &'static str,
    get: fn(&F) -> &String,
    set: fn(&mut F) -> &mut String,
) -> impl IntoView
where
    F: Send + Sync + 'static,
{
    view! {
        <label class="block space-y-1">
            <span class="text-sm text-slate-400">{label}</span>
            <input
                type="text"
                class=INPUT
                placeholder=placeholder
                prop:value=move || modal.with(|m| get(&m.form).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    modal.update(|m| *set(&mut m.form) = value);
                }
            />
        </label>
    }
}

#[component]
fn ModalFooter(
    on_cancel: impl Fn() + 'static,
    on_submit: impl Fn() + 'static,
    submit_label: &'static str,
) -> impl IntoView {
    let app = use_app();
    view! {
        <div class="flex justify-end space-x-3 pt-2">
            <button
                class="px-4 py-2 rounded-lg text-slate-300 hover:bg-slate-800 transition-colors"
                on:click=move |_| on_cancel()
            >
                "Cancel"
            </button>
            <button
                class="px-4 py-2 bg-blue-600 hover:bg-blue-500 disabled:opacity-50 rounded-lg text-white font-medium transition-colors"
                disabled=move || app.submitting.get()
                on:click=move |_| on_submit()
            >
                {submit_label}
            </button>
        </div>
    }
}

#[component]
fn ModalHeader(title: &'static str, on_close: impl Fn() + 'static) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between">
            <h2 class="text-xl font-semibold text-white">{title}</h2>
            <button class="text-slate-500 hover:text-white" on:click=move |_| on_close()>
                <X size=20 />
            </button>
        </div>
    }
}

#[component]
pub fn NewExperimentModal() -> impl IntoView {
    let app = use_app();
    let modal = app.experiment_modal;
    let close = move || modal.update(|m| m.hide());
    let shows_external = Memo::new(move |_| modal.with(|m| m.form.shows_external()));
    let options = Memo::new(move |_| app.target_choices.with(|t| target_options(t)));

    view! {
        <Show when=move || modal.with(|m| m.open)>
            <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/60">
                <div class="w-full max-w-lg bg-slate-900 border border-slate-800 rounded-2xl p-6 space-y-4">
                    <ModalHeader title="New Experiment" on_close=close />

                    {text_input(modal, "Name", "payments outage", |f| &f.name, |f| &mut f.name)}
                    {text_input(modal, "Description", "", |f| &f.description, |f| &mut f.description)}

                    <label class="block space-y-1">
                        <span class="text-sm text-slate-400">"Type"</span>
                        <select
                            class=INPUT
                            prop:value=move || modal.with(|m| m.form.kind.clone())
                            on:change=move |ev| {
                                let kind = event_target_value(&ev);
                                modal.update(|m| m.form.set_kind(kind));
                            }
                        >
                            {ExperimentKind::selectable().into_iter().map(|k| view! {
                                <option value=k.as_str().to_string()>{k.label().to_string()}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <label class="block space-y-1">
                        <span class="text-sm text-slate-400">"Target"</span>
                        <select
                            class=INPUT
                            prop:value=move || modal.with(|m| m.form.target.clone())
                            on:change=move |ev| {
                                let target = event_target_value(&ev);
                                modal.update(|m| m.form.target = target);
                            }
                        >
                            <option value="">"Select a target"</option>
                            {move || options.get().into_iter().map(|o| view! {
                                <option value=o.value>{o.label}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <label class="block space-y-1">
                        <span class="text-sm text-slate-400">"Duration (seconds)"</span>
                        <input
                            type="number"
                            min="1"
                            class=INPUT
                            prop:value=move || modal.with(|m| m.form.duration.clone())
                            on:input=move |ev| {
                                let duration = event_target_value(&ev);
                                modal.update(|m| m.form.duration = duration);
                            }
                        />
                    </label>

                    // Both parameter groups stay mounted so hidden values survive a type switch.
                    <div class:hidden=move || !shows_external.get() class="space-y-4">
                        {text_input(modal, "Endpoint", "http://service/chaos", |f| &f.external.endpoint, |f| &mut f.external.endpoint)}
                        {text_input(modal, "Auth token", "optional", |f| &f.external.auth_token, |f| &mut f.external.auth_token)}
                        {text_input(modal, "Cleanup endpoint", "optional", |f| &f.external.cleanup_endpoint, |f| &mut f.external.cleanup_endpoint)}
                    </div>
                    <div class:hidden=move || shows_external.get() class="space-y-4">
                        {text_input(modal, "Namespace", "default", |f| &f.workload.namespace, |f| &mut f.workload.namespace)}
                        <label class="block space-y-1">
                            <span class="text-sm text-slate-400">
                                "Percentage: " {move || modal.with(|m| m.form.workload.percentage)} "%"
                            </span>
                            <input
                                type="range"
                                min="0"
                                max="100"
                                class="w-full"
                                prop:value=move || modal.with(|m| m.form.workload.percentage.to_string())
                                on:input=move |ev| {
                                    if let Ok(p) = event_target_value(&ev).parse::<u8>() {
                                        modal.update(|m| m.form.workload.percentage = p);
                                    }
                                }
                            />
                        </label>
                    </div>

                    <ModalFooter
                        on_cancel=close
                        on_submit=move || app.submit_experiment()
                        submit_label="Create Experiment"
                    />
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn NewTargetModal() -> impl IntoView {
    let app = use_app();
    let modal = app.target_modal;
    let close = move || modal.update(|m| m.hide());

    view! {
        <Show when=move || modal.with(|m| m.open)>
            <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/60">
                <div class="w-full max-w-lg bg-slate-900 border border-slate-800 rounded-2xl p-6 space-y-4">
                    <ModalHeader title="New Target" on_close=close />

                    {text_input(modal, "Name", "web frontend", |f| &f.name, |f| &mut f.name)}
                    {text_input(modal, "Description", "", |f| &f.description, |f| &mut f.description)}

                    <label class="block space-y-1">
                        <span class="text-sm text-slate-400">"Type"</span>
                        <select
                            class=INPUT
                            prop:value=move || modal.with(|m| m.form.kind.clone())
                            on:change=move |ev| {
                                let kind = event_target_value(&ev);
                                modal.update(|m| m.form.kind = kind);
                            }
                        >
                            {TARGET_KINDS.iter().map(|k| view! {
                                <option value=*k>{*k}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    {text_input(modal, "Namespace", "default", |f| &f.namespace, |f| &mut f.namespace)}
                    {text_input(modal, "Selector", "app=web", |f| &f.selector, |f| &mut f.selector)}

                    <ModalFooter
                        on_cancel=close
                        on_submit=move || app.submit_target()
                        submit_label="Create Target"
                    />
                </div>
            </div>
        </Show>
    }
}
