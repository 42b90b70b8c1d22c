//! Application state shared through context, and the glue that feeds
//! handler outcomes back into it.

use std::rc::Rc;

use chaosdash_core::actions::{self, load_context, Detail};
use chaosdash_core::forms::{ExperimentForm, Modal, TargetForm};
use chaosdash_core::render::RowEvent;
use chaosdash_core::render::RowAction;
use chaosdash_core::router::LoadPlan;
use chaosdash_core::{
    ApiClient, DashboardConfig, Experiment, Loader, Notice, Outcome, Panel, Router, Target, View,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::transport::GlooTransport;

pub type Client = ApiClient<GlooTransport>;

const NOTICE_MS: u32 = 5_000;
const DEBUG_KEY: &str = "debug_enabled";

/// Browser console log level toggle. Read once at start-up; changes apply on
/// the next page load.
#[derive(Clone, Copy)]
pub struct DebugLogs(pub RwSignal<bool>);

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn parse_debug_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

pub fn stored_debug_flag() -> bool {
    let value = local_storage().and_then(|s| s.get_item(DEBUG_KEY).ok().flatten());
    parse_debug_flag(value.as_deref())
}

pub fn store_debug_flag(enabled: bool) {
    let Some(storage) = local_storage() else {
        log::warn!("local storage unavailable; debug setting not saved");
        return;
    };
    let _ = storage.set_item(DEBUG_KEY, if enabled { "true" } else { "false" });
}

#[derive(Clone, Copy)]
pub struct AppState {
    client: StoredValue<Rc<Client>, LocalStorage>,
    pub router: RwSignal<Router>,
    /// Dashboard loader: every experiment, for the summary and recent table.
    pub recent: RwSignal<Panel<Experiment>>,
    pub experiments: RwSignal<Panel<Experiment>>,
    pub targets: RwSignal<Panel<Target>>,
    /// Targets offered by the experiment form's dropdown.
    pub target_choices: RwSignal<Vec<Target>>,
    pub notices: RwSignal<Vec<(u64, Notice)>>,
    next_notice: StoredValue<u64>,
    pub detail: RwSignal<Option<Detail>>,
    pub experiment_modal: RwSignal<Modal<ExperimentForm>>,
    pub target_modal: RwSignal<Modal<TargetForm>>,
    /// A create request is in flight.
    pub submitting: RwSignal<bool>,
}

pub fn use_app() -> AppState {
    use_context::<AppState>().expect("AppState not provided")
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            client: StoredValue::new_local(Rc::new(Client::new(GlooTransport, config))),
            router: RwSignal::new(Router::new()),
            recent: RwSignal::new(Panel::default()),
            experiments: RwSignal::new(Panel::default()),
            targets: RwSignal::new(Panel::default()),
            target_choices: RwSignal::new(Vec::new()),
            notices: RwSignal::new(Vec::new()),
            next_notice: StoredValue::new(0),
            detail: RwSignal::new(None),
            experiment_modal: RwSignal::new(Modal::default()),
            target_modal: RwSignal::new(Modal::default()),
            submitting: RwSignal::new(false),
        }
    }

    pub fn configure(self, config: &DashboardConfig) {
        self.client
            .set_value(Rc::new(Client::new(GlooTransport, config)));
    }

    fn client(self) -> Rc<Client> {
        self.client.get_value()
    }

    // ─── Navigation & loaders ────────────────────────────────────────────────

    pub fn navigate(self, view: View) {
        let Some(nav) = self.router.try_update(|r| r.navigate_to(view)) else {
            return;
        };
        match nav.plan {
            LoadPlan::Run(loaders) => loaders.iter().for_each(|l| self.run_loader(*l)),
            LoadPlan::Unimplemented => log::warn!("{} view has no loader yet", view.title()),
            LoadPlan::Nothing => {}
        }
    }

    /// Rerun the showing view's loaders, dropping any still in flight.
    pub fn reload_active(self) {
        let nav = self.router.try_update(|r| r.reload());
        if let Some(LoadPlan::Run(loaders)) = nav.map(|n| n.plan) {
            loaders.iter().for_each(|l| self.run_loader(*l));
        }
    }

    pub fn run_loader(self, loader: Loader) {
        let ticket = self.router.with_untracked(|r| r.ticket(loader));
        let router = self.router;
        let client = self.client();
        let context = load_context(loader);

        match loader {
            Loader::Dashboard | Loader::Experiments => {
                let panel = if loader == Loader::Dashboard {
                    self.recent
                } else {
                    self.experiments
                };
                panel.update(|p| p.begin());
                spawn_local(async move {
                    let result = client.list_experiments().await;
                    let current = router.with_untracked(|r| r.is_current(&ticket));
                    let mut notice = None;
                    panel.update(|p| notice = p.settle(result, current, context));
                    if let Some(n) = notice {
                        self.notify(n);
                    }
                });
            }
            Loader::Targets => {
                let panel = self.targets;
                panel.update(|p| p.begin());
                spawn_local(async move {
                    let result = client.list_targets().await;
                    if let Ok(targets) = &result {
                        self.target_choices.set(targets.clone());
                    }
                    let current = router.with_untracked(|r| r.is_current(&ticket));
                    let mut notice = None;
                    panel.update(|p| notice = p.settle(result, current, context));
                    if let Some(n) = notice {
                        self.notify(n);
                    }
                });
            }
        }
    }

    /// Refresh the experiment form's target dropdown regardless of the view.
    pub fn refresh_target_choices(self) {
        let client = self.client();
        spawn_local(async move {
            match client.list_targets().await {
                Ok(targets) => self.target_choices.set(targets),
                Err(e) => self.notify(Notice::from_error(load_context(Loader::Targets), &e)),
            }
        });
    }

    // ─── Outcomes ────────────────────────────────────────────────────────────

    pub fn notify(self, notice: Notice) {
        let id = self.next_notice.get_value();
        self.next_notice.set_value(id + 1);
        let dismisses_itself = notice.dismisses_itself();
        self.notices.update(|n| n.push((id, notice)));
        if dismisses_itself {
            spawn_local(async move {
                TimeoutFuture::new(NOTICE_MS).await;
                self.dismiss(id);
            });
        }
    }

    pub fn dismiss(self, id: u64) {
        self.notices.update(|n| n.retain(|(i, _)| *i != id));
    }

    pub fn apply(self, outcome: Outcome) {
        if let Some(notice) = outcome.notice {
            self.notify(notice);
        }
        if let Some(detail) = outcome.detail {
            self.detail.set(Some(detail));
        }
        for loader in outcome.reload {
            self.run_loader(loader);
        }
    }

    // ─── Forms ───────────────────────────────────────────────────────────────

    pub fn open_experiment_modal(self) {
        self.experiment_modal.update(|m| m.show());
        self.refresh_target_choices();
    }

    pub fn submit_experiment(self) {
        let request = self.experiment_modal.with_untracked(|m| m.form.to_request());
        let client = self.client();
        self.submitting.set(true);
        spawn_local(async move {
            let outcome = actions::create_experiment(&client, request).await;
            self.experiment_modal.update(|m| m.settle(outcome.succeeded));
            self.submitting.set(false);
            self.apply(outcome);
        });
    }

    pub fn submit_target(self) {
        let request = self.target_modal.with_untracked(|m| m.form.to_request());
        let client = self.client();
        self.submitting.set(true);
        spawn_local(async move {
            let outcome = actions::create_target(&client, request).await;
            self.target_modal.update(|m| m.settle(outcome.succeeded));
            self.submitting.set(false);
            self.apply(outcome);
        });
    }

    // ─── Row actions ─────────────────────────────────────────────────────────

    pub fn dispatch_experiment(self, event: RowEvent) {
        let client = self.client();
        spawn_local(async move {
            let outcome = match event.action {
                RowAction::View => actions::view_experiment(&client, &event.id).await,
                RowAction::Execute => actions::execute_experiment(&client, &event.id).await,
                RowAction::Stop => actions::stop_experiment(&client, &event.id).await,
                RowAction::Delete => {
                    actions::delete_experiment(&client, &browser_confirm, &event.id).await
                }
            };
            self.apply(outcome);
        });
    }

    pub fn dispatch_target(self, event: RowEvent) {
        let client = self.client();
        spawn_local(async move {
            let outcome = match event.action {
                RowAction::View => actions::view_target(&client, &event.id).await,
                RowAction::Delete => {
                    actions::delete_target(&client, &browser_confirm, &event.id).await
                }
                other => {
                    log::warn!("targets have no {} action", other.as_str());
                    return;
                }
            };
            self.apply(outcome);
        });
    }
}

fn browser_confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Resolve a click inside a table body to the action button it hit.
pub fn row_event(ev: &web_sys::MouseEvent) -> Option<RowEvent> {
    let element = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let button = element.closest("[data-action]").ok()??;
    RowEvent::from_attrs(
        button.get_attribute("data-action").as_deref(),
        button.get_attribute("data-id").as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_needs_literal_true() {
        assert!(parse_debug_flag(Some("true")));
        assert!(!parse_debug_flag(Some("false")));
        assert!(!parse_debug_flag(Some("TRUE")));
        assert!(!parse_debug_flag(None));
    }
}
