//! View routing.
//!
//! Exactly one view is active at a time. `navigate_to` switches synchronously
//! and hands back the loaders the caller must start; the loaders themselves
//! run asynchronously and carry a [`LoadTicket`] so a result that arrives after
//! the user moved on can be dropped instead of rendered into a hidden view.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    Experiments,
    Targets,
    Results,
    Settings,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Experiments,
        View::Targets,
        View::Results,
        View::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Experiments => "Experiments",
            View::Targets => "Targets",
            View::Results => "Results",
            View::Settings => "Settings",
        }
    }

    /// What entering this view loads.
    pub fn load_plan(&self) -> LoadPlan {
        match self {
            View::Dashboard => LoadPlan::Run(&[Loader::Dashboard]),
            View::Experiments => LoadPlan::Run(&[Loader::Experiments]),
            View::Targets => LoadPlan::Run(&[Loader::Targets]),
            View::Results => LoadPlan::Unimplemented,
            View::Settings => LoadPlan::Nothing,
        }
    }
}

/// Collection fetch + re-render of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loader {
    /// Summary cards and the recent-experiments table.
    Dashboard,
    /// Full experiment table.
    Experiments,
    /// Target table and the target dropdown of the experiment form.
    Targets,
}

impl Loader {
    /// The view whose content this loader renders.
    pub fn view(&self) -> View {
        match self {
            Loader::Dashboard => View::Dashboard,
            Loader::Experiments => View::Experiments,
            Loader::Targets => View::Targets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPlan {
    Run(&'static [Loader]),
    /// The view exists but has no loader yet; the UI must say so.
    Unimplemented,
    Nothing,
}

impl LoadPlan {
    pub fn loaders(&self) -> &'static [Loader] {
        match self {
            LoadPlan::Run(loaders) => loaders,
            _ => &[],
        }
    }
}

/// Identifies the navigation a loader was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub loader: Loader,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub view: View,
    pub plan: LoadPlan,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Router {
    active: View,
    generation: u64,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    /// The single navigation entry carrying the active marker.
    pub fn is_active(&self, view: View) -> bool {
        self.active == view
    }

    pub fn navigate_to(&mut self, view: View) -> Navigation {
        debug!(from = ?self.active, to = ?view, "navigate");
        self.active = view;
        self.generation += 1;
        Navigation {
            view,
            plan: view.load_plan(),
        }
    }

    /// Navigate to the view already showing. Loads started before this are
    /// dropped, so a client swapped in meanwhile refetches from scratch.
    pub fn reload(&mut self) -> Navigation {
        self.navigate_to(self.active)
    }

    /// Ticket for a loader started now (on navigation or after a mutation).
    pub fn ticket(&self, loader: Loader) -> LoadTicket {
        LoadTicket {
            loader,
            generation: self.generation,
        }
    }

    /// A loader result may be applied only while its view is still showing
    /// and no navigation happened since it started.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && ticket.loader.view() == self.active
    }
}
