//! chaosdash-frontend: Leptos dashboard for chaos experiments.

mod app;
mod modals;
mod state;
mod tables;
mod transport;
mod views;

use leptos::prelude::*;

fn main() {
    let debug_enabled = state::stored_debug_flag();

    let level = if debug_enabled {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();
    mount_to_body(move || view! { <app::App debug_enabled=debug_enabled /> });
}
