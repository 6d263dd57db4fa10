pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;

use once_cell::sync::OnceCell;
use wasm_bindgen::prelude::wasm_bindgen;

static MOUNTED: OnceCell<()> = OnceCell::new();

/// Single entry point: sets up logging and mounts the app. Later calls are
/// ignored, so the page never ends up with two sets of handlers.
#[wasm_bindgen]
pub fn hydrate() {
    if MOUNTED.set(()).is_err() {
        log::warn!("hydrate() called again, app is already mounted");
        return;
    }

    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
