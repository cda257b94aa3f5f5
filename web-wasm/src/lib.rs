//! PhilReviews browser (Leptos + WASM)

mod analytics;
mod app;
mod components;
mod url_sync;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
