//! SmartCart Frontend Entry Point

mod app;
mod camera;
mod client_store;
mod commands;
mod components;
mod config;
mod context;
mod logger;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = logger::init(logger::default_level()) {
        web_sys::console::error_1(&format!("[APP] logger init failed: {}", e).into());
    }
    mount_to_body(App);
}
