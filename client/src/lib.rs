//! # client
//!
//! Leptos + WASM frontend for the ClinicCare consultation tool.
//!
//! This crate holds the session store, the navigation guard, the REST
//! transport, and the route-level pages. Browser-only code is gated behind
//! the `csr` feature so the store, guard, and transport logic run natively
//! under `cargo test`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Browser entry point: install the panic hook and console logger, then
/// mount the root component.
#[cfg(feature = "csr")]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
