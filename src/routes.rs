//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client is a single-page app: its routes exist only in the browser.
//! Any path that is not a real file under the site directory is answered
//! with `index.html` so deep links like `/consultations/new` load the app,
//! which then applies its own navigation guard.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::HostConfig;

/// Build the host router for `config.site_dir`.
pub fn app(config: &HostConfig) -> Router {
    let index = config.site_dir.join("index.html");
    let site = ServeDir::new(&config.site_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index));

    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(site)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
