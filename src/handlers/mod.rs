pub mod locations;

use std::sync::Arc;

use axum::{response::IntoResponse, Json};

use crate::services::LocationStore;

pub use locations::{list_locations, send_location};

/// Shared handler state: the one storage handle reused by every request for
/// the process lifetime, injected at router construction.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LocationStore>,
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "location-tracker",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
