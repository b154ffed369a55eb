use std::path::PathBuf;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{health, list_locations, send_location, AppState},
};

/// Build the application router: the two JSON routes, a health endpoint,
/// and a static fallback that serves the frontend bundle with a
/// single-page-app index fallback for unknown paths.
pub fn build(config: &Config, state: AppState) -> anyhow::Result<Router> {
    let origin: HeaderValue = config
        .client_url
        .parse()
        .with_context(|| format!("invalid CLIENT_URL: {}", config.client_url))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let static_dir = PathBuf::from(&config.static_dir);
    let frontend =
        ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Ok(Router::new()
        .route("/send-location", post(send_location))
        .route("/locations", get(list_locations))
        .route("/health", get(health))
        .fallback_service(frontend)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
