use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

use crate::models::{
    location::{valid_latitude, valid_longitude},
    ErrorResponse, SendLocationRequest, SendLocationResponse,
};

use super::AppState;

/// How many entries `GET /locations` returns.
const RECENT_LIMIT: i64 = 10;

/// Handle `POST /send-location`.
///
/// Validation order, first failure wins: missing/null fields, then latitude,
/// then longitude. Wrong-typed coordinates (strings, booleans) flow through
/// the same ladder as out-of-range numbers; only a body that is not valid
/// JSON at all maps to the extractor's own 400.
pub async fn send_location(
    State(state): State<AppState>,
    payload: Result<Json<SendLocationRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!(%rejection, "rejected unparseable location payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid JSON format")),
            )
                .into_response();
        }
    };

    let received = json!({ "latitude": &body.latitude, "longitude": &body.longitude });
    let Some((latitude_raw, longitude_raw)) = body.coordinates() else {
        return validation_failure("Missing required fields", received);
    };

    let latitude = match latitude_raw.as_f64() {
        Some(value) if valid_latitude(value) => value,
        _ => return validation_failure("Invalid latitude value", latitude_raw),
    };
    let longitude = match longitude_raw.as_f64() {
        Some(value) if valid_longitude(value) => value,
        _ => return validation_failure("Invalid longitude value", longitude_raw),
    };

    match state.store.create(latitude, longitude).await {
        Ok(location) => (
            StatusCode::CREATED,
            Json(SendLocationResponse::saved(location)),
        )
            .into_response(),
        Err(e) => {
            error!("failed to save location: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::storage(
                    "Failed to save location",
                    e.to_string(),
                )),
            )
                .into_response()
        }
    }
}

/// Handle `GET /locations`: the ten most recent entries, newest first. An
/// empty store yields an empty array.
pub async fn list_locations(State(state): State<AppState>) -> Response {
    match state.store.list_recent(RECENT_LIMIT).await {
        Ok(locations) => Json(locations).into_response(),
        Err(e) => {
            error!("failed to fetch locations: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::storage(
                    "Failed to fetch locations",
                    e.to_string(),
                )),
            )
                .into_response()
        }
    }
}

fn validation_failure(error: &str, received: serde_json::Value) -> Response {
    debug!(error, %received, "rejected invalid location payload");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::validation(error, received)),
    )
        .into_response()
}
