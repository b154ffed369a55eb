use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::location::LocationRecord;

/// Body of `POST /send-location`. Coordinates deserialize as raw JSON values
/// so that an absent field and an explicit `null` are treated the same way,
/// and a wrong-typed value (e.g. a string) reaches the validation ladder
/// instead of failing at the extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct SendLocationRequest {
    #[serde(default)]
    pub latitude: Option<Value>,
    #[serde(default)]
    pub longitude: Option<Value>,
}

impl SendLocationRequest {
    /// Both coordinates present and non-null, as raw values.
    pub fn coordinates(self) -> Option<(Value, Value)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if !lat.is_null() && !lng.is_null() => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendLocationResponse {
    pub message: String,
    pub location: LocationRecord,
}

impl SendLocationResponse {
    pub fn saved(location: LocationRecord) -> Self {
        Self {
            message: "Location saved successfully".to_string(),
            location,
        }
    }
}

/// Error body shared by validation (400) and storage (500) failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    // Underlying storage message, only on 500s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    // Echo of the offending input, only on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<Value>,
}

impl ErrorResponse {
    pub fn validation(error: impl Into<String>, received: Value) -> Self {
        Self {
            error: error.into(),
            message: None,
            received: Some(received),
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            received: None,
        }
    }

    pub fn storage(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
            received: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let body: SendLocationRequest = serde_json::from_value(json!({})).unwrap();
        assert!(body.latitude.is_none());
        assert!(body.longitude.is_none());
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let body: SendLocationRequest =
            serde_json::from_value(json!({"latitude": null, "longitude": 10.0})).unwrap();
        assert!(body.latitude.is_none());
        assert!(body.coordinates().is_none());
    }

    #[test]
    fn test_wrong_typed_field_still_deserializes() {
        let body: SendLocationRequest =
            serde_json::from_value(json!({"latitude": "45", "longitude": 0.0})).unwrap();
        let (latitude, longitude) = body.coordinates().unwrap();
        assert_eq!(latitude, json!("45"));
        assert_eq!(longitude, json!(0.0));
    }

    #[test]
    fn test_error_response_omits_unused_fields() {
        let json = serde_json::to_value(ErrorResponse::validation(
            "Invalid latitude value",
            json!(91.0),
        ))
        .unwrap();
        assert_eq!(json["error"], "Invalid latitude value");
        assert_eq!(json["received"], 91.0);
        assert!(json.get("message").is_none());
    }
}
