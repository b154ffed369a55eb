use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored location entry. Immutable once created; the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

/// Latitude must be a finite number within [-90, 90] degrees.
pub fn valid_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

/// Longitude must be a finite number within [-180, 180] degrees.
pub fn valid_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(valid_latitude(45.0));
        assert!(valid_longitude(90.0));
        assert!(valid_latitude(0.0));
        assert!(valid_longitude(0.0));
    }

    #[test]
    fn test_boundary_latitude() {
        assert!(valid_latitude(90.0));
        assert!(valid_latitude(-90.0));
        assert!(!valid_latitude(90.001));
        assert!(!valid_latitude(-90.001));
    }

    #[test]
    fn test_boundary_longitude() {
        assert!(valid_longitude(180.0));
        assert!(valid_longitude(-180.0));
        assert!(!valid_longitude(180.001));
        assert!(!valid_longitude(-180.001));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(!valid_latitude(91.0));
        assert!(!valid_longitude(-181.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(!valid_latitude(f64::NAN));
        assert!(!valid_latitude(f64::INFINITY));
        assert!(!valid_latitude(f64::NEG_INFINITY));
        assert!(!valid_longitude(f64::NAN));
        assert!(!valid_longitude(f64::INFINITY));
        assert!(!valid_longitude(f64::NEG_INFINITY));
    }

    #[test]
    fn test_record_serializes_with_mongo_field_names() {
        let record = LocationRecord {
            id: "65f0123456789abcdef01234".to_string(),
            latitude: 37.7749,
            longitude: -122.4194,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["_id"], "65f0123456789abcdef01234");
        assert_eq!(json["latitude"], 37.7749);
        assert!(json["createdAt"].is_string());
    }
}
