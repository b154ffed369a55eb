use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, IndexModel};
use tracing::debug;

use crate::models::LocationRecord;

const COLLECTION_NAME: &str = "locations";
const DEFAULT_DATABASE: &str = "location-tracker";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("malformed location document: {0}")]
    MalformedDocument(String),
}

/// Storage operations for location records. Handlers depend on this trait
/// rather than the MongoDB client so tests can substitute an in-memory store.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Persist a new record with a store-assigned creation timestamp and id.
    async fn create(&self, latitude: f64, longitude: f64) -> Result<LocationRecord, StorageError>;

    /// The `limit` most recently created records, newest first. An empty
    /// collection yields an empty vec, not an error.
    async fn list_recent(&self, limit: i64) -> Result<Vec<LocationRecord>, StorageError>;
}

pub struct MongoLocationStore {
    collection: Collection<Document>,
}

impl MongoLocationStore {
    /// Uses the database named in the connection string, falling back to
    /// `location-tracker` when the URI does not name one.
    pub fn new(client: &Client) -> Self {
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// Descending index on `createdAt` so the recent-10 query stays a
    /// bounded index scan.
    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        let index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl LocationStore for MongoLocationStore {
    async fn create(&self, latitude: f64, longitude: f64) -> Result<LocationRecord, StorageError> {
        let created_at = mongodb::bson::DateTime::now();
        let document = doc! {
            "latitude": latitude,
            "longitude": longitude,
            "createdAt": created_at,
        };

        let result = self.collection.insert_one(document).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StorageError::MalformedDocument("insert did not return an ObjectId".to_string())
        })?;

        debug!(id = %id, latitude, longitude, "location stored");

        Ok(LocationRecord {
            id: id.to_hex(),
            latitude,
            longitude,
            created_at: to_chrono(created_at)?,
        })
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<LocationRecord>, StorageError> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?;

        let mut records = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            records.push(record_from_document(document)?);
        }
        Ok(records)
    }
}

fn record_from_document(document: Document) -> Result<LocationRecord, StorageError> {
    let malformed = |e: mongodb::bson::document::ValueAccessError| {
        StorageError::MalformedDocument(e.to_string())
    };

    Ok(LocationRecord {
        id: document.get_object_id("_id").map_err(malformed)?.to_hex(),
        latitude: document.get_f64("latitude").map_err(malformed)?,
        longitude: document.get_f64("longitude").map_err(malformed)?,
        created_at: to_chrono(*document.get_datetime("createdAt").map_err(malformed)?)?,
    })
}

fn to_chrono(value: mongodb::bson::DateTime) -> Result<DateTime<Utc>, StorageError> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        StorageError::MalformedDocument(format!("timestamp out of range: {}", value))
    })
}
