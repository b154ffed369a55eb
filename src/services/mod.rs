pub mod db;
pub mod store;

pub use store::{LocationStore, MongoLocationStore, StorageError};
