pub mod location;
pub mod requests;

// Re-export commonly used types
pub use location::LocationRecord;
pub use requests::{ErrorResponse, SendLocationRequest, SendLocationResponse};
