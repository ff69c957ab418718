//! Domain models and DTOs
//!
//! Catalog records plus the request/response bodies of the HTTP API.

pub mod item;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use item::{
    Item, Page, PageEntry, Placeholder, DETAILS_PROCESSING_FAILED, DETAILS_UNAVAILABLE,
    UNKNOWN_NAME,
};
pub use requests::ListQuery;
pub use responses::{HealthResponse, StatsResponse};
