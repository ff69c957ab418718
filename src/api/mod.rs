//! API Module
//!
//! HTTP handlers and routing for the catalog proxy.
//!
//! # Endpoints
//! - `GET /` - Redirect to the list endpoint
//! - `GET /api/pokemon/` - Paginated, cached list of items
//! - `GET /api/pokemon/:id/` - One cached item
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
