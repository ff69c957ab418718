//! Pokedex Proxy - a caching front for the PokeAPI creature catalog
//!
//! Re-exposes the upstream list and detail endpoints with page-number
//! pagination, caching the total count, each item and each assembled page.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ProxyError, Result};
pub use tasks::spawn_cleanup_task;
