//! Services Module
//!
//! Catalog logic between the HTTP layer and the upstream API.

mod assembler;
mod detail;
pub mod pagination;


pub use assembler::{AssemblerSettings, PageAssembler};
pub use detail::DetailResolver;
pub use pagination::Pagination;
