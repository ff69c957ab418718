//! Cache key builders.

/// Key holding the upstream total item count.
pub const TOTAL_COUNT: &str = "total_count";

/// Key for one normalized item.
pub fn detail(id: i64) -> String {
    format!("pokeapi_detail_{}", id)
}

/// Key for an assembled page, addressed by the upstream window it covers.
pub fn page(offset: u64, limit: u64) -> String {
    format!("pokeapi_list_offset_{}_limit_{}", offset, limit)
}
