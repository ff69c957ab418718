//! Request DTOs for the catalog API
//!
//! Query parameters are kept as raw strings so malformed values fall back to
//! defaults instead of rejecting the request. A repeated parameter keeps its
//! last value.

/// Query string of `GET /api/pokemon/`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: Option<String>,
    /// Items per page
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Builds the query from decoded `key=value` pairs; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |mut query, (key, value)| {
                match key.as_str() {
                    "page" => query.page = Some(value),
                    "page_size" => query.page_size = Some(value),
                    _ => {}
                }
                query
            })
    }

    /// Requested page number; absent or unparseable means the first page.
    pub fn page_number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|page| page.max(1) as u64)
            .unwrap_or(1)
    }

    /// Requested page size clamped to `[1, max]`; absent or unparseable means `default`.
    pub fn page_size(&self, default: u64, max: u64) -> u64 {
        let max = max.max(1);
        self.page_size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|size| size.clamp(1, max as i64) as u64)
            .unwrap_or_else(|| default.clamp(1, max))
    }
}
