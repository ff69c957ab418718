//! Upstream Module
//!
//! The catalog API being proxied: its wire types, the [`CatalogApi`] port and
//! the reqwest-backed [`PokeApiClient`].

mod client;
#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

pub use client::PokeApiClient;

/// Lightweight list entry as returned by the upstream list endpoint.
///
/// Either field may be missing; an entry without a usable `url` has no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemReference {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ItemReference {
    /// Reads a list entry, keeping only string-valued fields.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);
        Self {
            name: field("name"),
            url: field("url"),
        }
    }

    /// Item id taken from the last numeric path segment of `url`.
    pub fn id(&self) -> Option<i64> {
        self.url
            .as_deref()?
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// One window of the upstream list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_references")]
    pub results: Vec<ItemReference>,
}

/// Decodes `results` entry by entry so one odd entry cannot fail the window.
fn lenient_references<'de, D>(deserializer: D) -> std::result::Result<Vec<ItemReference>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(ItemReference::from_value)
        .collect())
}

/// Read access to the upstream catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches `limit` references starting at `offset`, plus the total count.
    async fn fetch_list(&self, offset: u64, limit: u64) -> Result<ListResponse>;

    /// Fetches the raw detail document of one item.
    async fn fetch_detail(&self, id: i64) -> Result<serde_json::Value>;
}
