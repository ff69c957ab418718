//! Catalog domain models
//!
//! [`Item`] is the flat record this service exposes. [`Page`] is the
//! page-number pagination envelope around a slice of items.

use serde::{Deserialize, Serialize};

use crate::error::{ProxyError, Result};

/// Marker used when an entry's detail could not be fetched from upstream.
pub const DETAILS_UNAVAILABLE: &str = "Details unavailable";

/// Marker used when an entry's detail was fetched but could not be normalized.
pub const DETAILS_PROCESSING_FAILED: &str = "Details processing failed";

/// Placeholder name for a list entry that arrived without one.
pub const UNKNOWN_NAME: &str = "Unknown";

// == Item ==
/// A creature, flattened from the upstream detail document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    /// Type names in upstream slot order
    pub types: Vec<String>,
    /// URL of the default front sprite
    #[serde(rename = "front_default_sprite")]
    pub front_sprite: Option<String>,
}

/// The subset of the upstream detail document that [`Item`] is built from.
#[derive(Debug, Deserialize)]
struct RawDetail {
    id: i64,
    name: String,
    #[serde(default)]
    height: Option<i64>,
    #[serde(default)]
    weight: Option<i64>,
    #[serde(default)]
    types: Option<Vec<RawTypeSlot>>,
    #[serde(default)]
    sprites: Option<RawSprites>,
}

#[derive(Debug, Deserialize)]
struct RawTypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawSprites {
    #[serde(default)]
    front_default: Option<String>,
}

impl Item {
    /// Normalizes an upstream detail document.
    ///
    /// `types` and `sprites` may be absent or null; `id` and `name` may not.
    pub fn from_detail(raw: serde_json::Value) -> Result<Self> {
        let detail: RawDetail = serde_json::from_value(raw)
            .map_err(|e| ProxyError::MalformedUpstream(e.to_string()))?;

        Ok(Self {
            id: detail.id,
            name: detail.name,
            height: detail.height,
            weight: detail.weight,
            types: detail
                .types
                .unwrap_or_default()
                .into_iter()
                .map(|slot| slot.kind.name)
                .collect(),
            front_sprite: detail.sprites.and_then(|s| s.front_default),
        })
    }
}

// == Placeholder ==
/// Stand-in for a list entry whose detail could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: i64,
    pub name: String,
    pub error: String,
}

/// One slot of a page's `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageEntry {
    // Placeholder first: an Item document never carries `error`.
    Unavailable(Placeholder),
    Item(Item),
}

impl PageEntry {
    pub fn id(&self) -> i64 {
        match self {
            PageEntry::Item(item) => item.id,
            PageEntry::Unavailable(placeholder) => placeholder.id,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PageEntry::Unavailable(_))
    }
}

// == Page ==
/// Page-number pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Total number of items upstream, independent of this slice
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<PageEntry>,
}

impl Page {
    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}
