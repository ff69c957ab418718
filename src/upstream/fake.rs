//! In-memory [`CatalogApi`] used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::{CatalogApi, ItemReference, ListResponse};
use crate::error::{ProxyError, Result};

/// Serves `total` items with ids `1..=total`; records every call.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub total: u64,
    /// Ids whose detail fetch answers 404
    pub missing: HashSet<i64>,
    /// Ids whose detail fetch fails at the transport level
    pub broken: HashSet<i64>,
    /// Ids whose detail document lacks required fields
    pub malformed: HashSet<i64>,
    /// Raw detail overrides by id
    pub documents: HashMap<i64, serde_json::Value>,
    /// Entries with an unparseable URL inserted at the start of each list window
    pub bad_references: usize,
    /// Ids listed without a `name`
    pub nameless: HashSet<i64>,
    /// Ids followed in the list by entries that carry no usable `url`
    pub junk_after: HashSet<i64>,
    /// When set, every list call fails with this status
    pub list_status: Option<u16>,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub windows: Mutex<Vec<(u64, u64)>>,
}

impl FakeCatalog {
    pub fn with_total(total: u64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.detail_calls()
    }

    pub fn windows(&self) -> Vec<(u64, u64)> {
        self.windows.lock().unwrap().clone()
    }

    pub fn name_of(id: i64) -> String {
        format!("creature-{}", id)
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn fetch_list(&self, offset: u64, limit: u64) -> Result<ListResponse> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().unwrap().push((offset, limit));

        if let Some(status) = self.list_status {
            return Err(ProxyError::UpstreamStatus {
                status,
                url: "fake://pokemon/".to_string(),
            });
        }

        let mut results: Vec<ItemReference> = (0..self.bad_references)
            .map(|i| ItemReference {
                name: Some(format!("glitch-{}", i)),
                url: Some("fake://pokemon/not-a-number/".to_string()),
            })
            .collect();

        let end = (offset + limit).min(self.total);
        for id in (offset + 1..=end).map(|id| id as i64) {
            results.push(ItemReference {
                name: (!self.nameless.contains(&id)).then(|| Self::name_of(id)),
                url: Some(format!("fake://pokemon/{}/", id)),
            });
            if self.junk_after.contains(&id) {
                results.push(ItemReference {
                    name: Some("missingno".to_string()),
                    url: None,
                });
                results.push(ItemReference::default());
            }
        }

        Ok(ListResponse {
            count: self.total,
            results,
        })
    }

    async fn fetch_detail(&self, id: i64) -> Result<serde_json::Value> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        if self.missing.contains(&id) {
            return Err(ProxyError::UpstreamStatus {
                status: 404,
                url: format!("fake://pokemon/{}/", id),
            });
        }
        if self.broken.contains(&id) {
            return Err(ProxyError::UpstreamUnavailable("connection reset".to_string()));
        }
        if self.malformed.contains(&id) {
            return Ok(json!({ "species": "unknown" }));
        }
        if let Some(doc) = self.documents.get(&id) {
            return Ok(doc.clone());
        }

        Ok(json!({
            "id": id,
            "name": Self::name_of(id),
            "height": id * 2,
            "weight": id * 10,
            "types": [{ "slot": 1, "type": { "name": "normal" } }],
            "sprites": { "front_default": format!("http://sprites/{}.png", id) }
        }))
    }
}
