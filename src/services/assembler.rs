//! Page Assembler
//!
//! Builds a page of items from the upstream list endpoint. Three cache layers
//! are involved: the total count (long TTL), each item's detail (through
//! [`DetailResolver`]) and the assembled page keyed by its upstream window.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use url::Url;

use super::{DetailResolver, Pagination};
use crate::cache::{get_json, keys, set_json, KeyValueCache};
use crate::error::{ProxyError, Result};
use crate::models::{
    Page, PageEntry, Placeholder, DETAILS_PROCESSING_FAILED, DETAILS_UNAVAILABLE, UNKNOWN_NAME,
};
use crate::upstream::CatalogApi;

/// TTLs and fan-out width for [`PageAssembler`].
#[derive(Debug, Clone, Copy)]
pub struct AssemblerSettings {
    pub page_ttl: Duration,
    pub count_ttl: Duration,
    /// Detail fetches in flight per page; 1 fetches strictly in order
    pub detail_concurrency: usize,
}

pub struct PageAssembler {
    upstream: Arc<dyn CatalogApi>,
    cache: Arc<dyn KeyValueCache>,
    resolver: Arc<DetailResolver>,
    settings: AssemblerSettings,
}

impl PageAssembler {
    pub fn new(
        upstream: Arc<dyn CatalogApi>,
        cache: Arc<dyn KeyValueCache>,
        resolver: Arc<DetailResolver>,
        settings: AssemblerSettings,
    ) -> Self {
        Self {
            upstream,
            cache,
            resolver,
            settings,
        }
    }

    /// Upstream total count, cached under [`keys::TOTAL_COUNT`].
    ///
    /// A miss issues a one-item list call purely to read `count`.
    pub async fn total_count(&self) -> Result<u64> {
        if let Some(count) = get_json::<u64>(self.cache.as_ref(), keys::TOTAL_COUNT).await {
            return Ok(count);
        }

        info!("Fetching total count from upstream");
        let count = self
            .upstream
            .fetch_list(0, 1)
            .await
            .map_err(|e| {
                ProxyError::UpstreamUnavailable(format!(
                    "Could not fetch total item count from external API: {}",
                    e
                ))
            })?
            .count;

        set_json(self.cache.as_ref(), keys::TOTAL_COUNT, &count, self.settings.count_ttl).await;
        info!("Cached total count: {}", count);
        Ok(count)
    }

    /// Assembles page `requested_page` of `page_size` items.
    ///
    /// `request_url` is the absolute URL the client called; pagination links
    /// are derived from it. Any failure before the item list is known aborts
    /// the request; failures of individual items become placeholders.
    pub async fn list_page(
        &self,
        requested_page: u64,
        page_size: u64,
        request_url: &Url,
    ) -> Result<Page> {
        let count = self.total_count().await?;
        if count == 0 {
            return Ok(Page::empty());
        }

        let pagination = Pagination::new(requested_page, page_size, count);
        let (offset, limit) = (pagination.offset(), pagination.limit());
        let cache_key = keys::page(offset, limit);

        if let Some(page) = get_json::<Page>(self.cache.as_ref(), &cache_key).await {
            debug!(
                "Serving list page (offset={}, limit={}) from cache",
                offset, limit
            );
            return Ok(page);
        }

        let list = self.upstream.fetch_list(offset, limit).await.map_err(|e| {
            ProxyError::UpstreamUnavailable(format!(
                "Could not fetch list data from external API: {}",
                e
            ))
        })?;

        let references: Vec<(i64, Option<String>)> = list
            .results
            .into_iter()
            .filter_map(|reference| match reference.id() {
                Some(id) => Some((id, reference.name)),
                None => {
                    warn!(
                        "Could not parse ID from URL: {}",
                        reference.url.as_deref().unwrap_or("<missing>")
                    );
                    None
                }
            })
            .collect();

        let results: Vec<PageEntry> = stream::iter(references)
            .map(|(id, name)| self.resolve_entry(id, name))
            .buffered(self.settings.detail_concurrency.max(1))
            .collect()
            .await;

        let page = Page {
            count,
            next: pagination.next_link(request_url),
            previous: pagination.previous_link(request_url),
            results,
        };

        set_json(self.cache.as_ref(), &cache_key, &page, self.settings.page_ttl).await;
        info!("Cached formatted list response with key: {}", cache_key);

        Ok(page)
    }

    async fn resolve_entry(&self, id: i64, name: Option<String>) -> PageEntry {
        match self.resolver.resolve(id).await {
            Ok(item) => PageEntry::Item(item),
            Err(err) => {
                warn!("Error fetching detail {} for list: {}", id, err);
                let marker = if err.is_upstream() {
                    DETAILS_UNAVAILABLE
                } else {
                    DETAILS_PROCESSING_FAILED
                };
                PageEntry::Unavailable(Placeholder {
                    id,
                    name: name
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                    error: marker.to_string(),
                })
            }
        }
    }
}
