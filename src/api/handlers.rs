//! API Handlers
//!
//! HTTP request handlers for the catalog and operational endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use url::Url;

use crate::cache::{KeyValueCache, SharedCache};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{HealthResponse, Item, ListQuery, Page, StatsResponse};
use crate::services::{AssemblerSettings, DetailResolver, PageAssembler};
use crate::upstream::{CatalogApi, PokeApiClient};

/// Path of the list endpoint; the root redirects here.
pub const LIST_PATH: &str = "/api/pokemon/";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide cache, also swept by the cleanup task
    pub cache: SharedCache,
    pub resolver: Arc<DetailResolver>,
    pub assembler: Arc<PageAssembler>,
    pub default_page_size: u64,
    pub max_page_size: u64,
    /// Origin for absolute pagination links; request Host when unset
    pub public_base_url: Option<String>,
}

impl AppState {
    /// Wires the services around an upstream client and a cache.
    pub fn new(config: &Config, upstream: Arc<dyn CatalogApi>, cache: SharedCache) -> Self {
        let kv: Arc<dyn KeyValueCache> = Arc::new(cache.clone());
        let resolver = Arc::new(DetailResolver::new(
            upstream.clone(),
            kv.clone(),
            config.cache_ttl(),
        ));
        let assembler = Arc::new(PageAssembler::new(
            upstream,
            kv,
            resolver.clone(),
            AssemblerSettings {
                page_ttl: config.cache_ttl(),
                count_ttl: config.count_ttl(),
                detail_concurrency: config.detail_concurrency,
            },
        ));

        Self {
            cache,
            resolver,
            assembler,
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Creates a new AppState from configuration, talking to the configured upstream.
    pub fn from_config(config: &Config) -> Result<Self> {
        let upstream = PokeApiClient::new(&config.upstream_base_url, config.upstream_timeout())?;
        let cache = SharedCache::with_capacity(config.max_entries);
        Ok(Self::new(config, Arc::new(upstream), cache))
    }

    /// Absolute URL of the current request, used as the base for page links.
    fn request_url(&self, headers: &HeaderMap, uri: &Uri) -> Result<Url> {
        let origin = match &self.public_base_url {
            Some(base) => base.clone(),
            None => {
                let host = headers
                    .get(header::HOST)
                    .and_then(|h| h.to_str().ok())
                    .unwrap_or("localhost");
                format!("http://{}", host)
            }
        };
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or(LIST_PATH);

        Url::parse(&format!("{}{}", origin, path_and_query))
            .map_err(|e| ProxyError::Internal(format!("cannot build request URL: {}", e)))
    }
}

/// Handler for GET /api/pokemon/
///
/// Returns one page of items; `page` and `page_size` come from the query string.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<Page>> {
    let query = ListQuery::from_pairs(pairs);
    let page_size = query.page_size(state.default_page_size, state.max_page_size);
    let request_url = state.request_url(&headers, &uri)?;

    let page = state
        .assembler
        .list_page(query.page_number(), page_size, &request_url)
        .await?;

    Ok(Json(page))
}

/// Handler for GET /api/pokemon/:id/
pub async fn detail_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Item>> {
    let id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ProxyError::InvalidId(raw_id.clone()))?;

    let item = state.resolver.resolve(id).await?;
    Ok(Json(item))
}

/// Handler for GET /
pub async fn root_redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, LIST_PATH)]).into_response()
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
