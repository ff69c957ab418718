//! HTTP client for the upstream catalog API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info};
use url::Url;

use super::{CatalogApi, ListResponse};
use crate::config::normalize_base_url;
use crate::error::{ProxyError, Result};

const USER_AGENT: &str = concat!("pokedex_proxy/", env!("CARGO_PKG_VERSION"));

/// [`CatalogApi`] over HTTP. No retries: one failed call is one failed result.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: Url,
}

impl PokeApiClient {
    /// Builds a client rooted at `base_url` (e.g. `https://pokeapi.co/api/v2/`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(&normalize_base_url(base_url))
            .map_err(|e| ProxyError::Internal(format!("invalid upstream base URL: {}", e)))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProxyError::Internal(format!("could not build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ProxyError::Internal(format!("invalid upstream path {}: {}", path, e)))
    }

    async fn get(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ProxyError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CatalogApi for PokeApiClient {
    async fn fetch_list(&self, offset: u64, limit: u64) -> Result<ListResponse> {
        let mut url = self.endpoint("pokemon/")?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());

        info!("Fetching list window offset={} limit={} from upstream", offset, limit);
        self.get(url)
            .await?
            .json::<ListResponse>()
            .await
            .map_err(|e| ProxyError::MalformedUpstream(format!("list response: {}", e)))
    }

    async fn fetch_detail(&self, id: i64) -> Result<serde_json::Value> {
        let url = self.endpoint(&format!("pokemon/{}/", id))?;

        info!("Fetching detail {} from upstream", id);
        self.get(url)
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProxyError::MalformedUpstream(format!("detail {}: {}", id, e)))
    }
}
