use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::book::SearchResponse;
use crate::config::SearchConfig;


/// Anything that can answer a book search. The TUI talks to Open Library; tests plug in fakes.
pub trait BookSource: Send + Sync {
    fn search(&self, query: &str) -> Result<SearchResponse>;
}

pub struct OpenLibraryClient {
    client: Client,
    endpoint: String,
}

impl OpenLibraryClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        // the blocking client defaults to 30s, so None has to be passed explicitly
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl BookSource for OpenLibraryClient {
    fn search(&self, query: &str) -> Result<SearchResponse> {
        let url = search_url(&self.endpoint, query);
        debug!(url = %url, "Sending search request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .with_context(|| format!("Failed to send search request to {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Search endpoint returned status {}", status);
        }

        let body: SearchResponse = response
            .json()
            .context("Failed to decode search response")?;
        info!(query, docs = body.docs.len(), "Search response decoded");
        Ok(body)
    }
}

/// Builds `{endpoint}?q={query}` with the query percent-encoded.
pub fn search_url(endpoint: &str, query: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}q={}", endpoint, separator, urlencoding::encode(query))
}
