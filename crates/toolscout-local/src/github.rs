use crate::quality::filter_fresh;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use toolscout_core::{CandidateProvider, CandidateQuery, Error, Result, Tool};

/// Star floor baked into the live search query. Mirrors the floor used when
/// the static database was scraped, so both sources share a quality bar.
pub const MIN_STARS: u64 = 500;

/// Page size for one live search; the response is at most this long
/// post-filter.
pub const PAGE_SIZE: usize = 10;

fn timeout_ms_from_query(q: &CandidateQuery) -> u64 {
    // Search requests can hang indefinitely without an explicit timeout.
    // Keep a conservative cap even if callers pass something huge.
    q.timeout_ms.unwrap_or(20_000).clamp(1_000, 60_000)
}

fn github_token_from_env() -> Option<String> {
    std::env::var("TOOLSCOUT_GITHUB_TOKEN")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            std::env::var("GITHUB_TOKEN")
                .ok()
                .filter(|v| !v.trim().is_empty())
        })
}

fn github_endpoint_from_env() -> Option<String> {
    std::env::var("TOOLSCOUT_GITHUB_ENDPOINT")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Live candidate provider against the GitHub repository search API.
///
/// One outbound call per query, no retries, no cancellation; failures map to
/// [`Error::Upstream`] and are left to the orchestrator to degrade.
#[derive(Debug, Clone)]
pub struct GitHubSearchProvider {
    client: reqwest::Client,
    token: Option<String>,
}

impl GitHubSearchProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            token: github_token_from_env(),
        }
    }

    pub fn token_configured(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint() -> String {
        // Docs: https://api.github.com/search/repositories
        github_endpoint_from_env()
            .unwrap_or_else(|| "https://api.github.com/search/repositories".to_string())
    }

    /// Search query sent upstream: the problem text plus a star floor and an
    /// archival exclusion. The archival/recency side is re-validated locally
    /// by the quality filter; upstream is not fully trusted.
    pub fn search_query(problem: &str) -> String {
        format!("{problem} stars:>={MIN_STARS} archived:false")
    }
}

#[derive(Debug, Deserialize)]
struct RepoSearchResponse {
    items: Option<Vec<RepoItem>>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    name: String,
    full_name: Option<String>,
    description: Option<String>,
    html_url: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    topics: Vec<String>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    fork: bool,
}

impl RepoItem {
    fn into_tool(self) -> Tool {
        Tool {
            name: self.name,
            full_name: self.full_name,
            description: self.description.unwrap_or_default(),
            url: self.html_url,
            stars: self.stargazers_count,
            tags: self.topics,
            category: None,
            last_updated: self.updated_at,
            archived: self.archived,
        }
    }
}

#[async_trait::async_trait]
impl CandidateProvider for GitHubSearchProvider {
    fn name(&self) -> &'static str {
        "github-search"
    }

    async fn candidates(&self, q: &CandidateQuery) -> Result<Vec<Tool>> {
        let timeout_ms = timeout_ms_from_query(q);
        let per_page = q.max_results.unwrap_or(PAGE_SIZE).min(PAGE_SIZE);

        let mut req = self
            .client
            .get(Self::endpoint())
            .header("Accept", "application/vnd.github+json")
            .query(&[
                ("q", Self::search_query(&q.problem)),
                ("sort", "stars".to_string()),
                ("order", "desc".to_string()),
                ("per_page", per_page.to_string()),
            ]);
        if let Some(token) = self.token.as_deref() {
            req = req.bearer_auth(token);
        }

        let resp = req
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!("github search HTTP {status}")));
        }

        let parsed: RepoSearchResponse = resp
            .json()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        let fetched: Vec<Tool> = parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .filter(|r| !r.fork)
            .map(RepoItem::into_tool)
            .collect();

        // Upstream sorts by stars descending; the filter keeps that order.
        Ok(filter_fresh(fetched, Utc::now()))
    }
}
