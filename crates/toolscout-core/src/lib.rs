use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("catalog not found: {0}")]
    MissingCatalog(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("upstream search failed: {0}")]
    Upstream(String),
}

impl Error {
    /// Whether the orchestrator may degrade to a partial result instead of
    /// failing the whole request. Only upstream (network) failures qualify;
    /// input and catalog errors have no meaningful partial answer.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Upstream(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// One candidate tool, from either the static catalog or a live search.
///
/// The static catalog carries `category` and `tags`; live search results
/// additionally carry `full_name`, `last_updated`, and `archived`. Fields a
/// source does not provide default to empty/none, so one shape serves both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

/// Tuned weights and thresholds for the relevance scorer and ranker.
///
/// These values are empirical; keep them here (named, overridable) rather
/// than as literals at call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Added once per problem token found in the tool description.
    pub description_token_weight: f64,
    /// Added once per tag contained whole in the problem statement.
    pub tag_phrase_weight: f64,
    /// Added once per problem token contained in a tag.
    pub tag_token_weight: f64,
    /// Added when the problem statement mentions the tool name.
    pub name_mention_weight: f64,
    /// Multiplier on `log10(stars + 1)`; a tie-breaker, never a primary axis.
    pub stars_weight: f64,
    /// Tokens must be strictly longer than this to participate in substring
    /// scoring. At 3 this drops short acronyms ("cli", "api", "css") along
    /// with stop-word noise; a known precision/recall trade-off.
    pub min_token_len: usize,
    /// Candidates scoring at or below this are dropped. Sits above the
    /// popularity prior alone (log10 of any realistic star count * 0.5 < 2.0),
    /// so unrelated-but-popular tools do not leak through.
    pub score_cutoff: f64,
    /// Maximum number of ranked candidates returned.
    pub limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            description_token_weight: 2.0,
            tag_phrase_weight: 3.0,
            tag_token_weight: 1.0,
            name_mention_weight: 5.0,
            stars_weight: 0.5,
            min_token_len: 3,
            score_cutoff: 2.0,
            limit: 5,
        }
    }
}

/// A tool paired with its relevance score for one problem statement.
/// Ephemeral; produced per request and discarded after ranking.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredTool {
    pub tool: Tool,
    pub score: f64,
}

/// One entry of the static tips table: a canonical tool key and its tips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipEntry {
    pub key: String,
    pub tips: Vec<String>,
}

/// Tips matched for one user-supplied tool name. `tool` echoes the user's
/// original spelling, not the canonical key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TipMatch {
    pub tool: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateQuery {
    /// Free-text problem statement. Must be non-empty.
    pub problem: String,
    /// Cap on returned candidates; providers apply their own default.
    pub max_results: Option<usize>,
    /// Timeout for providers that go to the network (clamped by the adapter).
    pub timeout_ms: Option<u64>,
}

impl CandidateQuery {
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            max_results: None,
            timeout_ms: None,
        }
    }
}

/// The assembled answer for one discovery request. Constructed fresh per
/// request; nothing here is shared across requests.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResult {
    pub tips: Vec<TipMatch>,
    pub tools: Vec<Tool>,
    /// Echo of the problem text the candidates were matched against.
    pub search_query: String,
    /// Name of the provider that produced `tools`.
    pub provider: String,
    /// True when the provider failed and `tools` was degraded to empty.
    pub degraded: bool,
}

#[async_trait::async_trait]
pub trait CandidateProvider: Send + Sync {
    fn name(&self) -> &'static str;
    /// Return ranked/filtered candidates for a query. Implementations own
    /// their result cap and quality rules; callers get a final list.
    async fn candidates(&self, q: &CandidateQuery) -> Result<Vec<Tool>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_deserializes_from_catalog_shape() {
        // The static catalog has no live-only fields.
        let js = r#"
        {
          "name": "ripgrep",
          "description": "recursively search directories for a regex pattern",
          "url": "https://github.com/BurntSushi/ripgrep",
          "stars": 45000,
          "tags": ["search", "cli-tool"],
          "category": "cli-tool"
        }
        "#;
        let t: Tool = serde_json::from_str(js).unwrap();
        assert_eq!(t.name, "ripgrep");
        assert_eq!(t.stars, 45000);
        assert!(t.last_updated.is_none());
        assert!(!t.archived);
    }

    #[test]
    fn tool_deserializes_from_live_shape() {
        let js = r#"
        {
          "name": "zoxide",
          "full_name": "ajeetdsouza/zoxide",
          "description": "A smarter cd command",
          "url": "https://github.com/ajeetdsouza/zoxide",
          "stars": 20000,
          "tags": ["shell", "productivity"],
          "last_updated": "2026-01-15T12:00:00Z",
          "archived": false
        }
        "#;
        let t: Tool = serde_json::from_str(js).unwrap();
        assert_eq!(t.full_name.as_deref(), Some("ajeetdsouza/zoxide"));
        assert!(t.last_updated.is_some());
    }

    #[test]
    fn only_upstream_errors_are_recoverable() {
        assert!(Error::Upstream("HTTP 502".into()).is_recoverable());
        assert!(!Error::MissingCatalog("no path".into()).is_recoverable());
        assert!(!Error::InvalidInput("empty problem".into()).is_recoverable());
        assert!(!Error::Catalog("bad json".into()).is_recoverable());
    }
}
