use crate::rank::rank_tools;
use serde::Deserialize;
use std::path::PathBuf;
use toolscout_core::{CandidateProvider, CandidateQuery, Error, Result, ScoringConfig, Tool};

fn database_path_from_env() -> Option<PathBuf> {
    std::env::var("TOOLSCOUT_DATABASE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Candidate locations for the static tool database, in probe order.
/// The env override comes first so tests and non-standard installs can pin
/// an exact file.
pub fn candidate_database_paths() -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(p) = database_path_from_env() {
        out.push(p);
    }
    out.push(PathBuf::from("tool-database.json"));
    out.push(PathBuf::from("data/tool-database.json"));
    if let Some(base) = dirs::data_dir() {
        out.push(base.join("toolscout").join("tool-database.json"));
    }
    out
}

/// On-disk catalog shape: `{ "metadata": {...}, "tools": [...] }`.
/// Only `tools` matters here; metadata is tolerated and ignored.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    tools: Vec<Tool>,
}

/// Static-database candidate provider.
///
/// The catalog is loaded once at construction and treated as read-only for
/// the provider's lifetime; concurrent requests share it without locking.
/// Per query, it runs the relevance ranker over the full candidate list.
#[derive(Debug, Clone)]
pub struct StaticCatalogProvider {
    tools: Vec<Tool>,
    cfg: ScoringConfig,
    path: PathBuf,
}

impl StaticCatalogProvider {
    /// Probe the candidate paths and load the first file that exists.
    /// No file anywhere is a fatal error: there is no meaningful ranking
    /// without a candidate table.
    pub fn from_default_paths(cfg: ScoringConfig) -> Result<Self> {
        let paths = candidate_database_paths();
        let Some(path) = paths.iter().find(|p| p.is_file()) else {
            let probed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            return Err(Error::MissingCatalog(format!(
                "no tool database found; probed: {}",
                probed.join(", ")
            )));
        };
        Self::from_path(path.clone(), cfg)
    }

    pub fn from_path(path: PathBuf, cfg: ScoringConfig) -> Result<Self> {
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| Error::Catalog(format!("{}: {e}", path.display())))?;
        let parsed: CatalogFile = serde_json::from_str(&raw)
            .map_err(|e| Error::Catalog(format!("{}: {e}", path.display())))?;
        Ok(Self {
            tools: parsed.tools,
            cfg,
            path,
        })
    }

    /// Path the catalog was actually loaded from.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

#[async_trait::async_trait]
impl CandidateProvider for StaticCatalogProvider {
    fn name(&self) -> &'static str {
        "static-catalog"
    }

    async fn candidates(&self, q: &CandidateQuery) -> Result<Vec<Tool>> {
        let mut cfg = self.cfg.clone();
        if let Some(n) = q.max_results {
            cfg.limit = n;
        }
        Ok(rank_tools(&self.tools, &q.problem, &cfg)
            .into_iter()
            .map(|s| s.tool)
            .collect())
    }
}
