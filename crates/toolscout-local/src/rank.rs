use crate::relevance::relevance_score;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use toolscout_core::{ScoredTool, ScoringConfig, Tool};

/// Rank a candidate list against a problem statement.
///
/// Duplicates (same name + url) are dropped keeping the first occurrence,
/// every survivor is scored, the list is stably sorted by descending score
/// (equal scores keep candidate order, so output is deterministic), scores at
/// or below `score_cutoff` are discarded, and at most `limit` results remain.
/// Returning fewer than `limit` is normal, not an error.
pub fn rank_tools(candidates: &[Tool], problem: &str, cfg: &ScoringConfig) -> Vec<ScoredTool> {
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
    let mut scored: Vec<ScoredTool> = Vec::new();
    for tool in candidates {
        if !seen.insert((tool.name.clone(), tool.url.clone())) {
            continue;
        }
        scored.push(ScoredTool {
            tool: tool.clone(),
            score: relevance_score(tool, problem, cfg),
        });
    }

    // Vec::sort_by is stable; NaN cannot occur (weights and log10 of a
    // non-negative finite value are finite).
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.retain(|s| s.score > cfg.score_cutoff);
    scored.truncate(cfg.limit);
    scored
}
