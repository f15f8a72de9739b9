use toolscout_core::{ScoringConfig, Tool};

/// Score one tool against one problem statement.
///
/// Additive, independent signals; all comparisons are case-insensitive
/// substring checks over whitespace tokens:
/// - each problem token longer than `min_token_len` found in the description
///   adds `description_token_weight`;
/// - each tag contained whole in the problem adds `tag_phrase_weight`, and
///   each qualifying token contained in that tag adds `tag_token_weight`
///   (a tag can accumulate both);
/// - a problem that mentions the tool name adds `name_mention_weight`;
/// - `log10(stars + 1) * stars_weight` as a small popularity prior, dominated
///   by the topical signals for any reasonably specific query.
///
/// Pure function: identical inputs always yield identical scores.
pub fn relevance_score(tool: &Tool, problem: &str, cfg: &ScoringConfig) -> f64 {
    let problem_lc = problem.to_lowercase();
    let tokens: Vec<&str> = problem_lc
        .split_whitespace()
        .filter(|t| t.len() > cfg.min_token_len)
        .collect();

    let mut score = 0.0;

    let desc_lc = tool.description.to_lowercase();
    for tok in &tokens {
        if desc_lc.contains(tok) {
            score += cfg.description_token_weight;
        }
    }

    for tag in &tool.tags {
        let tag_lc = tag.to_lowercase();
        if problem_lc.contains(&tag_lc) {
            score += cfg.tag_phrase_weight;
        }
        for tok in &tokens {
            if tag_lc.contains(tok) {
                score += cfg.tag_token_weight;
            }
        }
    }

    if problem_lc.contains(&tool.name.to_lowercase()) {
        score += cfg.name_mention_weight;
    }

    score += ((tool.stars as f64) + 1.0).log10() * cfg.stars_weight;

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tool(name: &str, description: &str, tags: &[&str], stars: u64) -> Tool {
        Tool {
            name: name.to_string(),
            full_name: None,
            description: description.to_string(),
            url: format!("https://github.com/example/{name}"),
            stars,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            category: None,
            last_updated: None,
            archived: false,
        }
    }

    #[test]
    fn name_mention_scores_at_least_five() {
        let t = tool("pomodoro-cli", "", &[], 0);
        let cfg = ScoringConfig::default();
        let s = relevance_score(&t, "i want a Pomodoro-CLI thing", &cfg);
        assert!(s >= 5.0, "score {s}");
    }

    #[test]
    fn description_overlap_adds_two_per_token() {
        let t = tool("x", "a pomodoro timer for the terminal", &[], 0);
        let cfg = ScoringConfig::default();
        // "pomodoro" and "timer" hit the description; "a" is too short.
        let s = relevance_score(&t, "pomodoro timer a", &cfg);
        assert!((s - 4.0).abs() < 1e-9, "score {s}");
    }

    #[test]
    fn tag_accumulates_phrase_and_token_bonuses() {
        let t = tool("x", "", &["productivity"], 0);
        let cfg = ScoringConfig::default();
        // Tag contained in problem (+3.0) and token "productivity" contained
        // in tag (+1.0).
        let s = relevance_score(&t, "productivity boost", &cfg);
        assert!((s - 4.0).abs() < 1e-9, "score {s}");
    }

    #[test]
    fn short_tokens_are_excluded() {
        let t = tool("x", "an api for css and cli work", &["api"], 0);
        let cfg = ScoringConfig::default();
        // "api", "css", "cli" are all length 3: no description/tag-token
        // signal. The tag "api" is still found inside the problem text.
        let s = relevance_score(&t, "api css cli", &cfg);
        assert!((s - cfg.tag_phrase_weight).abs() < 1e-9, "score {s}");
    }

    #[test]
    fn stars_prior_is_small_and_monotonic() {
        let cfg = ScoringConfig::default();
        let low = relevance_score(&tool("small-one", "", &[], 9), "unrelated query", &cfg);
        let high = relevance_score(&tool("big-one", "", &[], 99_999), "unrelated query", &cfg);
        assert!(low < high);
        // log10(100000) * 0.5 = 2.5: never enough to beat a name mention.
        assert!(high < 5.0);
        assert!((low - 0.5).abs() < 1e-9);
    }

    #[test]
    fn topical_match_with_tag_scores_above_seven() {
        // Description overlap (2 tokens = 4.0) + tag phrase and token bonuses
        // (3.0 + 1.0) + stars prior: comfortably above 7 for a real match.
        let t = tool(
            "pomodoro-cli",
            "A pomodoro timer for your terminal",
            &["pomodoro", "productivity"],
            850,
        );
        let s = relevance_score(&t, "pomodoro timer", &ScoringConfig::default());
        assert!(s > 7.0, "score {s}");
    }

    proptest! {
        #[test]
        fn scoring_is_pure_and_non_negative(
            problem in "[ -~]{0,80}",
            stars in 0u64..10_000_000,
        ) {
            let t = tool("fzf", "command-line fuzzy finder", &["search", "cli-tool"], stars);
            let cfg = ScoringConfig::default();
            let a = relevance_score(&t, &problem, &cfg);
            let b = relevance_score(&t, &problem, &cfg);
            prop_assert_eq!(a, b);
            prop_assert!(a >= 0.0);
        }
    }
}
