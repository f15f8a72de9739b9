use crate::Mode;
use toolscout_core::{DiscoveryResult, Tool};

/// Bumped whenever a payload field changes meaning or shape.
pub(crate) const SCHEMA_VERSION: u64 = 1;

/// Render one discovery result as the JSON payload handed to the client.
///
/// The two modes expose different tool shapes on purpose: the static catalog
/// carries a curated `category`, live results carry repository metadata
/// (`full_name`, `topics`, `last_updated`) plus the upstream query echo.
pub(crate) fn render(mode: Mode, r: &DiscoveryResult) -> serde_json::Value {
    let tips: Vec<serde_json::Value> = r
        .tips
        .iter()
        .map(|m| serde_json::json!({ "tool": m.tool, "tips": m.tips }))
        .collect();

    match mode {
        Mode::Static => serde_json::json!({
            "ok": true,
            "schema_version": SCHEMA_VERSION,
            "mode": "static",
            "provider": r.provider,
            "tips_for_existing_tools": tips,
            "alternatives": r.tools.iter().map(alternative_entry).collect::<Vec<_>>(),
            "handoff_message": handoff_message(r),
        }),
        Mode::Live => serde_json::json!({
            "ok": true,
            "schema_version": SCHEMA_VERSION,
            "mode": "live",
            "provider": r.provider,
            "tips_for_existing_tools": tips,
            "tools_found": r.tools.iter().map(live_entry).collect::<Vec<_>>(),
            "search_query": r.search_query,
            "handoff_message": handoff_message(r),
        }),
    }
}

fn alternative_entry(t: &Tool) -> serde_json::Value {
    serde_json::json!({
        "name": t.name,
        "description": t.description,
        "url": t.url,
        "stars": t.stars,
        "category": t.category,
    })
}

fn live_entry(t: &Tool) -> serde_json::Value {
    serde_json::json!({
        "name": t.name,
        "full_name": t.full_name,
        "description": t.description,
        "url": t.url,
        "stars": t.stars,
        "topics": t.tags,
        "last_updated": t.last_updated,
    })
}

pub(crate) fn handoff_message(r: &DiscoveryResult) -> String {
    if r.tools.is_empty() {
        let mut msg = format!(
            "No matching tools found for \"{}\". Try rephrasing the problem or describing the workflow in more detail.",
            r.search_query
        );
        if r.degraded {
            msg.push_str(" The upstream search was unavailable for this request.");
        }
        msg
    } else {
        let n = r.tools.len();
        format!(
            "Found {n} candidate tool{} for \"{}\". Review them with the user and pick one to explore further.",
            if n == 1 { "" } else { "s" },
            r.search_query
        )
    }
}
