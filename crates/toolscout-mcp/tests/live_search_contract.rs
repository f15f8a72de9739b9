//! Live-mode contracts against a local stub of the GitHub search endpoint.
//! These spawn the real binary; the stub keeps them offline and deterministic.

use axum::{extract::Query, routing::get, Json, Router};
use std::collections::HashMap;
use std::net::SocketAddr;

fn iso_days_ago(days: i64) -> String {
    (chrono::Utc::now() - chrono::Duration::days(days)).to_rfc3339()
}

async fn spawn_stub(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("axum serve");
    });
    addr
}

fn run_discover_live(endpoint: &str, problem: &str) -> serde_json::Value {
    let bin = assert_cmd::cargo::cargo_bin!("toolscout");
    let out = std::process::Command::new(bin)
        .args(["discover", "--problem", problem, "--existing-tool", "git", "--mode", "live"])
        .env("TOOLSCOUT_GITHUB_ENDPOINT", endpoint)
        .env_remove("TOOLSCOUT_GITHUB_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .output()
        .expect("run toolscout discover --mode live");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("parse discover json")
}

#[test]
fn quality_filter_drops_archived_and_stale_results() {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let addr = rt.block_on(async {
        let app = Router::new().route(
            "/search/repositories",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                // The upstream query must carry the star floor and archival
                // exclusion alongside the problem text.
                let q = params.get("q").cloned().unwrap_or_default();
                assert!(q.contains("pomodoro timer"));
                assert!(q.contains("stars:>=500"));
                assert!(q.contains("archived:false"));
                assert_eq!(params.get("sort").map(String::as_str), Some("stars"));
                assert_eq!(params.get("order").map(String::as_str), Some("desc"));

                Json(serde_json::json!({
                    "total_count": 4,
                    "items": [
                        {
                            "name": "archived-star-magnet",
                            "full_name": "example/archived-star-magnet",
                            "description": "Once great pomodoro app",
                            "html_url": "https://github.com/example/archived-star-magnet",
                            "stargazers_count": 10000,
                            "topics": ["productivity"],
                            "updated_at": iso_days_ago(30),
                            "archived": true,
                            "fork": false
                        },
                        {
                            "name": "fresh-timer",
                            "full_name": "example/fresh-timer",
                            "description": "Maintained pomodoro timer",
                            "html_url": "https://github.com/example/fresh-timer",
                            "stargazers_count": 4000,
                            "topics": ["pomodoro", "cli"],
                            "updated_at": iso_days_ago(10),
                            "archived": false,
                            "fork": false
                        },
                        {
                            "name": "dusty-timer",
                            "full_name": "example/dusty-timer",
                            "description": "Abandoned pomodoro timer",
                            "html_url": "https://github.com/example/dusty-timer",
                            "stargazers_count": 3000,
                            "topics": [],
                            "updated_at": iso_days_ago(800),
                            "archived": false,
                            "fork": false
                        },
                        {
                            "name": "forked-timer",
                            "full_name": "example/forked-timer",
                            "description": "Fork of fresh-timer",
                            "html_url": "https://github.com/example/forked-timer",
                            "stargazers_count": 900,
                            "topics": [],
                            "updated_at": iso_days_ago(5),
                            "archived": false,
                            "fork": true
                        }
                    ]
                }))
            }),
        );
        spawn_stub(app).await
    });

    let v = run_discover_live(
        &format!("http://{addr}/search/repositories"),
        "pomodoro timer",
    );

    assert_eq!(v["ok"].as_bool(), Some(true));
    assert_eq!(v["mode"].as_str(), Some("live"));
    assert_eq!(v["provider"].as_str(), Some("github-search"));
    assert_eq!(v["search_query"].as_str(), Some("pomodoro timer"));

    let names: Vec<&str> = v["tools_found"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["fresh-timer"]);

    let entry = &v["tools_found"][0];
    assert_eq!(entry["full_name"].as_str(), Some("example/fresh-timer"));
    assert_eq!(entry["stars"].as_u64(), Some(4000));
    assert_eq!(entry["topics"][0].as_str(), Some("pomodoro"));
    assert!(entry["last_updated"].as_str().is_some());

    assert!(v["handoff_message"]
        .as_str()
        .unwrap()
        .contains("Found 1 candidate tool"));
}

#[test]
fn upstream_error_degrades_to_empty_tools_with_tips() {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let addr = rt.block_on(async {
        let app = Router::new().route(
            "/search/repositories",
            get(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream on fire",
                )
            }),
        );
        spawn_stub(app).await
    });

    let v = run_discover_live(
        &format!("http://{addr}/search/repositories"),
        "pomodoro timer",
    );

    // Degraded, not failed: tips survive, tools are empty, handoff says so.
    assert_eq!(v["ok"].as_bool(), Some(true));
    assert_eq!(v["tools_found"].as_array().unwrap().len(), 0);
    let tips = v["tips_for_existing_tools"].as_array().unwrap();
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0]["tool"].as_str(), Some("git"));
    let msg = v["handoff_message"].as_str().unwrap();
    assert!(msg.contains("No matching tools"));
    assert!(msg.contains("unavailable"));
}

#[test]
fn upstream_ordering_is_preserved() {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let addr = rt.block_on(async {
        let app = Router::new().route(
            "/search/repositories",
            get(|| async move {
                // Stars descending, as the real endpoint returns with
                // sort=stars&order=desc.
                Json(serde_json::json!({
                    "total_count": 2,
                    "items": [
                        {
                            "name": "big",
                            "html_url": "https://github.com/e/big",
                            "description": "d",
                            "stargazers_count": 9000,
                            "updated_at": iso_days_ago(1),
                            "archived": false,
                            "fork": false
                        },
                        {
                            "name": "small",
                            "html_url": "https://github.com/e/small",
                            "description": "d",
                            "stargazers_count": 700,
                            "updated_at": iso_days_ago(1),
                            "archived": false,
                            "fork": false
                        }
                    ]
                }))
            }),
        );
        spawn_stub(app).await
    });

    let v = run_discover_live(&format!("http://{addr}/search/repositories"), "anything at all");
    let names: Vec<&str> = v["tools_found"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["big", "small"]);
}
