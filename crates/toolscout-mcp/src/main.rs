use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use toolscout_core::{Error as CoreError, ScoringConfig};
use toolscout_local::{
    catalog, DiscoveryOrchestrator, GitHubSearchProvider, StaticCatalogProvider, TipsTable,
};

mod payload;

#[derive(Parser, Debug)]
#[command(name = "toolscout")]
#[command(about = "Conversational developer-tool discovery (MCP stdio server)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as an MCP stdio server (for Cursor / MCP clients).
    #[cfg(feature = "stdio")]
    McpStdio,
    /// One-shot discovery: print the same JSON payload the MCP tool returns.
    Discover(DiscoverCmd),
    /// Diagnose configuration/launch issues (json; no secrets).
    Doctor(DoctorCmd),
    /// Print version info.
    Version(VersionCmd),
}

#[derive(clap::Args, Debug)]
struct DiscoverCmd {
    /// Natural-language description of the workflow problem.
    #[arg(long)]
    problem: String,
    /// Tool the user already works with (repeatable).
    #[arg(long = "existing-tool")]
    existing_tools: Vec<String>,
    /// Data source. Defaults to TOOLSCOUT_MODE, then "static".
    #[arg(long, value_enum)]
    mode: Option<Mode>,
}

#[derive(clap::Args, Debug)]
struct DoctorCmd {}

#[derive(clap::Args, Debug)]
struct VersionCmd {}

/// Where candidate tools come from: the bundled JSON catalog or a live
/// GitHub repository search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    Static,
    Live,
}

impl Mode {
    fn from_env() -> Self {
        match std::env::var("TOOLSCOUT_MODE")
            .ok()
            .as_deref()
            .map(str::trim)
        {
            Some("live") => Mode::Live,
            Some("static") | Some("") | None => Mode::Static,
            Some(other) => {
                tracing::warn!(mode = other, "unknown TOOLSCOUT_MODE; using static");
                Mode::Static
            }
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Mode::Static => "static",
            Mode::Live => "live",
        }
    }
}

fn http_client() -> std::result::Result<reqwest::Client, CoreError> {
    reqwest::Client::builder()
        .user_agent(concat!("toolscout/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CoreError::Upstream(e.to_string()))
}

/// Build the per-process orchestrator for a mode. In static mode the catalog
/// load happens here, once; a missing catalog is a startup error rather than
/// a per-request surprise. Returns the resolved catalog path when there is
/// one, for meta/doctor reporting.
fn build_orchestrator(
    mode: Mode,
) -> std::result::Result<(DiscoveryOrchestrator, Option<PathBuf>), CoreError> {
    let tips = TipsTable::builtin();
    match mode {
        Mode::Static => {
            let provider = StaticCatalogProvider::from_default_paths(ScoringConfig::default())?;
            let path = provider.path().to_path_buf();
            Ok((
                DiscoveryOrchestrator::new(tips, Arc::new(provider)),
                Some(path),
            ))
        }
        Mode::Live => {
            let provider = GitHubSearchProvider::new(http_client()?);
            Ok((DiscoveryOrchestrator::new(tips, Arc::new(provider)), None))
        }
    }
}

fn has_env(k: &str) -> bool {
    std::env::var(k).is_ok_and(|v| !v.trim().is_empty())
}

async fn run_discover(args: DiscoverCmd) -> Result<()> {
    let mode = args.mode.unwrap_or_else(Mode::from_env);
    let (orch, _catalog_path) =
        build_orchestrator(mode).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let result = orch
        .discover(&args.problem, &args.existing_tools)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&payload::render(mode, &result))?
    );
    Ok(())
}

fn run_doctor() -> Result<()> {
    let mode = Mode::from_env();

    let probes: Vec<serde_json::Value> = catalog::candidate_database_paths()
        .iter()
        .map(|p| {
            serde_json::json!({
                "path": p.display().to_string(),
                "exists": p.is_file(),
            })
        })
        .collect();

    let catalog_report = match StaticCatalogProvider::from_default_paths(ScoringConfig::default()) {
        Ok(provider) => serde_json::json!({
            "ok": true,
            "loaded": provider.path().display().to_string(),
            "tool_count": provider.tool_count(),
        }),
        Err(e) => serde_json::json!({
            "ok": false,
            "error": e.to_string(),
        }),
    };

    let payload = serde_json::json!({
        "ok": true,
        "name": "toolscout",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": mode.as_str(),
        "catalog": {
            "probed": probes,
            "load": catalog_report,
        },
        "github": {
            // Booleans / key names only, never values.
            "token_configured": has_env("TOOLSCOUT_GITHUB_TOKEN") || has_env("GITHUB_TOKEN"),
            "endpoint_overridden": has_env("TOOLSCOUT_GITHUB_ENDPOINT"),
        },
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

#[cfg(feature = "stdio")]
mod mcp {
    use super::*;
    use rmcp::{
        handler::server::router::tool::ToolRouter as RmcpToolRouter,
        handler::server::wrapper::Parameters,
        model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
        tool, tool_handler, tool_router,
        transport::stdio,
        ErrorData as McpError, ServiceExt,
    };
    use schemars::JsonSchema;
    use serde::Deserialize;

    mod envelope;
    use envelope::{add_envelope_fields, error_obj, ErrorCode};

    #[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
    pub(crate) struct DiscoverToolsArgs {
        /// Natural-language description of the workflow problem.
        pub problem: Option<String>,
        /// Tools the user already works with; matched against the tips table.
        #[serde(default)]
        pub existing_tools: Vec<String>,
    }

    #[derive(Clone)]
    pub(crate) struct ToolscoutMcp {
        tool_router: RmcpToolRouter<Self>,
        orchestrator: Arc<DiscoveryOrchestrator>,
        mode: Mode,
        catalog_path: Option<PathBuf>,
    }

    #[tool_router]
    impl ToolscoutMcp {
        pub(crate) fn new() -> Result<Self, McpError> {
            let mode = Mode::from_env();
            let (orchestrator, catalog_path) = build_orchestrator(mode)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(Self {
                tool_router: Self::tool_router(),
                orchestrator: Arc::new(orchestrator),
                mode,
                catalog_path,
            })
        }

        #[tool(
            description = "Find external tools for a described workflow problem, and surface tips for tools already in use"
        )]
        async fn discover_tools(
            &self,
            params: Parameters<Option<DiscoverToolsArgs>>,
        ) -> Result<CallToolResult, McpError> {
            let t0 = std::time::Instant::now();
            let args = params.0.unwrap_or_default();

            let problem = args.problem.unwrap_or_default();
            if problem.trim().is_empty() {
                let mut payload = serde_json::json!({
                    "ok": false,
                    "error": error_obj(
                        ErrorCode::InvalidParams,
                        "problem must be non-empty",
                        "Describe the workflow problem in a sentence or two.",
                    )
                });
                add_envelope_fields(&mut payload, "discover_tools", t0.elapsed().as_millis());
                return Ok(tool_result(payload));
            }

            match self
                .orchestrator
                .discover(&problem, &args.existing_tools)
                .await
            {
                Ok(result) => {
                    let mut payload = payload::render(self.mode, &result);
                    add_envelope_fields(&mut payload, "discover_tools", t0.elapsed().as_millis());
                    Ok(tool_result(payload))
                }
                Err(e) => {
                    let code = match &e {
                        CoreError::InvalidInput(_) => ErrorCode::InvalidParams,
                        CoreError::MissingCatalog(_) => ErrorCode::CatalogMissing,
                        CoreError::Catalog(_) => ErrorCode::CatalogError,
                        CoreError::Upstream(_) => ErrorCode::SearchFailed,
                    };
                    let mut payload = serde_json::json!({
                        "ok": false,
                        "error": error_obj(code, e.to_string(), error_hint(code)),
                    });
                    add_envelope_fields(&mut payload, "discover_tools", t0.elapsed().as_millis());
                    Ok(tool_result(payload))
                }
            }
        }

        #[tool(description = "Report toolscout configuration + version (no secrets)")]
        async fn toolscout_meta(&self) -> Result<CallToolResult, McpError> {
            let t0 = std::time::Instant::now();
            let mut payload = serde_json::json!({
                "ok": true,
                "name": "toolscout",
                "version": env!("CARGO_PKG_VERSION"),
                "mode": self.mode.as_str(),
                "provider": self.orchestrator.provider_name(),
                "catalog_path": self.catalog_path.as_ref().map(|p| p.display().to_string()),
                "github": {
                    "token_configured": has_env("TOOLSCOUT_GITHUB_TOKEN") || has_env("GITHUB_TOKEN"),
                    "endpoint_overridden": has_env("TOOLSCOUT_GITHUB_ENDPOINT"),
                },
            });
            add_envelope_fields(&mut payload, "toolscout_meta", t0.elapsed().as_millis());
            Ok(tool_result(payload))
        }
    }

    fn error_hint(code: ErrorCode) -> &'static str {
        match code {
            ErrorCode::InvalidParams => "Describe the workflow problem in a sentence or two.",
            ErrorCode::CatalogMissing => {
                "Set TOOLSCOUT_DATABASE to a tool-database.json path, or place the file next to the binary."
            }
            ErrorCode::CatalogError => "The tool database exists but could not be parsed; check its JSON shape.",
            ErrorCode::SearchFailed => "The upstream search failed; retry later or switch TOOLSCOUT_MODE=static.",
        }
    }

    fn tool_result(payload: serde_json::Value) -> CallToolResult {
        // Structured content for machine consumers, plus a text fallback for
        // clients/tests that only read `content[0].text`.
        let mut r = CallToolResult::structured(payload.clone());
        r.content = vec![Content::text(payload.to_string())];
        r
    }

    #[tool_handler]
    impl rmcp::ServerHandler for ToolscoutMcp {
        fn get_info(&self) -> ServerInfo {
            ServerInfo {
                instructions: Some(
                    "Developer-tool discovery: describe a workflow problem to get ranked tool candidates, plus tips for tools already in use. Outputs are JSON and schema-versioned."
                        .to_string(),
                ),
                capabilities: ServerCapabilities::builder().enable_tools().build(),
                ..Default::default()
            }
        }
    }

    pub(crate) async fn serve_stdio() -> Result<(), McpError> {
        let svc = ToolscoutMcp::new()?;
        let running = svc
            .serve(stdio())
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        // Keep the stdio server alive until the client closes.
        running
            .waiting()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(())
    }

}

#[tokio::main]
async fn main() -> Result<()> {
    // Optional env-file loader (opt-in).
    //
    // MCP server environments often aren't interactive shells, so users want
    // a single place to keep tokens without exporting them manually.
    // Sets vars only if not already present; never logs values.
    if let Ok(p) = std::env::var("TOOLSCOUT_ENV_FILE") {
        let p = p.trim();
        if !p.is_empty() {
            if let Ok(txt) = std::fs::read_to_string(p) {
                for raw in txt.lines() {
                    let s = raw.trim();
                    if s.is_empty() || s.starts_with('#') {
                        continue;
                    }
                    let Some((k, v)) = s.split_once('=') else {
                        continue;
                    };
                    let k = k.trim();
                    let v = v.trim();
                    if k.is_empty() {
                        continue;
                    }
                    if std::env::var_os(k).is_none() {
                        std::env::set_var(k, v);
                    }
                }
            }
        }
    }

    // stdout belongs to the MCP transport; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "stdio")]
        Commands::McpStdio => {
            mcp::serve_stdio()
                .await
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        Commands::Discover(args) => {
            run_discover(args).await?;
        }
        Commands::Doctor(_) => {
            run_doctor()?;
        }
        Commands::Version(_) => {
            println!(
                "{}",
                serde_json::json!({
                    "name": "toolscout",
                    "version": env!("CARGO_PKG_VERSION"),
                })
            );
        }
    }

    Ok(())
}
