use crate::tips::TipsTable;
use std::sync::Arc;
use toolscout_core::{
    CandidateProvider, CandidateQuery, DiscoveryResult, Error, Result,
};
use tracing::warn;

/// Composes the tips matcher and a candidate provider into one answer.
///
/// Request-scoped: no state is carried between calls, and the shared pieces
/// (tips table, provider) are read-only, so concurrent in-flight requests
/// need no locking.
pub struct DiscoveryOrchestrator {
    tips: TipsTable,
    provider: Arc<dyn CandidateProvider>,
}

impl DiscoveryOrchestrator {
    pub fn new(tips: TipsTable, provider: Arc<dyn CandidateProvider>) -> Self {
        Self { tips, provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Answer one discovery request.
    ///
    /// The two sub-results are independent: a provider failure that is
    /// recoverable (upstream network trouble) degrades to an empty tool list
    /// with tips intact, never a fatal error. Input and catalog errors stay
    /// fatal; there is no meaningful partial result for those.
    pub async fn discover(
        &self,
        problem: &str,
        existing_tools: &[String],
    ) -> Result<DiscoveryResult> {
        if problem.trim().is_empty() {
            return Err(Error::InvalidInput("problem must be non-empty".to_string()));
        }

        let tips = self.tips.matches(existing_tools);

        let query = CandidateQuery::new(problem);
        let (tools, degraded) = match self.provider.candidates(&query).await {
            Ok(tools) => (tools, false),
            Err(e) if e.is_recoverable() => {
                warn!(provider = self.provider.name(), error = %e, "candidate lookup failed; returning empty tool list");
                (Vec::new(), true)
            }
            Err(e) => return Err(e),
        };

        Ok(DiscoveryResult {
            tips,
            tools,
            search_query: problem.to_string(),
            provider: self.provider.name().to_string(),
            degraded,
        })
    }
}
