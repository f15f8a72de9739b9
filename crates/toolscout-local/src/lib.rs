//! Local implementations of the toolscout matching engine: the relevance
//! scorer and ranker, the live-result quality filter, the static tips table,
//! and the two [`CandidateProvider`](toolscout_core::CandidateProvider)
//! backends (JSON catalog, GitHub repository search).

pub mod catalog;
pub mod discovery;
pub mod github;
pub mod quality;
pub mod rank;
pub mod relevance;
pub mod tips;

pub use catalog::StaticCatalogProvider;
pub use discovery::DiscoveryOrchestrator;
pub use github::GitHubSearchProvider;
pub use tips::TipsTable;
