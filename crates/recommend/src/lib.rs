//! DataForge Recommendation Engine
//!
//! Given a base dataset, finds related datasets in the catalog:
//! - [`retrieval`]: bounded candidate pool sharing a tag or an author
//! - [`similarity`]: TF-IDF text similarity plus author, publication type
//!   and size signals, combined into one score
//! - [`service`]: retrieval and ranking behind one call

pub mod errors;
pub mod retrieval;
pub mod service;
pub mod similarity;

pub use errors::RecommendError;
pub use retrieval::{CandidateFilter, CandidateSource, InMemoryCandidateSource, SeaOrmCandidateSource};
pub use service::{RecommendationService, DEFAULT_RELATED_LIMIT};
pub use similarity::{RecommendationEngine, ScoredDataset, SignalBreakdown, SimilarityWeights};
