//! Related-dataset service
//!
//! Glues a [`CandidateSource`] to the [`RecommendationEngine`]: fetch a
//! bounded candidate pool, rank it, keep the best `limit`.

use crate::errors::RecommendError;
use crate::retrieval::CandidateSource;
use crate::similarity::{RecommendationEngine, ScoredDataset, SimilarityWeights, TfidfConfig};
use dataforge_common::catalog::Dataset;
use dataforge_common::config::RecommendationConfig;
use dataforge_common::metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Related datasets returned when the caller does not say
pub const DEFAULT_RELATED_LIMIT: usize = 5;

/// Candidates pulled from the store per request
pub const DEFAULT_POOL_LIMIT: usize = 50;

#[derive(Clone)]
pub struct RecommendationService {
    source: Arc<dyn CandidateSource>,
    engine: Arc<RecommendationEngine>,
    pool_limit: usize,
}

impl RecommendationService {
    pub fn new(source: Arc<dyn CandidateSource>, engine: RecommendationEngine) -> Self {
        Self {
            source,
            engine: Arc::new(engine),
            pool_limit: DEFAULT_POOL_LIMIT,
        }
    }

    /// Build from the `recommendation` config section with the default weights
    pub fn from_config(
        source: Arc<dyn CandidateSource>,
        config: &RecommendationConfig,
    ) -> Result<Self, RecommendError> {
        let tfidf = TfidfConfig::default()
            .with_max_features(config.max_features)
            .with_stop_words(config.stop_words.iter().map(String::as_str));
        let engine = RecommendationEngine::new(SimilarityWeights::DEFAULT, tfidf)?;

        Ok(Self::new(source, engine).with_pool_limit(config.pool_limit))
    }

    pub fn with_pool_limit(mut self, pool_limit: usize) -> Self {
        self.pool_limit = pool_limit;
        self
    }

    pub fn pool_limit(&self) -> usize {
        self.pool_limit
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Up to `limit` datasets most related to `dataset`, best first
    pub async fn get_related_datasets(
        &self,
        dataset: &Dataset,
        limit: usize,
    ) -> Result<Vec<Dataset>, RecommendError> {
        let scored = self.get_related_scored(dataset, limit).await?;
        Ok(scored.into_iter().map(|s| s.dataset).collect())
    }

    /// Same ranking as [`get_related_datasets`](Self::get_related_datasets),
    /// keeping scores and per-signal values
    #[instrument(skip(self, dataset), fields(dataset_id = dataset.id))]
    pub async fn get_related_scored(
        &self,
        dataset: &Dataset,
        limit: usize,
    ) -> Result<Vec<ScoredDataset>, RecommendError> {
        let start = Instant::now();

        let candidates = self.source.fetch_candidates(dataset, self.pool_limit).await?;
        let candidate_count = candidates.len();

        let ranked = self.engine.recommend(dataset, candidates, limit)?;

        let elapsed = start.elapsed();
        metrics::record_recommendation(elapsed.as_secs_f64(), candidate_count, ranked.len());

        info!(
            candidates = candidate_count,
            returned = ranked.len(),
            top_score = ranked.first().map(|s| s.score),
            elapsed_ms = elapsed.as_millis() as u64,
            "Related datasets ranked"
        );

        Ok(ranked)
    }
}
