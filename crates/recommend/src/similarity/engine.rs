//! Similarity & ranking engine
//!
//! Stateless: every call vectorizes its own corpus (base + candidates) and
//! nothing is kept between calls.

use super::{
    author_similarity, metric_score, publication_type_similarity, text_similarity,
    ScoredDataset, SignalBreakdown, SimilarityWeights, TfidfConfig, TfidfVectorizer,
};
use crate::errors::RecommendError;
use dataforge_common::catalog::{Dataset, Metadata};
use tracing::debug;

/// Scores and ranks candidates against a base dataset
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    weights: SimilarityWeights,
    vectorizer: TfidfVectorizer,
}

impl RecommendationEngine {
    /// Create an engine; the weight set is checked once here
    pub fn new(weights: SimilarityWeights, tfidf: TfidfConfig) -> Result<Self, RecommendError> {
        weights.validate()?;
        Ok(Self {
            weights,
            vectorizer: TfidfVectorizer::new(tfidf),
        })
    }

    pub fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Rank `candidates` by relatedness to `base`, best first.
    ///
    /// Equal scores keep the input order. At most `top_n` results are
    /// returned.
    pub fn recommend(
        &self,
        base: &Dataset,
        candidates: Vec<Dataset>,
        top_n: usize,
    ) -> Result<Vec<ScoredDataset>, RecommendError> {
        let base_meta = base
            .metadata
            .as_ref()
            .ok_or(RecommendError::InvalidBase { dataset_id: base.id })?;

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let candidate_metas = candidates
            .iter()
            .map(|c| {
                c.metadata
                    .as_ref()
                    .ok_or(RecommendError::InvalidCandidate { dataset_id: c.id })
            })
            .collect::<Result<Vec<&Metadata>, _>>()?;

        // Candidates are checked even when nothing will be returned
        if top_n == 0 {
            return Ok(Vec::new());
        }

        let documents: Vec<String> = std::iter::once(base_meta)
            .chain(candidate_metas.iter().copied())
            .map(Metadata::document)
            .collect();
        let matrix = self.vectorizer.fit_transform(&documents);

        let signals: Vec<SignalBreakdown> = candidate_metas
            .iter()
            .enumerate()
            .map(|(i, meta)| {
                let text = match (matrix.row(0), matrix.row(i + 1)) {
                    (Some(b), Some(c)) => text_similarity(b, c),
                    _ => 0.0,
                };
                SignalBreakdown {
                    author: author_similarity(base_meta, meta),
                    publication_type: publication_type_similarity(base_meta, meta),
                    text,
                    metrics: metric_score(meta),
                }
            })
            .collect();

        let mut scored: Vec<ScoredDataset> = candidates
            .into_iter()
            .zip(signals)
            .map(|(dataset, signals)| {
                let score = self.weights.combine(&signals);
                debug!(
                    base_id = base.id,
                    candidate_id = dataset.id,
                    score,
                    author = signals.author,
                    publication_type = signals.publication_type,
                    text = signals.text,
                    metrics = signals.metrics,
                    "Scored candidate"
                );
                ScoredDataset { dataset, score, signals }
            })
            .collect();

        // Vec::sort_by is stable, ties keep retrieval order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_n);

        Ok(scored)
    }
}
