//! Multi-signal similarity scoring
//!
//! Four independent signals, each in `[0, 1]`, combined with fixed weights:
//! - author: shared author identifier
//! - publication type: identical document class
//! - text: TF-IDF cosine over title, description and tags
//! - metrics: size of the candidate (models + features)

mod engine;
pub mod tfidf;

pub use engine::RecommendationEngine;
pub use tfidf::{SparseVector, TfidfConfig, TfidfMatrix, TfidfVectorizer};

use crate::errors::RecommendError;
use dataforge_common::catalog::{Dataset, Metadata};
use serde::Serialize;

/// Combined model + feature count at which the metric signal saturates
pub const METRIC_SATURATION: f64 = 100.0;

/// Signal weights. Immutable once handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityWeights {
    pub author: f64,
    pub publication_type: f64,
    pub text: f64,
    pub metrics: f64,
}

impl SimilarityWeights {
    /// The catalog's ranking policy
    pub const DEFAULT: SimilarityWeights = SimilarityWeights {
        author: 0.20,
        publication_type: 0.15,
        text: 0.45,
        metrics: 0.20,
    };

    /// Build a weight set; weights must be non-negative and sum to 1.0
    pub fn new(
        author: f64,
        publication_type: f64,
        text: f64,
        metrics: f64,
    ) -> Result<Self, RecommendError> {
        let weights = Self { author, publication_type, text, metrics };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), RecommendError> {
        let parts = [self.author, self.publication_type, self.text, self.metrics];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RecommendError::InvalidWeights {
                message: format!("weights must be finite and non-negative: {:?}", self),
            });
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(RecommendError::InvalidWeights {
                message: format!("weights sum to {sum}, expected 1.0"),
            });
        }
        Ok(())
    }

    /// Weighted sum of the signals, clamped to `[0, 1]`
    pub fn combine(&self, signals: &SignalBreakdown) -> f64 {
        let score = self.author * signals.author
            + self.publication_type * signals.publication_type
            + self.text * signals.text
            + self.metrics * signals.metrics;
        score.clamp(0.0, 1.0)
    }
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-signal values for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SignalBreakdown {
    pub author: f64,
    pub publication_type: f64,
    pub text: f64,
    pub metrics: f64,
}

/// A candidate with its relatedness score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDataset {
    pub dataset: Dataset,
    pub score: f64,
    pub signals: SignalBreakdown,
}

/// 1.0 if the two datasets share at least one author identifier
pub fn author_similarity(base: &Metadata, candidate: &Metadata) -> f64 {
    let base_ids = base.author_ids();
    if candidate.authors.iter().any(|a| base_ids.contains(&a.id)) {
        1.0
    } else {
        0.0
    }
}

/// 1.0 if the publication types are identical
pub fn publication_type_similarity(base: &Metadata, candidate: &Metadata) -> f64 {
    if base.publication_type == candidate.publication_type {
        1.0
    } else {
        0.0
    }
}

/// Cosine similarity of two TF-IDF vectors
pub fn text_similarity(base: &SparseVector, candidate: &SparseVector) -> f64 {
    base.cosine(candidate)
}

/// `min((models + features) / 100, 1)` for the candidate, 0.0 without metrics
pub fn metric_score(candidate: &Metadata) -> f64 {
    match candidate.metrics {
        Some(metrics) => (metrics.total().max(0) as f64 / METRIC_SATURATION).min(1.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataforge_common::catalog::{Author, Metrics, PublicationType};

    fn author(id: i32, name: &str) -> Author {
        Author { id, name: name.into(), affiliation: None, orcid: None }
    }

    fn meta(authors: Vec<Author>, pt: PublicationType, metrics: Option<Metrics>) -> Metadata {
        Metadata {
            title: "t".into(),
            publication_type: pt,
            authors,
            metrics,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_weights_are_valid() {
        let w = SimilarityWeights::default();
        assert!(w.validate().is_ok());
        assert_eq!(w.text, 0.45);
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(matches!(
            SimilarityWeights::new(0.5, 0.5, 0.5, 0.0),
            Err(RecommendError::InvalidWeights { .. })
        ));
        assert!(SimilarityWeights::new(-0.1, 0.3, 0.6, 0.2).is_err());
        assert!(SimilarityWeights::new(f64::NAN, 0.0, 1.0, 0.0).is_err());
        assert!(SimilarityWeights::new(0.0, 0.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_author_similarity_uses_ids_not_names() {
        let base = meta(vec![author(1, "Ada")], PublicationType::Report, None);
        let same_id = meta(vec![author(1, "A. Lovelace")], PublicationType::Report, None);
        let same_name = meta(vec![author(2, "Ada")], PublicationType::Report, None);
        assert_eq!(author_similarity(&base, &same_id), 1.0);
        assert_eq!(author_similarity(&base, &same_name), 0.0);
        assert_eq!(author_similarity(&base, &meta(vec![], PublicationType::Report, None)), 0.0);
    }

    #[test]
    fn test_publication_type_similarity() {
        let a = meta(vec![], PublicationType::Report, None);
        let b = meta(vec![], PublicationType::Thesis, None);
        assert_eq!(publication_type_similarity(&a, &a), 1.0);
        assert_eq!(publication_type_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_metric_score() {
        let m = |models, features| {
            meta(vec![], PublicationType::None, Some(Metrics { model_count: models, feature_count: features }))
        };
        assert_eq!(metric_score(&meta(vec![], PublicationType::None, None)), 0.0);
        assert_eq!(metric_score(&m(10, 5)), 0.15);
        assert_eq!(metric_score(&m(80, 20)), 1.0);
        assert_eq!(metric_score(&m(500, 500)), 1.0);
        assert_eq!(metric_score(&m(-40, 10)), 0.0);
    }

    #[test]
    fn test_combine_extremes() {
        let w = SimilarityWeights::default();
        let all = SignalBreakdown { author: 1.0, publication_type: 1.0, text: 1.0, metrics: 1.0 };
        assert!((w.combine(&all) - 1.0).abs() < 1e-12);
        assert_eq!(w.combine(&SignalBreakdown::default()), 0.0);

        let text_only = SignalBreakdown { text: 0.5, ..Default::default() };
        assert!((w.combine(&text_only) - 0.225).abs() < 1e-12);
    }
}
