//! In-memory candidate source
//!
//! Applies the same overlap rules as the catalog query to a fixed list of
//! datasets. Used where no database is available.

use super::{CandidateFilter, CandidateSource};
use crate::errors::RecommendError;
use dataforge_common::catalog::Dataset;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCandidateSource {
    datasets: Vec<Dataset>,
}

impl InMemoryCandidateSource {
    pub fn new(datasets: Vec<Dataset>) -> Self {
        Self { datasets }
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[async_trait::async_trait]
impl CandidateSource for InMemoryCandidateSource {
    async fn fetch_candidates(
        &self,
        base: &Dataset,
        pool_limit: usize,
    ) -> Result<Vec<Dataset>, RecommendError> {
        let Some(filter) = CandidateFilter::from_base(base) else {
            return Ok(Vec::new());
        };

        let mut seen = BTreeSet::new();
        Ok(self
            .datasets
            .iter()
            .filter(|d| filter.matches(d))
            .filter(|d| seen.insert(d.id))
            .take(pool_limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::test_support::dataset;

    fn catalog() -> InMemoryCandidateSource {
        InMemoryCandidateSource::new(vec![
            dataset(1, "apple,quality,fruit", &[(10, "Author A")]),
            dataset(2, "apple", &[(20, "Author B")]),
            dataset(3, "pear", &[(10, "Author A")]),
            dataset(4, "grain", &[(30, "Author C")]),
            dataset(5, "fruit,citrus", &[]),
            dataset(2, "apple", &[(20, "Author B")]),
        ])
    }

    #[tokio::test]
    async fn test_no_tags_no_authors_returns_empty_pool() {
        let base = dataset(99, "", &[]);
        let pool = catalog().fetch_candidates(&base, 50).await.unwrap();
        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn test_overlap_by_tag_or_author_excluding_base() {
        let base = dataset(1, "apple,quality,fruit", &[(10, "Author A")]);
        let pool = catalog().fetch_candidates(&base, 50).await.unwrap();
        let ids: Vec<i32> = pool.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);
    }

    #[test]
    fn test_pool_limit_truncates() {
        let base = dataset(1, "apple,quality,fruit", &[(10, "Author A")]);
        let source = catalog();
        let pool = tokio_test::block_on(source.fetch_candidates(&base, 2)).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(source.len(), 6);
    }

    #[tokio::test]
    async fn test_name_match_ignores_author_id() {
        // Same name, different identifier: still a candidate
        let base = dataset(100, "", &[(555, "Author C")]);
        let pool = catalog().fetch_candidates(&base, 50).await.unwrap();
        assert_eq!(pool.iter().map(|d| d.id).collect::<Vec<_>>(), vec![4]);
    }
}
