//! Candidate retrieval
//!
//! Pulls a bounded pool of datasets that share at least one tag or one
//! author with the base dataset. Retrieval order carries no meaning; the
//! engine re-ranks everything.
//!
//! Authors are matched by *name* here while the engine scores authors by
//! *id*. The name match is a deliberately loose pre-filter.

mod memory;
mod store;

pub use memory::InMemoryCandidateSource;
pub use store::SeaOrmCandidateSource;

use crate::errors::RecommendError;
use dataforge_common::catalog::Dataset;
use std::collections::BTreeSet;

/// Source of recommendation candidates
#[async_trait::async_trait]
pub trait CandidateSource: Send + Sync {
    /// Fetch up to `pool_limit` datasets overlapping `base` by tag or author,
    /// never including `base` itself.
    async fn fetch_candidates(
        &self,
        base: &Dataset,
        pool_limit: usize,
    ) -> Result<Vec<Dataset>, RecommendError>;
}

/// Overlap criteria derived from a base dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Dataset excluded from the pool
    pub exclude_id: i32,

    /// Lower-cased, trimmed base tags
    pub tags: BTreeSet<String>,

    /// Base author display names
    pub author_names: BTreeSet<String>,
}

impl CandidateFilter {
    /// Build the filter, or `None` when the base has neither tags nor
    /// authors (there is nothing to overlap with).
    pub fn from_base(base: &Dataset) -> Option<Self> {
        let meta = base.metadata.as_ref()?;
        let tags = meta.tag_set();
        let author_names: BTreeSet<String> =
            meta.authors.iter().map(|a| a.name.clone()).collect();

        if tags.is_empty() && author_names.is_empty() {
            return None;
        }

        Some(Self {
            exclude_id: base.id,
            tags,
            author_names,
        })
    }

    /// In-memory equivalent of the store query: the candidate's raw tag
    /// string contains a base tag (case-insensitive), or one of its authors
    /// carries a base author name.
    pub fn matches(&self, candidate: &Dataset) -> bool {
        if candidate.id == self.exclude_id {
            return false;
        }
        let Some(meta) = candidate.metadata.as_ref() else {
            return false;
        };

        let candidate_tags = meta.tags.to_lowercase();
        let tag_overlap = self.tags.iter().any(|t| candidate_tags.contains(t.as_str()));
        let author_overlap = meta
            .authors
            .iter()
            .any(|a| self.author_names.contains(&a.name));

        tag_overlap || author_overlap
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use dataforge_common::catalog::{Author, Dataset, Metadata, PublicationType};

    pub fn dataset(id: i32, tags: &str, authors: &[(i32, &str)]) -> Dataset {
        Dataset {
            id,
            user_id: 1,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            metadata: Some(Metadata {
                title: format!("Dataset {id}"),
                description: format!("Description of dataset {id}"),
                tags: tags.to_string(),
                publication_type: PublicationType::Report,
                authors: authors
                    .iter()
                    .map(|&(id, name)| Author {
                        id,
                        name: name.to_string(),
                        affiliation: None,
                        orcid: None,
                    })
                    .collect(),
                ..Default::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::dataset;
    use super::*;

    #[test]
    fn test_no_tags_no_authors_gives_no_filter() {
        assert_eq!(CandidateFilter::from_base(&dataset(1, "", &[])), None);
        assert_eq!(CandidateFilter::from_base(&dataset(1, " , ,", &[])), None);
    }

    #[test]
    fn test_filter_normalises_tags() {
        let filter = CandidateFilter::from_base(&dataset(1, "Apple, QUALITY ,fruit", &[(4, "Ada")])).unwrap();
        assert_eq!(filter.exclude_id, 1);
        assert_eq!(
            filter.tags,
            BTreeSet::from(["apple".into(), "quality".into(), "fruit".into()])
        );
        assert_eq!(filter.author_names, BTreeSet::from(["Ada".into()]));
    }

    #[test]
    fn test_matches_by_tag_substring_case_insensitive() {
        let filter = CandidateFilter::from_base(&dataset(1, "apple", &[])).unwrap();
        assert!(filter.matches(&dataset(2, "Pineapple,Juice", &[])));
        assert!(filter.matches(&dataset(3, "APPLE", &[])));
        assert!(!filter.matches(&dataset(4, "pear", &[])));
    }

    #[test]
    fn test_matches_by_author_name_not_id() {
        let filter = CandidateFilter::from_base(&dataset(1, "", &[(4, "Ada")])).unwrap();
        assert!(filter.matches(&dataset(2, "", &[(77, "Ada")])));
        assert!(!filter.matches(&dataset(3, "", &[(4, "Grace")])));
    }

    #[test]
    fn test_never_matches_base_itself() {
        let base = dataset(1, "apple", &[(4, "Ada")]);
        let filter = CandidateFilter::from_base(&base).unwrap();
        assert!(!filter.matches(&base));
    }
}
