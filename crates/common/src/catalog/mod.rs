//! Catalog records consumed by the recommendation engine
//!
//! Plain, validated data transfer objects. The storage adapter
//! ([`Dataset::from_parts`]) is the only place that tolerates loosely typed
//! columns; everything downstream works on these types.

mod publication_type;

pub use publication_type::{PublicationType, UnknownPublicationType};

use crate::db::models::{AuthorRow, DatasetRow, DsMetricsRow, MetaDataRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// A dataset in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    /// `None` only when the upstream record is broken; the engine rejects it
    pub metadata: Option<Metadata>,
}

/// Descriptive metadata of a dataset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    /// Raw comma-separated tag string
    pub tags: String,
    pub publication_type: PublicationType,
    pub authors: Vec<Author>,
    pub metrics: Option<Metrics>,
    pub publication_doi: Option<String>,
    pub dataset_doi: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub affiliation: Option<String>,
    pub orcid: Option<String>,
}

/// Size metrics of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub model_count: i64,
    pub feature_count: i64,
}

impl Dataset {
    /// Assemble a dataset from its catalog rows.
    ///
    /// Metric counts that are missing or not integers count as zero and an
    /// unrecognised publication type falls back to [`PublicationType::None`].
    pub fn from_parts(
        row: DatasetRow,
        metadata: Option<MetaDataRow>,
        authors: Vec<AuthorRow>,
        metrics: Option<DsMetricsRow>,
    ) -> Self {
        let metadata = metadata.map(|meta| {
            let publication_type = meta.publication_type.parse().unwrap_or_else(|e| {
                warn!(dataset_id = row.id, error = %e, "Falling back to publication type NONE");
                PublicationType::None
            });

            Metadata {
                title: meta.title,
                description: meta.description,
                tags: meta.tags.unwrap_or_default(),
                publication_type,
                authors: authors.into_iter().map(Author::from).collect(),
                metrics: metrics.map(Metrics::from),
                publication_doi: meta.publication_doi,
                dataset_doi: meta.dataset_doi,
            }
        });

        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at.and_utc(),
            metadata,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.title.as_str())
    }
}

impl Metadata {
    /// Tags split on commas and trimmed, empty entries dropped
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Distinct tags, lower-cased
    pub fn tag_set(&self) -> BTreeSet<String> {
        self.tag_list().into_iter().map(str::to_lowercase).collect()
    }

    pub fn author_ids(&self) -> BTreeSet<i32> {
        self.authors.iter().map(|a| a.id).collect()
    }

    /// Text fed to the vectorizer: title, description and raw tags
    pub fn document(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.tags)
    }
}

impl Metrics {
    pub fn total(&self) -> i64 {
        self.model_count.saturating_add(self.feature_count)
    }
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            affiliation: row.affiliation,
            orcid: row.orcid,
        }
    }
}

impl From<DsMetricsRow> for Metrics {
    fn from(row: DsMetricsRow) -> Self {
        Self {
            model_count: parse_count(row.number_of_models.as_deref()),
            feature_count: parse_count(row.number_of_features.as_deref()),
        }
    }
}

fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
}
