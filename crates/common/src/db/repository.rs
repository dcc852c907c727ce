//! Repository pattern for database operations
//!
//! Read-only access to the catalog. Every method returns fully hydrated
//! [`Dataset`] records (metadata, authors and metrics attached).

use crate::catalog::Dataset;
use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    // ========================================================================
    // Dataset Operations
    // ========================================================================

    /// Find a dataset by ID with its metadata loaded
    pub async fn find_dataset(&self, id: i32) -> Result<Option<Dataset>> {
        let mut datasets = self.load_datasets(&[id]).await?;
        Ok(datasets.pop())
    }

    /// Load datasets by ID, preserving the order of `ids`.
    ///
    /// IDs with no `data_set` row are skipped. A dataset whose metadata row
    /// is missing comes back with `metadata: None`.
    pub async fn load_datasets(&self, ids: &[i32]) -> Result<Vec<Dataset>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = DatasetEntity::find()
            .filter(DatasetColumn::Id.is_in(ids.iter().copied()))
            .find_also_related(MetaDataEntity)
            .all(self.read_conn())
            .await?;

        let meta_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, meta)| meta.as_ref().map(|m| m.id))
            .collect();
        let metric_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, meta)| meta.as_ref().and_then(|m| m.ds_metrics_id))
            .collect();

        let (authors, metrics) = futures::try_join!(
            self.authors_by_metadata(&meta_ids),
            self.metrics_by_id(&metric_ids),
        )?;

        let mut authors = authors;
        let mut by_id: HashMap<i32, Dataset> = rows
            .into_iter()
            .map(|(row, meta)| {
                let meta_authors = meta
                    .as_ref()
                    .and_then(|m| authors.remove(&m.id))
                    .unwrap_or_default();
                let meta_metrics = meta
                    .as_ref()
                    .and_then(|m| m.ds_metrics_id)
                    .and_then(|id| metrics.get(&id).cloned());
                let id = row.id;
                (id, Dataset::from_parts(row, meta, meta_authors, meta_metrics))
            })
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Authors grouped by metadata ID, in primary-key order
    async fn authors_by_metadata(&self, meta_ids: &[i32]) -> Result<HashMap<i32, Vec<AuthorRow>>> {
        if meta_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = AuthorEntity::find()
            .filter(AuthorColumn::DsMetaDataId.is_in(meta_ids.iter().copied()))
            .order_by_asc(AuthorColumn::Id)
            .all(self.read_conn())
            .await?;

        let mut grouped: HashMap<i32, Vec<AuthorRow>> = HashMap::new();
        for author in rows {
            if let Some(meta_id) = author.ds_meta_data_id {
                grouped.entry(meta_id).or_default().push(author);
            }
        }
        Ok(grouped)
    }

    async fn metrics_by_id(&self, metric_ids: &[i32]) -> Result<HashMap<i32, DsMetricsRow>> {
        if metric_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = DsMetricsEntity::find()
            .filter(DsMetricsColumn::Id.is_in(metric_ids.iter().copied()))
            .all(self.read_conn())
            .await?;

        Ok(rows.into_iter().map(|m| (m.id, m)).collect())
    }
}
