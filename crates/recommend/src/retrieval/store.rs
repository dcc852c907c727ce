//! Catalog-backed candidate retrieval using SeaORM
//!
//! Two steps: a `SELECT DISTINCT data_set.id ... LIMIT n` overlap query,
//! then hydration of the matched IDs through the repository.

use super::{CandidateFilter, CandidateSource};
use crate::errors::RecommendError;
use dataforge_common::catalog::Dataset;
use dataforge_common::db::models::{
    AuthorColumn, AuthorEntity, DatasetColumn, DatasetEntity, DatasetRelation, MetaDataColumn,
    MetaDataEntity, MetaDataRelation,
};
use dataforge_common::db::{DbPool, Repository};
use dataforge_common::metrics;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait, Select,
};
use tracing::{info, warn};

/// Candidate source reading the catalog tables
#[derive(Clone)]
pub struct SeaOrmCandidateSource {
    db: DbPool,
}

impl SeaOrmCandidateSource {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Overlap query selecting distinct candidate IDs
    pub fn candidate_query(filter: &CandidateFilter, pool_limit: usize) -> Select<DatasetEntity> {
        let mut overlap = Condition::any();

        for tag in &filter.tags {
            overlap = overlap.add(
                Expr::expr(Func::lower(Expr::col((MetaDataEntity, MetaDataColumn::Tags))))
                    .like(LikeExpr::new(format!("%{}%", escape_like(tag))).escape('\\')),
            );
        }

        if !filter.author_names.is_empty() {
            overlap = overlap.add(
                Expr::col((AuthorEntity, AuthorColumn::Name))
                    .is_in(filter.author_names.iter().cloned()),
            );
        }

        DatasetEntity::find()
            .select_only()
            .column(DatasetColumn::Id)
            .distinct()
            .join(JoinType::InnerJoin, DatasetRelation::DsMetaData.def())
            .join(JoinType::LeftJoin, MetaDataRelation::Authors.def())
            .filter(DatasetColumn::Id.ne(filter.exclude_id))
            .filter(overlap)
            .limit(pool_limit as u64)
    }
}

#[async_trait::async_trait]
impl CandidateSource for SeaOrmCandidateSource {
    async fn fetch_candidates(
        &self,
        base: &Dataset,
        pool_limit: usize,
    ) -> Result<Vec<Dataset>, RecommendError> {
        let Some(filter) = CandidateFilter::from_base(base) else {
            info!(dataset_id = base.id, "Dataset has no tags or authors, skipping candidate query");
            return Ok(Vec::new());
        };

        let ids: Vec<i32> = Self::candidate_query(&filter, pool_limit)
            .into_tuple()
            .all(self.db.read())
            .await
            .map_err(|e| {
                metrics::record_retrieval_error();
                warn!(dataset_id = base.id, error = %e, "Candidate query failed");
                RecommendError::from(e)
            })?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Repository::new(self.db.clone())
            .load_datasets(&ids)
            .await
            .map_err(|e| {
                metrics::record_retrieval_error();
                RecommendError::Retrieval {
                    message: format!("Failed to load candidates: {}", e),
                }
            })
    }
}

/// Escape LIKE metacharacters so tags match literally
fn escape_like(tag: &str) -> String {
    let mut escaped = String::with_capacity(tag.len());
    for c in tag.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::test_support::dataset;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql_for(base: &Dataset, limit: usize) -> String {
        let filter = CandidateFilter::from_base(base).unwrap();
        SeaOrmCandidateSource::candidate_query(&filter, limit)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_query_shape() {
        let sql = sql_for(&dataset(42, "Apple, quality", &[(1, "Ada")]), 50);

        assert!(sql.starts_with(r#"SELECT DISTINCT "data_set"."id" FROM "data_set""#), "{sql}");
        assert!(sql.contains(r#"INNER JOIN "ds_meta_data""#), "{sql}");
        assert!(sql.contains(r#"LEFT JOIN "author""#), "{sql}");
        assert!(sql.contains(r#""data_set"."id" <> 42"#), "{sql}");
        assert!(sql.contains(r#"LOWER("ds_meta_data"."tags") LIKE '%apple%'"#), "{sql}");
        assert!(sql.contains(r#"LOWER("ds_meta_data"."tags") LIKE '%quality%'"#), "{sql}");
        assert!(sql.contains(r#""author"."name" IN ('Ada')"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.ends_with("LIMIT 50"), "{sql}");
    }

    #[test]
    fn test_tags_only_query_has_no_author_clause() {
        let sql = sql_for(&dataset(1, "fruit", &[]), 10);
        assert!(!sql.contains(r#""author"."name" IN"#), "{sql}");
        assert!(sql.ends_with("LIMIT 10"), "{sql}");
    }

    #[test]
    fn test_authors_only_query_has_no_tag_clause() {
        let sql = sql_for(&dataset(1, "", &[(3, "Grace")]), 50);
        assert!(!sql.contains("LIKE"), "{sql}");
        assert!(sql.contains(r#""author"."name" IN ('Grace')"#), "{sql}");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_pure"), r"100\%\_pure");
        assert_eq!(escape_like("plain"), "plain");
    }
}
