//! Related dataset handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use dataforge_common::{
    catalog::Dataset,
    config::RecommendationConfig,
    db::Repository,
    errors::{AppError, Result},
    metrics::RequestMetrics,
};
use dataforge_recommend::{ScoredDataset, SignalBreakdown};

/// Query string for the related endpoint
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RelatedQuery {
    /// Number of related datasets, defaults to the configured limit
    #[validate(range(min = 1))]
    pub limit: Option<usize>,

    /// Include the per-signal breakdown of each score
    #[serde(default)]
    pub explain: bool,
}

/// Related datasets response
#[derive(Debug, Serialize)]
pub struct RelatedResponse {
    pub dataset_id: i32,
    pub count: usize,
    pub related: Vec<DatasetSummary>,
}

#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub publication_type: String,
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_doi: Option<String>,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signals: Option<SignalBreakdown>,
}

impl DatasetSummary {
    fn from_scored(scored: ScoredDataset, explain: bool) -> Self {
        let ScoredDataset { dataset, score, signals } = scored;
        let Dataset { id, created_at, metadata, .. } = dataset;
        let metadata = metadata.unwrap_or_default();

        Self {
            id,
            tags: metadata.tag_list().into_iter().map(str::to_string).collect(),
            authors: metadata.authors.iter().map(|a| a.name.clone()).collect(),
            publication_type: metadata.publication_type.label(),
            title: metadata.title,
            description: metadata.description,
            created_at,
            dataset_doi: metadata.dataset_doi,
            score,
            signals: explain.then_some(signals),
        }
    }
}

/// Datasets most related to the given one, best first
pub async fn get_related(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<RelatedQuery>,
) -> Result<Json<RelatedResponse>> {
    let request_metrics = RequestMetrics::start("GET", "/v1/datasets/{id}/related");

    let result = related_datasets(&state, id, &query).await;
    request_metrics.finish(response_status(&result).as_u16());

    result.map(Json)
}

async fn related_datasets(
    state: &AppState,
    id: i32,
    query: &RelatedQuery,
) -> Result<RelatedResponse> {
    let limit = requested_limit(&state.config.recommendation, query)?;

    let repo = Repository::new(state.db.clone());
    let dataset = repo
        .find_dataset(id)
        .await?
        .ok_or(AppError::DatasetNotFound { id })?;

    let scored = state
        .recommendations
        .get_related_scored(&dataset, limit)
        .await?;

    let related: Vec<DatasetSummary> = scored
        .into_iter()
        .map(|s| DatasetSummary::from_scored(s, query.explain))
        .collect();

    Ok(RelatedResponse {
        dataset_id: id,
        count: related.len(),
        related,
    })
}

/// Validated limit, or the configured default when none was given
fn requested_limit(config: &RecommendationConfig, query: &RelatedQuery) -> Result<usize> {
    query.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("limit".to_string()),
    })?;

    config
        .resolve_limit(query.limit)
        .ok_or_else(|| AppError::Validation {
            message: format!("limit must be between 1 and {}", config.max_limit),
            field: Some("limit".to_string()),
        })
}

fn response_status<T>(result: &Result<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dataforge_common::catalog::{Author, Metadata, PublicationType};

    fn scored() -> ScoredDataset {
        ScoredDataset {
            dataset: Dataset {
                id: 7,
                user_id: 1,
                created_at: Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
                metadata: Some(Metadata {
                    title: "Apple harvest".into(),
                    description: "Orchard yields".into(),
                    tags: "apple, fruit ,".into(),
                    publication_type: PublicationType::JournalArticle,
                    authors: vec![Author {
                        id: 1,
                        name: "Ada".into(),
                        affiliation: None,
                        orcid: None,
                    }],
                    dataset_doi: Some("10.1234/ds.7".into()),
                    ..Default::default()
                }),
            },
            score: 0.8,
            signals: SignalBreakdown { author: 1.0, publication_type: 1.0, text: 0.6, metrics: 0.5 },
        }
    }

    #[test]
    fn test_summary_fields() {
        let summary = DatasetSummary::from_scored(scored(), false);
        assert_eq!(summary.id, 7);
        assert_eq!(summary.publication_type, "Journal Article");
        assert_eq!(summary.tags, vec!["apple", "fruit"]);
        assert_eq!(summary.authors, vec!["Ada"]);
        assert_eq!(summary.dataset_doi.as_deref(), Some("10.1234/ds.7"));
        assert!(summary.signals.is_none());
    }

    #[test]
    fn test_summary_explain() {
        let summary = DatasetSummary::from_scored(scored(), true);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["signals"]["text"], 0.6);
        assert_eq!(json["score"], 0.8);
    }

    #[test]
    fn test_query_validation() {
        assert!(RelatedQuery { limit: Some(0), explain: false }.validate().is_err());
        assert!(RelatedQuery { limit: Some(3), explain: false }.validate().is_ok());
        assert!(RelatedQuery::default().validate().is_ok());
    }

    #[test]
    fn test_requested_limit() {
        let config = RecommendationConfig::default();
        let query = |limit| RelatedQuery { limit, explain: false };

        assert_eq!(requested_limit(&config, &query(None)).unwrap(), 5);
        assert_eq!(requested_limit(&config, &query(Some(50))).unwrap(), 50);

        let err = requested_limit(&config, &query(Some(0))).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err = requested_limit(&config, &query(Some(51))).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_response_status_covers_error_exits() {
        assert_eq!(response_status(&Ok(())), StatusCode::OK);
        assert_eq!(
            response_status::<()>(&Err(AppError::DatasetNotFound { id: 3 })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            response_status::<()>(&Err(AppError::Retrieval { message: "down".into() })),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            response_status::<()>(&Err(AppError::Validation { message: "bad".into(), field: None })),
            StatusCode::BAD_REQUEST
        );
    }
}
