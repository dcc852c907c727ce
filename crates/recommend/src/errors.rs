//! Recommendation error types

use dataforge_common::errors::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// Catalog store unreachable or the candidate query failed
    #[error("Candidate retrieval failed: {message}")]
    Retrieval { message: String },

    /// A candidate arrived without metadata
    #[error("Candidate dataset {dataset_id} has no metadata")]
    InvalidCandidate { dataset_id: i32 },

    /// The base dataset arrived without metadata
    #[error("Base dataset {dataset_id} has no metadata")]
    InvalidBase { dataset_id: i32 },

    #[error("Invalid similarity weights: {message}")]
    InvalidWeights { message: String },
}

impl From<sea_orm::DbErr> for RecommendError {
    fn from(e: sea_orm::DbErr) -> Self {
        RecommendError::Retrieval { message: e.to_string() }
    }
}

impl From<RecommendError> for AppError {
    fn from(e: RecommendError) -> Self {
        match e {
            RecommendError::Retrieval { message } => AppError::Retrieval { message },
            RecommendError::InvalidCandidate { dataset_id } => AppError::InvalidCandidate {
                dataset_id,
                message: "missing metadata".to_string(),
            },
            other => AppError::Internal { message: other.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataforge_common::errors::ErrorCode;

    #[test]
    fn test_db_error_becomes_retrieval() {
        let err: RecommendError = sea_orm::DbErr::Conn(sea_orm::RuntimeErr::Internal(
            "connection refused".into(),
        ))
        .into();
        assert!(matches!(err, RecommendError::Retrieval { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = RecommendError::Retrieval { message: "down".into() }.into();
        assert_eq!(app.code(), ErrorCode::RetrievalError);

        let app: AppError = RecommendError::InvalidCandidate { dataset_id: 4 }.into();
        assert_eq!(app.code(), ErrorCode::InvalidCandidate);

        let app: AppError = RecommendError::InvalidBase { dataset_id: 1 }.into();
        assert_eq!(app.code(), ErrorCode::InternalError);
    }
}
