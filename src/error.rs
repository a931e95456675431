use actix_web::{body, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::authorize::ResolveError;

/// Request-boundary error taxonomy.
///
/// Validation and primary persistence failures propagate here and become
/// error responses; failures inside the derived posting branches never do,
/// they are downgraded to warnings by the coordinator.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authorization(String),

    #[error("database error")]
    Persistence(#[from] sea_orm::DbErr),

    /// Strict mode only: a derived posting branch failed after the setoran
    /// row was already durable.
    #[error("derived posting failed: {0}")]
    PostingFailed(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl actix_web::error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "message": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authorization(_) => StatusCode::FORBIDDEN,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PostingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Forbidden(message) => ApiError::Authorization(message),
            // An unknown target employee is a bad request, not a 404 page
            ResolveError::NotFound(id) => ApiError::Validation(format!("employee `{id}` does not exist")),
            ResolveError::Db(err) => ApiError::Persistence(err),
        }
    }
}
