use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Every error body has the shape `{"error": "<message>"}`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // The repository refused an invalid value the handler let through.
            AppError::Database(DbError::Validation(validation_err)) => {
                tracing::warn!(error = %validation_err, "Write rejected by repository validation.");
                (StatusCode::BAD_REQUEST, validation_err.to_string())
            }
            AppError::Database(DbError::NotFound) => (
                StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            ),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use core_types::ValidationError;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_404_with_message() {
        let response = AppError::NotFound("Hero not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Hero not found" }));
    }

    #[tokio::test]
    async fn repository_validation_is_400() {
        let err = AppError::from(DbError::Validation(ValidationError::DescriptionTooShort {
            min: 20,
        }));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Description must be at least 20 characters long" })
        );
    }

    #[tokio::test]
    async fn storage_failure_is_500_without_details() {
        let err = AppError::from(DbError::ConnectionConfigError("pool closed".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "An internal database error occurred" })
        );
    }
}
