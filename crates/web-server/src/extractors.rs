use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// An integer row id taken from the path.
///
/// A segment that is not an integer can never name a row, so it is answered
/// with a JSON 404 rather than axum's plain-text 400.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Not found".to_string()))?;
        Ok(Self(id))
    }
}
