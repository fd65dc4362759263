//! Request body extraction.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use super::ApiError;
use crate::models::wire::from_slice_ignore_case;

/// JSON body whose object keys are matched case-insensitively.
///
/// Unlike `axum::Json` no content type is required.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for CaseInsensitiveJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let value = from_slice_ignore_case(&bytes)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        Ok(Self(value))
    }
}
