use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::shared::AppError;

/// Header carrying the caller identity on every API request
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the caller, read from the `X-User-Id` header.
///
/// Handlers take this as an argument instead of reading headers themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the caller from request headers, rejecting missing or blank values
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Result<Self, AppError> {
        let value = headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                warn!("Missing or invalid X-User-Id header in request");
                AppError::Unauthorized("Missing X-User-Id header".to_string())
            })?;

        Ok(Self(value.to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}
