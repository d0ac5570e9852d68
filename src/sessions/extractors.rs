use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

pub const SESSION_HEADER: &str = "x-session-id";

/// Session id taken from the `X-Session-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::bad_request("missing X-Session-Id header"))?;

        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::bad_request("invalid X-Session-Id header"))?;

        Ok(SessionId(id))
    }
}
