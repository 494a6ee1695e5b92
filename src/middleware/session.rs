//! Session identity.
//!
//! The dashboard page holds a UUID and sends it on every request as the
//! `x-session-id` header. History is scoped to that id. A request without a
//! usable id gets a fresh one, which simply means an empty history.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Session identity extracted from the request headers.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .unwrap_or_else(|| {
                let fresh = Uuid::new_v4();
                tracing::debug!(session = %fresh, "no usable session header, issuing fresh session");
                fresh
            });

        Ok(SessionId(id))
    }
}
