/// Actor identity extraction
///
/// Token issuance and validation live in the upstream auth gateway; by the
/// time a request reaches this core the gateway has resolved the admin's
/// identity into the `x-admin-actor` header. The extractor makes that
/// identity an explicit parameter of every moderation handler instead of
/// ambient state.
use crate::error::AdminError;
use crate::moderation::Actor;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header installed by the auth gateway
pub const ACTOR_HEADER: &str = "x-admin-actor";

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor_id = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AdminError::Authentication(format!("Missing {} header", ACTOR_HEADER))
            })?;

        Ok(Actor::new(actor_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Actor, AdminError> {
        let (mut parts, _) = request.into_parts();
        Actor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_actor_from_header() {
        let request = Request::builder()
            .header(ACTOR_HEADER, "admin-42")
            .body(())
            .unwrap();

        let actor = extract(request).await.unwrap();
        assert_eq!(actor.id, "admin-42");
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let request = Request::builder().body(()).unwrap();
        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, AdminError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_blank_header_rejected() {
        let request = Request::builder()
            .header(ACTOR_HEADER, "   ")
            .body(())
            .unwrap();
        assert!(extract(request).await.is_err());
    }
}
