use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};

use crate::error::ApiError;

/// The caller's `Authorization` header, forwarded to the backend unchanged.
///
/// The token is not validated here; the backend is the only authority on it.
/// Requests without the header are rejected before any network call.
#[derive(Debug, Clone)]
pub struct CallerAuth(pub HeaderValue);

impl<S> FromRequestParts<S> for CallerAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .filter(|value| value.to_str().is_ok_and(|v| !v.trim().is_empty()))
            .ok_or(ApiError::Unauthorized)?;
        Ok(CallerAuth(header.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CallerAuth, ApiError> {
        let (mut parts, _) = request.into_parts();
        CallerAuth::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_header_is_kept_verbatim() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer abc")
            .body(())
            .unwrap();
        let CallerAuth(value) = extract(request).await.unwrap();
        assert_eq!(value, "Bearer abc");
    }

    #[tokio::test]
    async fn test_missing_or_blank_header_is_rejected() {
        let request = Request::builder().body(()).unwrap();
        assert!(matches!(extract(request).await, Err(ApiError::Unauthorized)));

        let request = Request::builder()
            .header(AUTHORIZATION, "  ")
            .body(())
            .unwrap();
        assert!(matches!(extract(request).await, Err(ApiError::Unauthorized)));
    }
}
