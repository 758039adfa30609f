//! Pass-through forwarding of `/api/*` calls to the backend.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use fintrack_client::{client::error_message, BackendClient, RawResponse};

use crate::{auth::CallerAuth, error::ApiError, error::ApiResult, main_lib::AppState};

const API_PREFIX: &str = "/api";

/// Forwards the request with the caller's `Authorization` header.
pub async fn forward(
    State(state): State<Arc<AppState>>,
    CallerAuth(authorization): CallerAuth,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let client = state.backend(authorization);
    relay(&client, method, &uri, &headers, body).await
}

/// Forwards a request that needs no credentials (sign-in, registration).
pub async fn forward_public(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let client = state.anonymous_backend()?;
    relay(&client, method, &uri, &headers, body).await
}

pub async fn relay(
    client: &BackendClient,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let target = upstream_path(uri);
    tracing::debug!("Forwarding {} {}", method, target);

    let content_type = headers.get(CONTENT_TYPE).cloned();
    let body = (!body.is_empty()).then_some(body);
    let raw = client.send_raw(method, &target, content_type, body).await?;
    into_response(raw)
}

/// Backend path for an incoming URI: the `/api` prefix is dropped, the query
/// string is kept.
pub fn upstream_path(uri: &Uri) -> String {
    let path = uri.path();
    let path = match path.strip_prefix(API_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    }
}

fn into_response(raw: RawResponse) -> ApiResult<Response> {
    if raw.status == StatusCode::NO_CONTENT {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    if !raw.status.is_success() {
        let body = String::from_utf8_lossy(&raw.body);
        return Err(ApiError::Upstream {
            status: raw.status,
            message: error_message(raw.status, &body),
        });
    }

    if raw.body.is_empty() {
        return Ok(raw.status.into_response());
    }
    // Success bodies must be JSON; anything else is reported as a failure.
    serde_json::from_slice::<serde_json::Value>(&raw.body)
        .map_err(|e| ApiError::Internal(format!("Backend returned invalid JSON: {}", e)))?;

    let content_type = raw
        .content_type
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));
    Ok((raw.status, [(CONTENT_TYPE, content_type)], raw.body).into_response())
}
