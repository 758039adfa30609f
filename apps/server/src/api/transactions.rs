use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, OriginalUri, Query, State},
    http::{HeaderMap, Method},
    response::Response,
    routing::{get, patch, post},
    Router,
};
use fintrack_client::client::creation_path;
use fintrack_core::{
    pagination::TransactionFeed, recurrence::RecurrenceScope, transactions::TransactionType,
};
use serde::Deserialize;

use crate::{
    api::proxy::{forward, relay},
    auth::CallerAuth,
    error::ApiResult,
    main_lib::AppState,
};

#[derive(Deserialize)]
struct ScopeParams {
    #[serde(rename = "recurrenceScope")]
    recurrence_scope: Option<String>,
}

/// PATCH/DELETE of a single transaction. The recurrence scope is checked
/// before forwarding so that the backend never sees an unknown value.
async fn forward_scoped(
    State(state): State<Arc<AppState>>,
    CallerAuth(authorization): CallerAuth,
    params: Result<Query<ScopeParams>, QueryRejection>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let Query(params) = params?;
    if let Some(raw) = params.recurrence_scope.as_deref() {
        raw.parse::<RecurrenceScope>()?;
    }
    let client = state.backend(authorization);
    relay(&client, method, &uri, &headers, body).await
}

pub fn router() -> Router<Arc<AppState>> {
    let mut router = Router::new()
        .route("/transactions/balance/previous-month", get(forward))
        .route("/transactions/{id}", patch(forward_scoped).delete(forward_scoped));

    for feed in TransactionFeed::ALL {
        router = router.route(feed.path(), get(forward));
    }
    for kind in TransactionType::KNOWN {
        if let Ok(path) = creation_path(kind) {
            router = router.route(path, post(forward));
        }
    }
    router
}
