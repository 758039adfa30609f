use std::sync::Arc;

use axum::{routing::post, Router};

use crate::{api::proxy::forward_public, main_lib::AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(forward_public))
        .route("/auth/register", post(forward_public))
}
