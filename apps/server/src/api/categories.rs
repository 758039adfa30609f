use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::{api::proxy::forward, main_lib::AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(forward).post(forward))
        .route("/categories/{id}", patch(forward).delete(forward))
}
