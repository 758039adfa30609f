use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::{api::proxy::forward, main_lib::AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/savings-goals", get(forward).post(forward))
        .route("/savings-goals/{id}", patch(forward).delete(forward))
        .route("/savings-goals/{id}/transactions", get(forward))
}
