use std::sync::Arc;

use axum::http::HeaderValue;
use fintrack_client::{client::build_http_client, BackendClient};
use fintrack_core::pagination::PaginationConfig;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub api_url: String,
    /// Shared connection pool for every forwarded call.
    pub http: reqwest::Client,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Backend client acting with the caller's `Authorization` header.
    pub fn backend(&self, authorization: HeaderValue) -> BackendClient {
        BackendClient::with_authorization(self.http.clone(), &self.api_url, authorization)
    }

    /// Backend client for routes that need no credentials.
    pub fn anonymous_backend(&self) -> fintrack_core::Result<BackendClient> {
        BackendClient::with_http_client(self.http.clone(), &self.api_url, None)
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("FT_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let http = build_http_client(config.request_timeout)?;
    tracing::info!("Forwarding API calls to {}", config.api_url);

    Ok(Arc::new(AppState {
        api_url: config.api_url.clone(),
        http,
        pagination: PaginationConfig {
            page_size: config.page_size,
            ..PaginationConfig::default()
        },
    }))
}
