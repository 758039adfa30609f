use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use fintrack_core::constants::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Base URL of the backend every `/api` call is forwarded to.
    pub api_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("FT_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid FT_LISTEN_ADDR")?;
        let api_url = std::env::var("FT_API_URL")
            .or_else(|_| std::env::var("NEXT_PUBLIC_API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();
        let cors_allow = std::env::var("FT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("FT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let page_size: u32 = std::env::var("FT_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Ok(Self {
            listen_addr,
            api_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            page_size,
        })
    }

    /// Configuration pointing at `api_url`, with every other value defaulted.
    pub fn for_api_url(api_url: &str) -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            api_url: api_url.trim_end_matches('/').to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
