//! HTTP client for the Fintrack backend API.
//!
//! Both the proxy server and [`crate::DashboardSession`] talk to the backend
//! through this client so that authentication and error translation stay in
//! one place.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use fintrack_core::auth::{AuthSession, Credentials, Registration};
use fintrack_core::balances::MonthlyBalance;
use fintrack_core::categories::{Category, CategoryUpdate, NewCategory};
use fintrack_core::constants::RECURRENCE_SCOPE_PARAM;
use fintrack_core::errors::{Error, Result, ValidationError};
use fintrack_core::goals::{NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};
use fintrack_core::months::MonthFilter;
use fintrack_core::pagination::{Page, TransactionFeed, TransactionSource};
use fintrack_core::recurrence::RecurrenceScope;
use fintrack_core::transactions::{NewTransaction, Transaction, TransactionType, TransactionUpdate};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extracts the human readable message from an error body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|err| err.message.or(err.error))
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// Unparsed backend response, used for pass-through proxying.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Vec<u8>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the backend REST API.
///
/// # Example
///
/// ```ignore
/// let client = BackendClient::new("https://api.example.com", Some("token"))?;
/// let categories = client.list_categories().await?;
/// ```
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl BackendClient {
    /// Create a new client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token cannot be used as a header value
    /// or the HTTP client cannot be initialized.
    pub fn new(base_url: &str, access_token: Option<&str>) -> Result<Self> {
        let client = build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
        Self::with_http_client(client, base_url, access_token)
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_http_client(
        client: reqwest::Client,
        base_url: &str,
        access_token: Option<&str>,
    ) -> Result<Self> {
        let auth_header = access_token
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    Error::Unexpected(format!("Invalid access token format: {}", e))
                })
            })
            .transpose()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    /// Create a client that forwards a caller's `Authorization` header as is.
    pub fn with_authorization(
        client: reqwest::Client,
        base_url: &str,
        authorization: HeaderValue,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: Some(authorization),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_header.is_some()
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = self.url(path);
        debug!("[Backend] {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .headers(self.headers())
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }

    /// Make a request and parse the JSON response.
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, query, body).await?;
        self.parse_response(response).await
    }

    /// Make a request whose success body is irrelevant.
    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<()> {
        let response = self.send::<()>(method, path, query, None).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::Decode(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    /// Forward a request without interpreting either side of it.
    ///
    /// `path_and_query` is appended to the base URL verbatim.
    pub async fn send_raw<B: Into<reqwest::Body>>(
        &self,
        method: Method,
        path_and_query: &str,
        content_type: Option<HeaderValue>,
        body: Option<B>,
    ) -> Result<RawResponse> {
        let url = self.url(path_and_query);
        debug!("[Backend] forwarding {} {}", method, url);

        let mut headers = HeaderMap::new();
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        if let Some(content_type) = content_type {
            headers.insert(CONTENT_TYPE, content_type);
        }

        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?
            .to_vec();

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        let session: AuthSession = self
            .request(Method::POST, "/auth/login", &[], Some(credentials))
            .await?;
        info!("[Backend] Signed in as {}", session.user.id);
        Ok(session)
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthSession> {
        self.request(Method::POST, "/auth/register", &[], Some(registration))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Category Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories: Vec<Category> = self
            .request::<_, ()>(Method::GET, "/categories", &[], None)
            .await?;
        debug!("[Backend] Fetched {} categories", categories.len());
        Ok(categories)
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        self.request(Method::POST, "/categories", &[], Some(category))
            .await
    }

    pub async fn update_category(&self, id: &str, update: &CategoryUpdate) -> Result<Category> {
        let path = format!("/categories/{}", urlencoding::encode(id));
        self.request(Method::PATCH, &path, &[], Some(update)).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let path = format!("/categories/{}", urlencoding::encode(id));
        self.request_empty(Method::DELETE, &path, &[]).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transaction Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch one page of a month-scoped transaction listing.
    pub async fn list_feed_page(
        &self,
        feed: TransactionFeed,
        filter: &MonthFilter,
        page: u32,
        limit: u32,
    ) -> Result<Page<Transaction>> {
        let [year, month] = filter.query_pairs();
        let query = [
            year,
            month,
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        self.request::<_, ()>(Method::GET, feed.path(), &query, None)
            .await
    }

    /// Create a transaction through the endpoint matching its type.
    pub async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let path = creation_path(transaction.transaction_type)?;
        self.request(Method::POST, path, &[], Some(transaction)).await
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        update: &TransactionUpdate,
        scope: Option<RecurrenceScope>,
    ) -> Result<Transaction> {
        let path = format!("/transactions/{}", urlencoding::encode(id));
        let query = scope_pairs(scope);
        self.request(Method::PATCH, &path, &query, Some(update))
            .await
    }

    pub async fn delete_transaction(&self, id: &str, scope: Option<RecurrenceScope>) -> Result<()> {
        let path = format!("/transactions/{}", urlencoding::encode(id));
        let query = scope_pairs(scope);
        self.request_empty(Method::DELETE, &path, &query).await
    }

    /// Closing balance of the month before `filter`.
    pub async fn previous_month_balance(&self, filter: &MonthFilter) -> Result<MonthlyBalance> {
        let query = filter.query_pairs();
        self.request::<_, ()>(
            Method::GET,
            "/transactions/balance/previous-month",
            &query,
            None,
        )
        .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Savings Goal Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_savings_goals(&self) -> Result<Vec<SavingsGoal>> {
        self.request::<_, ()>(Method::GET, "/savings-goals", &[], None)
            .await
    }

    pub async fn create_savings_goal(&self, goal: &NewSavingsGoal) -> Result<SavingsGoal> {
        self.request(Method::POST, "/savings-goals", &[], Some(goal))
            .await
    }

    pub async fn update_savings_goal(
        &self,
        id: &str,
        update: &SavingsGoalUpdate,
    ) -> Result<SavingsGoal> {
        let path = format!("/savings-goals/{}", urlencoding::encode(id));
        self.request(Method::PATCH, &path, &[], Some(update)).await
    }

    pub async fn delete_savings_goal(&self, id: &str) -> Result<()> {
        let path = format!("/savings-goals/{}", urlencoding::encode(id));
        self.request_empty(Method::DELETE, &path, &[]).await
    }

    /// SAVINGS transactions attached to a goal.
    pub async fn savings_goal_transactions(&self, id: &str) -> Result<Vec<Transaction>> {
        let path = format!("/savings-goals/{}/transactions", urlencoding::encode(id));
        self.request::<_, ()>(Method::GET, &path, &[], None).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TransactionSource Trait Implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionSource for BackendClient {
    async fn fetch_feed_page(
        &self,
        feed: TransactionFeed,
        filter: &MonthFilter,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Transaction>> {
        self.list_feed_page(feed, filter, page, page_size).await
    }
}

/// Build a `reqwest` client with the given request timeout.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))
}

/// Backend path used to create a transaction of the given type.
pub fn creation_path(kind: TransactionType) -> Result<&'static str> {
    match kind {
        TransactionType::Expense => Ok("/transactions/expense"),
        TransactionType::Refund => Ok("/transactions/refund"),
        TransactionType::Income => Ok("/transactions/income"),
        TransactionType::Savings => Ok("/transactions/saving"),
        TransactionType::Bill => Ok("/transactions/bill"),
        TransactionType::Subscription => Ok("/transactions/subscription"),
        TransactionType::Unknown => Err(ValidationError::InvalidInput(
            "Cannot create a transaction of unknown type".to_string(),
        )
        .into()),
    }
}

fn scope_pairs(scope: Option<RecurrenceScope>) -> Vec<(&'static str, String)> {
    scope
        .map(|s| vec![(RECURRENCE_SCOPE_PARAM, s.as_str().to_string())])
        .unwrap_or_default()
}

fn status_error(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return Error::Unauthorized;
    }
    Error::Api {
        status: status.as_u16(),
        message: error_message(status, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new("https://api.example.com", Some("test-token"));
        assert!(client.is_ok());
        assert!(client.unwrap().is_authenticated());
    }

    #[test]
    fn test_client_url_normalization() {
        let client = BackendClient::new("https://api.example.com//", None).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let client = BackendClient::new("https://api.example.com", Some("bad\ntoken"));
        assert!(client.is_err());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Label required"}"#),
            "Label required"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"error":"Not found"}"#),
            "Not found"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>"),
            "HTTP 502 Bad Gateway"
        );
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            Error::Unauthorized
        ));
        let err = status_error(StatusCode::CONFLICT, r#"{"message":"Duplicate"}"#);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.user_message(), "Duplicate");
    }

    #[test]
    fn test_creation_paths() {
        assert_eq!(
            creation_path(TransactionType::Savings).unwrap(),
            "/transactions/saving"
        );
        assert!(creation_path(TransactionType::Unknown).is_err());
    }
}
