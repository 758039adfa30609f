//! In-process fake backend shared by the router tests.

use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};

use fintrack_server::{api::app_router, build_state, config::Config};

pub const TOKEN: &str = "Bearer tok-1";

#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

pub type Log = Arc<Mutex<Vec<Seen>>>;

fn expense(i: usize) -> Value {
    json!({
        "id": format!("exp-{}", i),
        "userId": "user-1",
        "label": format!("Groceries {}", i),
        "date": format!("2024-03-{:02}", i + 1),
        "value": 20.0,
        "type": "EXPENSE",
        "categoryId": "cat-food"
    })
}

fn page_of(query: &str, total: usize, make: fn(usize) -> Value) -> Value {
    let param = |name: &str| -> Option<usize> {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == name)
            .and_then(|(_, v)| v.parse().ok())
    };
    let page = param("page").unwrap_or(1);
    let limit = param("limit").unwrap_or(100);
    let start = ((page - 1) * limit).min(total);
    let end = (start + limit).min(total);
    let data: Vec<Value> = (start..end).map(make).collect();
    json!({"data": data, "page": page, "hasNextPage": end < total})
}

/// Every request is recorded; responses are picked by method and path.
async fn upstream(State(log): State<Log>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap();
    let seen = Seen {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).to_string(),
    };
    log.lock().unwrap().push(seen.clone());

    if seen.path == "/auth/login" {
        return Json(json!({"user": {"id": "user-1", "email": "a@b.c"}, "token": "tok-1"}))
            .into_response();
    }
    if seen.authorization.as_deref() != Some(TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid token"})))
            .into_response();
    }

    let query = seen.query.clone().unwrap_or_default();
    match (seen.method.as_str(), seen.path.as_str()) {
        ("GET", "/categories") => Json(json!([
            {"id": "cat-food", "label": "Food", "color": "#f00", "budget": 100.0},
            {"id": "cat-fun", "label": "Fun"}
        ]))
        .into_response(),
        ("POST", "/categories") => {
            let mut created: Value = serde_json::from_str(&seen.body).unwrap();
            created["id"] = json!("cat-new");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        ("DELETE", path) if path.starts_with("/categories/") => {
            if path.ends_with("/missing") {
                (StatusCode::NOT_FOUND, Json(json!({"error": "Category not found"})))
                    .into_response()
            } else {
                StatusCode::NO_CONTENT.into_response()
            }
        }
        ("GET", "/transactions/expenses") => Json(page_of(&query, 3, expense)).into_response(),
        ("GET", "/transactions/balance/previous-month") => {
            Json(json!({"closingBalance": 1000.0})).into_response()
        }
        ("GET", path) if path.starts_with("/transactions/") => {
            Json(json!({"data": [], "page": 1, "hasNextPage": false})).into_response()
        }
        ("GET", "/savings-goals/slow/transactions") => {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            Json(json!([])).into_response()
        }
        ("GET", "/savings-goals/broken/transactions") => {
            (StatusCode::OK, "not json").into_response()
        }
        ("DELETE", path) if path.starts_with("/transactions/") => {
            StatusCode::NO_CONTENT.into_response()
        }
        _ => Json(json!({"ok": true})).into_response(),
    }
}

pub async fn spawn_upstream() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(upstream).with_state(log.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), log)
}

pub async fn build_test_router(api_url: &str) -> Router {
    let mut config = Config::for_api_url(api_url);
    config.page_size = 2;
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
