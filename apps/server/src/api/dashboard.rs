//! Dashboard views computed from the caller's backend data.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use fintrack_core::{
    budget::{compute_category_budgets, BudgetOverview},
    cashflow::{aggregate_daily_cash_flow, summarize_month, DailyCashFlow, MonthlySummary},
    errors::Error as CoreError,
    months::MonthFilter,
    pagination::collect_month_transactions,
};
use serde::Deserialize;

use crate::{auth::CallerAuth, error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
struct MonthQuery {
    year: Option<i32>,
    month: Option<u32>,
}

impl MonthQuery {
    /// Missing parts default to the current month.
    fn filter(&self) -> ApiResult<MonthFilter> {
        let current = MonthFilter::current();
        Ok(MonthFilter::new(
            self.year.unwrap_or(current.year),
            self.month.unwrap_or(current.month),
        )?)
    }
}

async fn get_budgets(
    State(state): State<Arc<AppState>>,
    CallerAuth(authorization): CallerAuth,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<Json<BudgetOverview>> {
    let Query(query) = query?;
    let filter = query.filter()?;
    let client = state.backend(authorization);
    let (categories, transactions) = futures::try_join!(
        client.list_categories(),
        collect_month_transactions(&client, &filter, &state.pagination),
    )?;
    Ok(Json(compute_category_budgets(
        &categories,
        &transactions,
        &filter,
    )))
}

async fn get_cash_flow(
    State(state): State<Arc<AppState>>,
    CallerAuth(authorization): CallerAuth,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<Json<DailyCashFlow>> {
    let Query(query) = query?;
    let filter = query.filter()?;
    let client = state.backend(authorization);
    let transactions = collect_month_transactions(&client, &filter, &state.pagination).await?;
    Ok(Json(aggregate_daily_cash_flow(&transactions, &filter)))
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    CallerAuth(authorization): CallerAuth,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<Json<MonthlySummary>> {
    let Query(query) = query?;
    let filter = query.filter()?;
    let client = state.backend(authorization);
    let transactions = collect_month_transactions(&client, &filter, &state.pagination).await?;
    let opening = match client.previous_month_balance(&filter).await {
        Ok(balance) => Some(balance.closing_balance),
        Err(CoreError::Unauthorized) => return Err(CoreError::Unauthorized.into()),
        Err(e) => {
            tracing::warn!("Previous month balance unavailable for {}: {}", filter, e);
            None
        }
    };
    Ok(Json(summarize_month(&transactions, &filter, opening)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/budgets", get(get_budgets))
        .route("/dashboard/cash-flow", get(get_cash_flow))
        .route("/dashboard/summary", get(get_summary))
}
