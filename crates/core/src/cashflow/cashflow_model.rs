//! Cash-flow models.

use chrono::NaiveDate;
use serde::Serialize;

use crate::months::MonthFilter;

/// One day of the cumulative cash-flow series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCashFlowPoint {
    /// Day of month, starting at 1.
    pub day: u32,
    pub date: NaiveDate,
    /// Signed movements of this day only.
    pub net: f64,
    /// Running total from the first of the month up to and including this day.
    pub cumulative: f64,
}

/// Daily cumulative cash flow of a month, ready for an area chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCashFlow {
    pub filter: MonthFilter,
    pub points: Vec<DailyCashFlowPoint>,
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub net: f64,
    /// Transactions dropped because they fall outside the month.
    pub skipped_out_of_month: usize,
    /// Transactions dropped because their type has no known flow direction.
    pub skipped_unknown: usize,
}

impl DailyCashFlow {
    /// Cumulative values only, in day order.
    pub fn cumulative_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.cumulative).collect()
    }
}

/// Per-type totals of a month and the resulting balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub filter: MonthFilter,
    pub income: f64,
    pub expenses: f64,
    pub refunds: f64,
    pub savings: f64,
    pub bills: f64,
    pub subscriptions: f64,
    pub inflow: f64,
    pub outflow: f64,
    /// inflow - outflow
    pub net: f64,
    /// Closing balance of the previous month, when known.
    pub opening_balance: Option<f64>,
    /// opening_balance + net, when the opening balance is known.
    pub closing_balance: Option<f64>,
    pub transaction_count: usize,
}
