//! Cash-flow module - daily cumulative series and monthly totals.

mod cashflow_aggregator;
mod cashflow_model;


pub use cashflow_aggregator::{aggregate_daily_cash_flow, summarize_month};
pub use cashflow_model::{DailyCashFlow, DailyCashFlowPoint, MonthlySummary};
