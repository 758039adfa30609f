use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::budget::round2;
use crate::cashflow::cashflow_model::{DailyCashFlow, DailyCashFlowPoint, MonthlySummary};
use crate::months::MonthFilter;
use crate::transactions::{Transaction, TransactionType};

/// Buckets a month's transactions per day and accumulates a running total.
///
/// Inflows (INCOME, REFUND) add, outflows (EXPENSE, SAVINGS, BILL,
/// SUBSCRIPTION) subtract. Transactions outside `filter` and transactions of
/// an unknown type are skipped and counted. The result is rebuilt from
/// scratch on every call.
pub fn aggregate_daily_cash_flow(
    transactions: &[Transaction],
    filter: &MonthFilter,
) -> DailyCashFlow {
    let days = filter.days_in_month() as usize;
    let mut buckets = vec![0.0_f64; days];
    let mut total_inflow = 0.0;
    let mut total_outflow = 0.0;
    let mut skipped_out_of_month = 0;
    let mut skipped_unknown = 0;

    for tx in transactions {
        if !filter.contains(tx.date) {
            skipped_out_of_month += 1;
            continue;
        }
        let sign = tx.transaction_type.flow_sign();
        if sign == 0 {
            skipped_unknown += 1;
            continue;
        }
        let day_index = (tx.date.day() - 1) as usize;
        let Some(bucket) = buckets.get_mut(day_index) else {
            skipped_out_of_month += 1;
            continue;
        };
        *bucket += f64::from(sign) * tx.value;
        if sign > 0 {
            total_inflow += tx.value;
        } else {
            total_outflow += tx.value;
        }
    }

    if skipped_out_of_month > 0 || skipped_unknown > 0 {
        debug!(
            "Cash flow for {}: skipped {} out-of-month and {} unknown-type transactions",
            filter, skipped_out_of_month, skipped_unknown
        );
    }

    let mut running = 0.0;
    let points = buckets
        .into_iter()
        .enumerate()
        .filter_map(|(i, net)| {
            let day = i as u32 + 1;
            let date = NaiveDate::from_ymd_opt(filter.year, filter.month, day)?;
            running += net;
            Some(DailyCashFlowPoint {
                day,
                date,
                net: round2(net),
                cumulative: round2(running),
            })
        })
        .collect();

    DailyCashFlow {
        filter: *filter,
        points,
        total_inflow: round2(total_inflow),
        total_outflow: round2(total_outflow),
        net: round2(total_inflow - total_outflow),
        skipped_out_of_month,
        skipped_unknown,
    }
}

/// Totals a month's transactions per type.
///
/// `opening_balance` is the previous month's closing balance; when given, the
/// summary also carries the month's closing balance.
pub fn summarize_month(
    transactions: &[Transaction],
    filter: &MonthFilter,
    opening_balance: Option<f64>,
) -> MonthlySummary {
    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| filter.contains(tx.date))
        .collect();
    let total = |kind: TransactionType| -> f64 {
        round2(
            in_month
                .iter()
                .filter(|tx| tx.transaction_type == kind)
                .map(|tx| tx.value)
                .sum(),
        )
    };

    let income = total(TransactionType::Income);
    let expenses = total(TransactionType::Expense);
    let refunds = total(TransactionType::Refund);
    let savings = total(TransactionType::Savings);
    let bills = total(TransactionType::Bill);
    let subscriptions = total(TransactionType::Subscription);

    let inflow = round2(income + refunds);
    let outflow = round2(expenses + savings + bills + subscriptions);
    let net = round2(inflow - outflow);

    MonthlySummary {
        filter: *filter,
        income,
        expenses,
        refunds,
        savings,
        bills,
        subscriptions,
        inflow,
        outflow,
        net,
        opening_balance,
        closing_balance: opening_balance.map(|opening| round2(opening + net)),
        transaction_count: in_month.len(),
    }
}
