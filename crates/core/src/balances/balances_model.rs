//! Monthly balance model.

use serde::{Deserialize, Serialize};

/// Net balance of a closed month.
///
/// The backend has shipped this value under three different names over
/// time. They are folded into `closing_balance` when the payload is decoded,
/// preferring `closingBalance`, then `balance`, then `netBalance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MonthlyBalanceWire")]
pub struct MonthlyBalance {
    pub closing_balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthlyBalanceWire {
    #[serde(default)]
    closing_balance: Option<f64>,
    #[serde(default)]
    balance: Option<f64>,
    #[serde(default)]
    net_balance: Option<f64>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    month: Option<u32>,
}

impl From<MonthlyBalanceWire> for MonthlyBalance {
    fn from(wire: MonthlyBalanceWire) -> Self {
        let closing_balance = wire
            .closing_balance
            .or(wire.balance)
            .or(wire.net_balance)
            .unwrap_or(0.0);
        Self {
            closing_balance,
            year: wire.year,
            month: wire.month,
        }
    }
}
