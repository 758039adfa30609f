//! Transaction domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::format_transaction_label;
use crate::utils::time_utils::{backend_date, backend_date_opt};

/// Kind of money movement a transaction represents.
///
/// The backend stores every amount as a positive magnitude; the type decides
/// whether it flows in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Expense,
    Refund,
    Income,
    Savings,
    Bill,
    Subscription,
    /// Any type this build does not know about.
    #[serde(other)]
    Unknown,
}

impl TransactionType {
    pub const KNOWN: [TransactionType; 6] = [
        TransactionType::Expense,
        TransactionType::Refund,
        TransactionType::Income,
        TransactionType::Savings,
        TransactionType::Bill,
        TransactionType::Subscription,
    ];

    /// +1 for inflows, -1 for outflows, 0 for unknown types.
    pub fn flow_sign(self) -> i8 {
        match self {
            TransactionType::Income | TransactionType::Refund => 1,
            TransactionType::Savings
            | TransactionType::Bill
            | TransactionType::Subscription
            | TransactionType::Expense => -1,
            TransactionType::Unknown => 0,
        }
    }

    pub fn is_inflow(self) -> bool {
        self.flow_sign() > 0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Expense => "EXPENSE",
            TransactionType::Refund => "REFUND",
            TransactionType::Income => "INCOME",
            TransactionType::Savings => "SAVINGS",
            TransactionType::Bill => "BILL",
            TransactionType::Subscription => "SUBSCRIPTION",
            TransactionType::Unknown => "UNKNOWN",
        }
    }
}

/// Domain model representing a transaction as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub label: String,
    #[serde(with = "backend_date")]
    pub date: NaiveDate,
    pub value: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_number: Option<String>,
}

impl Transaction {
    /// Magnitude with the sign implied by the transaction type.
    pub fn signed_value(&self) -> f64 {
        f64::from(self.transaction_type.flow_sign()) * self.value
    }

    /// Whether this transaction belongs to a recurring series.
    pub fn is_recurring(&self) -> bool {
        let has_recurrence = self
            .recurrence
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty());
        has_recurrence || self.parent_transaction_id.is_some()
    }

    /// Label with the occurrence suffix (`Rent 3/12`) when one is available.
    pub fn display_label(&self) -> String {
        format_transaction_label(&self.label, self.occurrence_number.as_deref())
    }
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub label: String,
    #[serde(with = "backend_date")]
    pub date: NaiveDate,
    pub value: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
}

/// Partial update of a transaction (PATCH body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(
        default,
        with = "backend_date_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
}

impl TransactionUpdate {
    /// Applies the update to a cached transaction.
    pub fn apply_to(&self, tx: &mut Transaction) {
        if let Some(label) = &self.label {
            tx.label = label.clone();
        }
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(value) = self.value {
            tx.value = value;
        }
        if let Some(category_id) = &self.category_id {
            tx.category_id = Some(category_id.clone());
        }
        if let Some(is_paid) = self.is_paid {
            tx.is_paid = Some(is_paid);
        }
    }
}
