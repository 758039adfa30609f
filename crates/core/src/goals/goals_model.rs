//! Savings goal domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::backend_date_opt;

/// Domain model representing a savings goal.
///
/// `current_amount` is maintained by the backend from the goal's SAVINGS
/// transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(
        default,
        with = "backend_date_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

impl SavingsGoal {
    /// Share of the target already saved, clamped to [0, 100].
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        let raw = crate::budget::round2(self.current_amount / self.target_amount * 100.0);
        raw.clamp(0.0, 100.0)
    }

    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_achieved(&self) -> bool {
        self.target_amount > 0.0 && self.current_amount >= self.target_amount
    }
}

/// Input model for creating a new savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(
        default,
        with = "backend_date_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

/// Partial update of a savings goal (PATCH body)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(
        default,
        with = "backend_date_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}
