//! Budget progress models.

use serde::Serialize;

use crate::categories::Category;

/// Spending against a category's monthly budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    /// Nominal monthly budget, if the category has one.
    pub budget: Option<f64>,
    /// Sum of EXPENSE values.
    pub total_spent: f64,
    /// Sum of REFUND values.
    pub total_refunds: f64,
    /// Consumption of the effective cap in percent, clamped to [0, 100].
    pub progress: f64,
    /// False when the category has no budget.
    pub show_bar: bool,
    /// Refunds have raised the cap above the nominal budget.
    pub is_budget_overloaded: bool,
    /// The raised cap (budget + refunds) when overloaded.
    pub budget_overload_amount: Option<f64>,
    /// What is left under the effective cap.
    pub remaining: Option<f64>,
    pub background_color: String,
}

/// A category together with its progress for the selected month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudget {
    pub category: Category,
    /// Translucent tint derived from the category colour.
    pub tint: Option<String>,
    pub progress: BudgetProgress,
}

/// All category budgets for a month plus roll-ups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub categories: Vec<CategoryBudget>,
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_refunds: f64,
    /// EXPENSE value of the month not attached to any known category.
    pub uncategorized_spent: f64,
}
