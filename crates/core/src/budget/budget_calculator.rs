use std::collections::HashMap;

use log::debug;

use crate::budget::budget_model::{BudgetOverview, BudgetProgress, CategoryBudget};
use crate::categories::Category;
use crate::colors::progress_color;
use crate::months::MonthFilter;
use crate::transactions::{Transaction, TransactionType};

/// Rounds to two decimals (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum of `value` over transactions of the given type.
pub fn sum_of_type(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.transaction_type == kind)
        .map(|tx| tx.value)
        .sum()
}

/// Percentage of `cap` consumed by `spent`, clamped to [0, 100].
///
/// A cap of zero or less counts as fully consumed as soon as anything has
/// been spent.
fn consumption(spent: f64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return if spent > 0.0 { 100.0 } else { 0.0 };
    }
    round2(spent / cap * 100.0).clamp(0.0, 100.0)
}

impl BudgetProgress {
    /// Computes progress for one category from its transactions of the month.
    ///
    /// Only EXPENSE and REFUND transactions contribute; anything else is
    /// ignored.
    pub fn compute(budget: Option<f64>, transactions: &[Transaction]) -> Self {
        let total_spent = sum_of_type(transactions, TransactionType::Expense);
        let total_refunds = sum_of_type(transactions, TransactionType::Refund);

        let Some(budget) = budget else {
            return Self {
                budget: None,
                total_spent,
                total_refunds,
                progress: 0.0,
                show_bar: false,
                is_budget_overloaded: false,
                budget_overload_amount: None,
                remaining: None,
                background_color: progress_color(0.0),
            };
        };

        let is_budget_overloaded = total_refunds > 0.0;
        let cap = if is_budget_overloaded {
            budget + total_refunds
        } else {
            budget
        };
        let progress = consumption(total_spent, cap);

        Self {
            budget: Some(budget),
            total_spent,
            total_refunds,
            progress,
            show_bar: true,
            is_budget_overloaded,
            budget_overload_amount: is_budget_overloaded.then_some(cap),
            remaining: Some((cap - total_spent).max(0.0)),
            background_color: progress_color(progress),
        }
    }
}

/// Builds the budget overview of a month.
///
/// Transactions outside `filter` are dropped; the rest are grouped by
/// `category_id`. Categories keep the order they were given in.
pub fn compute_category_budgets(
    categories: &[Category],
    transactions: &[Transaction],
    filter: &MonthFilter,
) -> BudgetOverview {
    let mut by_category: HashMap<&str, Vec<Transaction>> = HashMap::new();
    let mut uncategorized_spent = 0.0;
    let mut outside_month = 0usize;

    for tx in transactions {
        if !filter.contains(tx.date) {
            outside_month += 1;
            continue;
        }
        let known = tx
            .category_id
            .as_deref()
            .filter(|id| categories.iter().any(|c| c.id == *id));
        match known {
            Some(id) => by_category.entry(id).or_default().push(tx.clone()),
            None if tx.transaction_type == TransactionType::Expense => {
                uncategorized_spent += tx.value;
            }
            None => {}
        }
    }

    if outside_month > 0 {
        debug!(
            "Ignored {} transactions outside {} while computing budgets",
            outside_month, filter
        );
    }

    let categories: Vec<CategoryBudget> = categories
        .iter()
        .map(|category| {
            let txs = by_category
                .get(category.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            CategoryBudget {
                tint: category.tint(),
                progress: BudgetProgress::compute(category.budget, txs),
                category: category.clone(),
            }
        })
        .collect();

    BudgetOverview {
        total_budget: categories.iter().filter_map(|c| c.progress.budget).sum(),
        total_spent: categories.iter().map(|c| c.progress.total_spent).sum(),
        total_refunds: categories.iter().map(|c| c.progress.total_refunds).sum(),
        uncategorized_spent,
        categories,
    }
}
