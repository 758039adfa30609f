//! Budget module - per-category progress against monthly budgets.

mod budget_calculator;
mod budget_model;


pub use budget_calculator::{compute_category_budgets, round2, sum_of_type};
pub use budget_model::{BudgetOverview, BudgetProgress, CategoryBudget};
