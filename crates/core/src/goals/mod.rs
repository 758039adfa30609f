//! Savings goals module - domain models.

mod goals_model;

pub use goals_model::{NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};
