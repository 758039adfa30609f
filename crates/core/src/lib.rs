//! Fintrack Core - domain model and month-bucketed aggregation.
//!
//! This crate holds everything the dashboard computes on its own: budget
//! progress, daily cash flow, monthly summaries, display formatting and the
//! client-side store. It performs no I/O; backend access is abstracted
//! behind the traits in [`pagination`].

pub mod auth;
pub mod balances;
pub mod budget;
pub mod cashflow;
pub mod categories;
pub mod colors;
pub mod constants;
pub mod errors;
pub mod format;
pub mod goals;
pub mod months;
pub mod pagination;
pub mod recurrence;
pub mod store;
pub mod transactions;
pub mod utils;

// Re-export the types most callers need
pub use categories::Category;
pub use goals::SavingsGoal;
pub use months::MonthFilter;
pub use transactions::{Transaction, TransactionType};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
