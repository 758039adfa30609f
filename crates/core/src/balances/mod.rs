mod balances_model;

pub use balances_model::MonthlyBalance;
