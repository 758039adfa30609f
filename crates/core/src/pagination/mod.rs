//! Pagination module - exhaustive page loops and the month fan-out.

mod pagination_model;
mod pagination_service;

#[cfg(test)]
mod pagination_service_tests;

pub use pagination_model::{Page, PaginationConfig, TransactionFeed};
pub use pagination_service::{
    collect_month_transactions, fetch_all_pages, PageFetcher, TransactionSource,
};
