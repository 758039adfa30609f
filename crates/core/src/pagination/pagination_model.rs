//! Pagination models.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};

/// One page of a paginated backend listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    #[serde(alias = "items", alias = "transactions")]
    pub data: Vec<T>,
    /// 1-based page number echoed by the backend.
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    #[serde(alias = "has_next_page", alias = "hasMore")]
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, page: u32, has_next_page: bool) -> Self {
        Self {
            data,
            page,
            has_next_page,
            total: None,
        }
    }
}

/// Configuration for exhaustive pagination.
#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    /// Number of items requested per page.
    pub page_size: u32,
    /// Maximum number of pages fetched per listing (safety limit).
    pub max_pages: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// The month-scoped transaction listings exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFeed {
    Bills,
    Subscriptions,
    Incomes,
    Savings,
    /// Expenses and refunds.
    Expenses,
}

impl TransactionFeed {
    pub const ALL: [TransactionFeed; 5] = [
        TransactionFeed::Bills,
        TransactionFeed::Subscriptions,
        TransactionFeed::Incomes,
        TransactionFeed::Savings,
        TransactionFeed::Expenses,
    ];

    /// Backend path of the listing.
    pub fn path(self) -> &'static str {
        match self {
            TransactionFeed::Bills => "/transactions/bills",
            TransactionFeed::Subscriptions => "/transactions/subscriptions",
            TransactionFeed::Incomes => "/transactions/incomes",
            TransactionFeed::Savings => "/transactions/savings",
            TransactionFeed::Expenses => "/transactions/expenses",
        }
    }
}
