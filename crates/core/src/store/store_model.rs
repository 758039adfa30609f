//! Client-side state container.
//!
//! One explicit store replaces the separate auth, categories and
//! transactions stores. Every change goes through [`StoreAction`]; see
//! [`DashboardStore::apply`] for the action to mutation mapping.

use serde::Serialize;

use crate::auth::AuthSession;
use crate::categories::Category;
use crate::months::MonthFilter;
use crate::recurrence::RecurrenceScope;
use crate::transactions::Transaction;

/// Everything a state change can be triggered by.
#[derive(Debug, Clone)]
pub enum StoreAction {
    SignedIn(AuthSession),
    SignedOut,
    /// The backend answered 401; the token is no longer usable.
    SessionExpired,
    FilterChanged(MonthFilter),
    CategoriesLoaded(Vec<Category>),
    CategoryUpserted(Category),
    CategoryDeleted(String),
    TransactionsLoaded(MonthFilter, Vec<Transaction>),
    TransactionUpserted(Transaction),
    TransactionDeleted {
        id: String,
        scope: RecurrenceScope,
    },
    /// A change reached other occurrences of a series; refetch the month.
    TransactionsInvalidated,
}

/// Cached value plus whether it still reflects the backend.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cached<T> {
    pub value: T,
    pub fresh: bool,
}

impl<T: Default> Cached<T> {
    pub(crate) fn reset(&mut self) {
        self.value = T::default();
        self.fresh = false;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStore {
    pub session: Option<AuthSession>,
    pub filter: MonthFilter,
    pub categories: Cached<Vec<Category>>,
    pub transactions: Cached<Vec<Transaction>>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new(MonthFilter::current())
    }
}
