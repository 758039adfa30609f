use log::debug;

use crate::auth::AuthSession;
use crate::months::MonthFilter;
use crate::recurrence::RecurrenceScope;
use crate::store::store_model::{Cached, DashboardStore, StoreAction};

impl DashboardStore {
    pub fn new(filter: MonthFilter) -> Self {
        Self {
            session: None,
            filter,
            categories: Cached::default(),
            transactions: Cached::default(),
        }
    }

    /// Applies one action.
    ///
    /// | action | mutation |
    /// |---|---|
    /// | `SignedIn` | session set, caches cleared |
    /// | `SignedOut`, `SessionExpired` | session and caches cleared |
    /// | `FilterChanged` | filter set, transactions invalidated when the month differs |
    /// | `CategoriesLoaded` | categories replaced |
    /// | `CategoryUpserted` | category patched in place or appended |
    /// | `CategoryDeleted` | category removed, cached transactions detached from it |
    /// | `TransactionsLoaded` | transactions replaced if the month is the current filter |
    /// | `TransactionUpserted` | patched in place inside the month, invalidated otherwise |
    /// | `TransactionDeleted` | removed for `CURRENT_ONLY`, invalidated for wider scopes |
    /// | `TransactionsInvalidated` | transactions marked stale |
    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::SignedIn(session) => {
                self.clear_caches();
                self.session = Some(session);
            }
            StoreAction::SignedOut | StoreAction::SessionExpired => {
                self.clear_caches();
                self.session = None;
            }
            StoreAction::FilterChanged(filter) => {
                if filter != self.filter {
                    self.filter = filter;
                    self.transactions.reset();
                }
            }
            StoreAction::CategoriesLoaded(categories) => {
                self.categories.value = categories;
                self.categories.fresh = true;
            }
            StoreAction::CategoryUpserted(category) => {
                let cached = &mut self.categories.value;
                match cached.iter_mut().find(|c| c.id == category.id) {
                    Some(existing) => *existing = category,
                    None => cached.push(category),
                }
            }
            StoreAction::CategoryDeleted(id) => {
                self.categories.value.retain(|c| c.id != id);
                for tx in self.transactions.value.iter_mut() {
                    if tx.category_id.as_deref() == Some(id.as_str()) {
                        tx.category_id = None;
                    }
                }
            }
            StoreAction::TransactionsLoaded(filter, transactions) => {
                if filter == self.filter {
                    self.transactions.value = transactions;
                    self.transactions.fresh = true;
                } else {
                    debug!(
                        "Dropping transactions for {} while {} is selected",
                        filter, self.filter
                    );
                }
            }
            StoreAction::TransactionUpserted(tx) => {
                if !self.filter.contains(tx.date) {
                    self.transactions.value.retain(|t| t.id != tx.id);
                    self.transactions.fresh = false;
                    return;
                }
                let cached = &mut self.transactions.value;
                match cached.iter_mut().find(|t| t.id == tx.id) {
                    Some(existing) => *existing = tx,
                    None => cached.push(tx),
                }
            }
            StoreAction::TransactionDeleted { id, scope } => {
                self.transactions.value.retain(|t| t.id != id);
                if scope != RecurrenceScope::CurrentOnly {
                    self.transactions.fresh = false;
                }
            }
            StoreAction::TransactionsInvalidated => {
                self.transactions.fresh = false;
            }
        }
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn needs_categories(&self) -> bool {
        !self.categories.fresh
    }

    pub fn needs_transactions(&self) -> bool {
        !self.transactions.fresh
    }

    fn clear_caches(&mut self) {
        self.categories.reset();
        self.transactions.reset();
    }
}
