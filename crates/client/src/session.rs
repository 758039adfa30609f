//! Signed-in dashboard session.
//!
//! Wraps a [`DashboardStore`] and a [`BackendClient`] so that every backend
//! call updates the cached state through a [`StoreAction`].

use std::sync::RwLock;

use log::{debug, warn};

use fintrack_core::auth::{AuthSession, Credentials, Registration};
use fintrack_core::budget::{compute_category_budgets, BudgetOverview};
use fintrack_core::cashflow::{aggregate_daily_cash_flow, summarize_month, DailyCashFlow, MonthlySummary};
use fintrack_core::categories::{Category, CategoryUpdate, NewCategory};
use fintrack_core::errors::{Error, Result};
use fintrack_core::goals::SavingsGoal;
use fintrack_core::months::MonthFilter;
use fintrack_core::pagination::{collect_month_transactions, PaginationConfig};
use fintrack_core::recurrence::{scope_query, RecurrenceAction, RecurrenceScope};
use fintrack_core::store::{DashboardStore, StoreAction};
use fintrack_core::transactions::{NewTransaction, Transaction, TransactionUpdate};

use crate::client::{build_http_client, BackendClient, DEFAULT_TIMEOUT_SECS};

pub struct DashboardSession {
    http: reqwest::Client,
    base_url: String,
    pagination: PaginationConfig,
    store: RwLock<DashboardStore>,
}

impl DashboardSession {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = build_http_client(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
        Ok(Self::with_config(http, base_url, PaginationConfig::default()))
    }

    pub fn with_config(http: reqwest::Client, base_url: &str, pagination: PaginationConfig) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            pagination,
            store: RwLock::new(DashboardStore::default()),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<DashboardStore> {
        self.read(|store| store.clone())
    }

    pub fn filter(&self) -> Result<MonthFilter> {
        self.read(|store| store.filter)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        self.read(DashboardStore::is_authenticated)
    }

    pub fn set_filter(&self, filter: MonthFilter) -> Result<()> {
        self.dispatch(StoreAction::FilterChanged(filter))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession> {
        let client = BackendClient::with_http_client(self.http.clone(), &self.base_url, None)?;
        let session = client.login(credentials).await?;
        self.dispatch(StoreAction::SignedIn(session.clone()))?;
        Ok(session)
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthSession> {
        let client = BackendClient::with_http_client(self.http.clone(), &self.base_url, None)?;
        let session = client.register(registration).await?;
        self.dispatch(StoreAction::SignedIn(session.clone()))?;
        Ok(session)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.dispatch(StoreAction::SignedOut)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Categories
    // ─────────────────────────────────────────────────────────────────────────

    /// Categories of the signed-in user, fetched once and then served from
    /// the store until a mutation invalidates them.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        if !self.read(DashboardStore::needs_categories)? {
            return self.read(|store| store.categories.value.clone());
        }
        let client = self.client()?;
        let categories = self.track(client.list_categories().await)?;
        self.dispatch(StoreAction::CategoriesLoaded(categories.clone()))?;
        Ok(categories)
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let client = self.client()?;
        let created = self.track(client.create_category(category).await)?;
        self.dispatch(StoreAction::CategoryUpserted(created.clone()))?;
        Ok(created)
    }

    pub async fn update_category(&self, id: &str, update: &CategoryUpdate) -> Result<Category> {
        let client = self.client()?;
        let updated = self.track(client.update_category(id, update).await)?;
        self.dispatch(StoreAction::CategoryUpserted(updated.clone()))?;
        Ok(updated)
    }

    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let client = self.client()?;
        self.track(client.delete_category(id).await)?;
        self.dispatch(StoreAction::CategoryDeleted(id.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Every transaction of the selected month across all feeds.
    pub async fn month_transactions(&self) -> Result<Vec<Transaction>> {
        let (_, transactions) = self.load_month().await?;
        Ok(transactions)
    }

    /// The month's transactions together with the month they were loaded
    /// for, which may differ from the filter by the time the fetch returns.
    async fn load_month(&self) -> Result<(MonthFilter, Vec<Transaction>)> {
        let (filter, cached) = self.read(|store| {
            let cached = (!store.needs_transactions()).then(|| store.transactions.value.clone());
            (store.filter, cached)
        })?;
        if let Some(transactions) = cached {
            return Ok((filter, transactions));
        }
        let client = self.client()?;
        let transactions = self.track(
            collect_month_transactions(&client, &filter, &self.pagination).await,
        )?;
        self.dispatch(StoreAction::TransactionsLoaded(filter, transactions.clone()))?;
        Ok((filter, transactions))
    }

    pub async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let client = self.client()?;
        let created = self.track(client.create_transaction(transaction).await)?;
        if created.is_recurring() {
            // The backend materializes further occurrences of the series.
            self.dispatch(StoreAction::TransactionsInvalidated)?;
        } else {
            self.dispatch(StoreAction::TransactionUpserted(created.clone()))?;
        }
        Ok(created)
    }

    /// Patches `transaction`, reaching the rest of its series per `requested`.
    pub async fn update_transaction(
        &self,
        transaction: &Transaction,
        update: &TransactionUpdate,
        requested: Option<RecurrenceScope>,
    ) -> Result<Transaction> {
        let scope = scope_query(transaction, requested, RecurrenceAction::Edit);
        let client = self.client()?;
        let updated = self.track(
            client
                .update_transaction(&transaction.id, update, scope)
                .await,
        )?;
        match scope {
            Some(RecurrenceScope::CurrentAndFuture) | Some(RecurrenceScope::All) => {
                self.dispatch(StoreAction::TransactionsInvalidated)?
            }
            _ => self.dispatch(StoreAction::TransactionUpserted(updated.clone()))?,
        }
        Ok(updated)
    }

    pub async fn delete_transaction(
        &self,
        transaction: &Transaction,
        requested: Option<RecurrenceScope>,
    ) -> Result<()> {
        let scope = scope_query(transaction, requested, RecurrenceAction::Delete);
        let client = self.client()?;
        self.track(client.delete_transaction(&transaction.id, scope).await)?;
        self.dispatch(StoreAction::TransactionDeleted {
            id: transaction.id.clone(),
            scope: scope.unwrap_or_default(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived views
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn budget_overview(&self) -> Result<BudgetOverview> {
        let categories = self.categories().await?;
        let (filter, transactions) = self.load_month().await?;
        Ok(compute_category_budgets(&categories, &transactions, &filter))
    }

    pub async fn cash_flow(&self) -> Result<DailyCashFlow> {
        let (filter, transactions) = self.load_month().await?;
        Ok(aggregate_daily_cash_flow(&transactions, &filter))
    }

    /// Totals of the selected month, opened with the previous month's
    /// closing balance.
    pub async fn monthly_summary(&self) -> Result<MonthlySummary> {
        let (filter, transactions) = self.load_month().await?;
        let client = self.client()?;
        let opening = match client.previous_month_balance(&filter).await {
            Ok(balance) => Some(balance.closing_balance),
            Err(Error::Unauthorized) => return self.track(Err(Error::Unauthorized)),
            Err(e) => {
                warn!("Previous month balance unavailable for {}: {}", filter, e);
                None
            }
        };
        Ok(summarize_month(&transactions, &filter, opening))
    }

    pub async fn savings_goals(&self) -> Result<Vec<SavingsGoal>> {
        let client = self.client()?;
        self.track(client.list_savings_goals().await)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn client(&self) -> Result<BackendClient> {
        let token = self.read(|store| store.session().map(|s| s.access_token.clone()))?;
        let token = token.ok_or(Error::Unauthorized)?;
        BackendClient::with_http_client(self.http.clone(), &self.base_url, Some(&token))
    }

    /// Expires the session when the backend rejected the token.
    fn track<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(Error::Unauthorized) = &result {
            debug!("Backend rejected the session token, signing out");
            self.dispatch(StoreAction::SessionExpired)?;
        }
        result
    }

    fn dispatch(&self, action: StoreAction) -> Result<()> {
        let mut store = self
            .store
            .write()
            .map_err(|_| Error::Unexpected("Dashboard store lock poisoned".to_string()))?;
        store.apply(action);
        Ok(())
    }

    fn read<R>(&self, f: impl FnOnce(&DashboardStore) -> R) -> Result<R> {
        let store = self
            .store
            .read()
            .map_err(|_| Error::Unexpected("Dashboard store lock poisoned".to_string()))?;
        Ok(f(&store))
    }
}
