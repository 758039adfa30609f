//! Tests for the dashboard store action mapping.

#[cfg(test)]
mod tests {
    use crate::auth::{AuthSession, User};
    use crate::categories::Category;
    use crate::months::MonthFilter;
    use crate::recurrence::RecurrenceScope;
    use crate::store::{DashboardStore, StoreAction};
    use crate::transactions::{Transaction, TransactionType};
    use chrono::NaiveDate;

    fn march() -> MonthFilter {
        MonthFilter::new(2024, 3).unwrap()
    }

    fn session() -> AuthSession {
        AuthSession {
            user: User {
                id: "user-1".to_string(),
                email: "jo@example.com".to_string(),
                name: None,
            },
            access_token: "token".to_string(),
        }
    }

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            label: id.to_string(),
            icon: None,
            color: None,
            budget: Some(100.0),
        }
    }

    fn tx(id: &str, month: u32, category: Option<&str>) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            label: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, month, 10).unwrap(),
            value: 12.0,
            transaction_type: TransactionType::Expense,
            category_id: category.map(str::to_string),
            goal_id: None,
            recurrence: None,
            is_paid: None,
            parent_transaction_id: None,
            occurrence_number: None,
        }
    }

    fn loaded_store() -> DashboardStore {
        let mut store = DashboardStore::new(march());
        store.apply(StoreAction::SignedIn(session()));
        store.apply(StoreAction::CategoriesLoaded(vec![
            category("food"),
            category("home"),
        ]));
        store.apply(StoreAction::TransactionsLoaded(
            march(),
            vec![tx("a", 3, Some("food")), tx("b", 3, Some("home"))],
        ));
        store
    }

    #[test]
    fn test_sign_in_and_load() {
        let store = loaded_store();
        assert!(store.is_authenticated());
        assert!(!store.needs_categories());
        assert!(!store.needs_transactions());
        assert_eq!(store.transactions.value.len(), 2);
    }

    #[test]
    fn test_session_expiry_clears_everything() {
        let mut store = loaded_store();
        store.apply(StoreAction::SessionExpired);
        assert!(!store.is_authenticated());
        assert!(store.categories.value.is_empty());
        assert!(store.needs_transactions());
    }

    #[test]
    fn test_sign_out_resets_both_caches() {
        let mut store = loaded_store();
        store.apply(StoreAction::SignedOut);
        assert!(store.session().is_none());
        assert!(store.needs_categories());
        assert!(store.needs_transactions());
        assert!(store.transactions.value.is_empty());
        assert_eq!(store.filter, march());
    }

    #[test]
    fn test_filter_change_invalidates_transactions_only_when_month_differs() {
        let mut store = loaded_store();
        store.apply(StoreAction::FilterChanged(march()));
        assert!(!store.needs_transactions());

        store.apply(StoreAction::FilterChanged(march().next()));
        assert!(store.needs_transactions());
        assert!(store.transactions.value.is_empty());
        assert!(!store.needs_categories());
    }

    #[test]
    fn test_stale_month_load_is_dropped() {
        let mut store = DashboardStore::new(march());
        store.apply(StoreAction::TransactionsLoaded(
            march().previous(),
            vec![tx("old", 2, None)],
        ));
        assert!(store.transactions.value.is_empty());
        assert!(store.needs_transactions());
    }

    #[test]
    fn test_category_upsert_and_delete() {
        let mut store = loaded_store();
        let mut renamed = category("food");
        renamed.label = "Groceries".to_string();
        store.apply(StoreAction::CategoryUpserted(renamed));
        store.apply(StoreAction::CategoryUpserted(category("fun")));
        assert_eq!(store.categories.value.len(), 3);
        assert_eq!(store.categories.value[0].label, "Groceries");

        store.apply(StoreAction::CategoryDeleted("food".to_string()));
        assert_eq!(store.categories.value.len(), 2);
        assert!(store.transactions.value[0].category_id.is_none());
        assert_eq!(store.transactions.value[1].category_id.as_deref(), Some("home"));
    }

    #[test]
    fn test_transaction_upsert_in_and_out_of_month() {
        let mut store = loaded_store();
        let mut edited = tx("a", 3, Some("food"));
        edited.value = 99.0;
        store.apply(StoreAction::TransactionUpserted(edited));
        assert_eq!(store.transactions.value[0].value, 99.0);
        assert!(!store.needs_transactions());

        store.apply(StoreAction::TransactionUpserted(tx("a", 4, Some("food"))));
        assert_eq!(store.transactions.value.len(), 1);
        assert!(store.needs_transactions());
    }

    #[test]
    fn test_transaction_delete_scopes() {
        let mut store = loaded_store();
        store.apply(StoreAction::TransactionDeleted {
            id: "a".to_string(),
            scope: RecurrenceScope::CurrentOnly,
        });
        assert_eq!(store.transactions.value.len(), 1);
        assert!(!store.needs_transactions());

        store.apply(StoreAction::TransactionDeleted {
            id: "b".to_string(),
            scope: RecurrenceScope::All,
        });
        assert!(store.transactions.value.is_empty());
        assert!(store.needs_transactions());
    }
}
