//! Tests for exhaustive pagination and the month fan-out.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::errors::{Error, Result};
    use crate::months::MonthFilter;
    use crate::pagination::{
        collect_month_transactions, fetch_all_pages, Page, PageFetcher, PaginationConfig,
        TransactionFeed, TransactionSource,
    };
    use crate::transactions::{Transaction, TransactionType};

    /// Serves pre-sized pages and records every request.
    struct FakeFetcher {
        page_sizes: Vec<usize>,
        calls: Mutex<Vec<u32>>,
    }

    impl FakeFetcher {
        fn new(page_sizes: Vec<usize>) -> Self {
            Self {
                page_sizes,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageFetcher<u32> for FakeFetcher {
        async fn fetch_page(&self, page: u32, _page_size: u32) -> Result<Page<u32>> {
            self.calls.lock().unwrap().push(page);
            let index = (page - 1) as usize;
            let size = self.page_sizes.get(index).copied().unwrap_or(0);
            let data = (0..size as u32).map(|i| page * 1000 + i).collect();
            Ok(Page::new(data, page, index + 1 < self.page_sizes.len()))
        }
    }

    // ==================== fetch_all_pages Tests ====================

    #[tokio::test]
    async fn test_collects_every_page_sequentially() {
        let fetcher = FakeFetcher::new(vec![100, 100, 37]);
        let items = fetch_all_pages(&fetcher, &PaginationConfig::default())
            .await
            .unwrap();
        assert_eq!(items.len(), 237);
        assert_eq!(*fetcher.calls.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(items[0], 1000);
        assert_eq!(items[236], 3036);
    }

    #[tokio::test]
    async fn test_single_empty_page() {
        let fetcher = FakeFetcher::new(vec![0]);
        let items = fetch_all_pages(&fetcher, &PaginationConfig::default())
            .await
            .unwrap();
        assert!(items.is_empty());
        assert_eq!(fetcher.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_max_pages_is_enforced() {
        let fetcher = FakeFetcher::new(vec![1, 1, 1, 1]);
        let config = PaginationConfig {
            page_size: 1,
            max_pages: 2,
        };
        let err = fetch_all_pages(&fetcher, &config).await.unwrap_err();
        assert!(matches!(err, Error::Pagination(_)));
        assert_eq!(*fetcher.calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_page_claiming_more_is_an_error() {
        let fetcher = FakeFetcher::new(vec![0, 5]);
        let err = fetch_all_pages(&fetcher, &PaginationConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Pagination(_)));
    }

    // ==================== collect_month_transactions Tests ====================

    /// Two pages per feed, one transaction per page.
    struct FakeSource {
        failing: Option<TransactionFeed>,
        calls: Mutex<HashMap<TransactionFeed, Vec<u32>>>,
    }

    impl FakeSource {
        fn new(failing: Option<TransactionFeed>) -> Self {
            Self {
                failing,
                calls: Mutex::new(HashMap::new()),
            }
        }
    }

    fn feed_type(feed: TransactionFeed) -> TransactionType {
        match feed {
            TransactionFeed::Bills => TransactionType::Bill,
            TransactionFeed::Subscriptions => TransactionType::Subscription,
            TransactionFeed::Incomes => TransactionType::Income,
            TransactionFeed::Savings => TransactionType::Savings,
            TransactionFeed::Expenses => TransactionType::Expense,
        }
    }

    #[async_trait]
    impl TransactionSource for FakeSource {
        async fn fetch_feed_page(
            &self,
            feed: TransactionFeed,
            filter: &MonthFilter,
            page: u32,
            _page_size: u32,
        ) -> Result<Page<Transaction>> {
            self.calls
                .lock()
                .unwrap()
                .entry(feed)
                .or_default()
                .push(page);
            if self.failing == Some(feed) {
                return Err(Error::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            let tx = Transaction {
                id: format!("{}-{}", feed.path(), page),
                user_id: "user-1".to_string(),
                label: "tx".to_string(),
                date: NaiveDate::from_ymd_opt(filter.year, filter.month, page).unwrap(),
                value: 10.0,
                transaction_type: feed_type(feed),
                category_id: None,
                goal_id: None,
                recurrence: None,
                is_paid: None,
                parent_transaction_id: None,
                occurrence_number: None,
            };
            Ok(Page::new(vec![tx], page, page < 2))
        }
    }

    #[tokio::test]
    async fn test_fan_out_merges_all_feeds() {
        let source = FakeSource::new(None);
        let filter = MonthFilter::new(2024, 6).unwrap();
        let txs = collect_month_transactions(&source, &filter, &PaginationConfig::default())
            .await
            .unwrap();

        assert_eq!(txs.len(), 10);
        assert_eq!(txs[0].transaction_type, TransactionType::Bill);
        assert_eq!(txs[9].transaction_type, TransactionType::Expense);

        let calls = source.calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        for feed in TransactionFeed::ALL {
            assert_eq!(calls[&feed], vec![1, 2]);
        }
    }

    #[tokio::test]
    async fn test_fan_out_fails_when_one_feed_fails() {
        let source = FakeSource::new(Some(TransactionFeed::Savings));
        let filter = MonthFilter::new(2024, 6).unwrap();
        let err = collect_month_transactions(&source, &filter, &PaginationConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_page_wire_aliases() {
        let page: Page<u32> = serde_json::from_value(serde_json::json!({
            "items": [1, 2],
            "page": 3,
            "hasMore": true
        }))
        .unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert!(page.has_next_page);

        let page: Page<u32> = serde_json::from_value(serde_json::json!({
            "data": [],
            "hasNextPage": false,
            "total": 0
        }))
        .unwrap();
        assert_eq!(page.page, 0);
        assert_eq!(page.total, Some(0));
    }

    #[test]
    fn test_transaction_page_decodes_from_backend_shape() {
        let page: Page<Transaction> = serde_json::from_value(serde_json::json!({
            "transactions": [{
                "id": "tx-1",
                "userId": "user-1",
                "label": "Rent",
                "date": "2024-06-01",
                "value": 800.0,
                "type": "BILL"
            }],
            "page": 1,
            "hasMore": true
        }))
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].transaction_type, TransactionType::Bill);
        assert_eq!(
            page.data[0].date,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(page.has_next_page);
    }
}
