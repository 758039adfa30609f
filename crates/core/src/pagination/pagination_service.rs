use async_trait::async_trait;
use futures::future::try_join_all;
use log::{debug, info};

use crate::errors::{Error, Result};
use crate::months::MonthFilter;
use crate::pagination::pagination_model::{Page, PaginationConfig, TransactionFeed};
use crate::transactions::Transaction;

/// Source of pages for a single listing.
#[async_trait]
pub trait PageFetcher<T: Send>: Send + Sync {
    /// Fetches page `page` (1-based) of at most `page_size` items.
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page<T>>;
}

/// Backend access needed to assemble a month of transactions.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch_feed_page(
        &self,
        feed: TransactionFeed,
        filter: &MonthFilter,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Transaction>>;
}

/// Fetches every page of a listing, one request at a time.
///
/// Starts at page 1 and stops after the first page whose `hasNextPage` is
/// false. Fails when more than `max_pages` would be needed or when the
/// backend reports more pages after returning an empty one.
pub async fn fetch_all_pages<T, F>(fetcher: &F, config: &PaginationConfig) -> Result<Vec<T>>
where
    T: Send,
    F: PageFetcher<T> + ?Sized,
{
    let mut items = Vec::new();
    let mut page_number: u32 = 1;

    loop {
        if page_number > config.max_pages {
            return Err(Error::Pagination(format!(
                "Pagination exceeded max pages ({}). Aborting.",
                config.max_pages
            )));
        }

        let page = fetcher.fetch_page(page_number, config.page_size).await?;
        let received = page.data.len();
        debug!(
            "Fetched page {} ({} items, has next: {})",
            page_number, received, page.has_next_page
        );

        if received == 0 && page.has_next_page {
            return Err(Error::Pagination(format!(
                "Page {} was empty but more pages were reported",
                page_number
            )));
        }

        items.extend(page.data);
        if !page.has_next_page {
            break;
        }
        page_number += 1;
    }

    Ok(items)
}

/// Pages of one feed for one month.
struct FeedPages<'a, S: ?Sized> {
    source: &'a S,
    feed: TransactionFeed,
    filter: MonthFilter,
}

#[async_trait]
impl<'a, S> PageFetcher<Transaction> for FeedPages<'a, S>
where
    S: TransactionSource + ?Sized,
{
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page<Transaction>> {
        self.source
            .fetch_feed_page(self.feed, &self.filter, page, page_size)
            .await
    }
}

/// Collects every transaction of a month across all feeds.
///
/// Feeds are fetched concurrently; pages within a feed are fetched
/// sequentially. The merged list keeps feed order. The first failing feed
/// fails the whole collection.
pub async fn collect_month_transactions<S>(
    source: &S,
    filter: &MonthFilter,
    config: &PaginationConfig,
) -> Result<Vec<Transaction>>
where
    S: TransactionSource + ?Sized,
{
    let fetches = TransactionFeed::ALL.into_iter().map(|feed| async move {
        let pages = FeedPages {
            source,
            feed,
            filter: *filter,
        };
        fetch_all_pages(&pages, config).await
    });

    let per_feed = try_join_all(fetches).await?;
    let transactions: Vec<Transaction> = per_feed.into_iter().flatten().collect();
    info!(
        "Collected {} transactions for {}",
        transactions.len(),
        filter
    );
    Ok(transactions)
}
