//! Page-by-page access over a prepared query.

use crate::{
    error::RepositoryError,
    query::{QueryBuilder, SelectQuery},
    session::EntityStore,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u64 = 10;

/// One page of results plus the totals needed to drive navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<E> {
    pub items: Vec<E>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<E> Page<E> {
    pub const fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page)
    }

    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Wraps a prepared query and a store into a page cursor.
///
/// The wrapped query carries the criteria and sorting already applied;
/// `page` clones it per call, so the paginator itself stays immutable and
/// can serve pages in any order.
pub struct Paginator<'a, E: Send, T: EntityStore<E> + ?Sized> {
    query: SelectQuery,
    store: &'a T,
    per_page: u64,
    _marker: std::marker::PhantomData<E>,
}

impl<'a, E: Send, T: EntityStore<E> + ?Sized> Paginator<'a, E, T> {
    pub fn new(query: SelectQuery, store: &'a T) -> Self {
        Paginator {
            query,
            store,
            per_page: DEFAULT_PER_PAGE,
            _marker: std::marker::PhantomData,
        }
    }

    /// Sets the page size; zero is clamped to one.
    pub fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Fetches page `number` (1-based; zero is treated as page one) together
    /// with the total match count.
    pub async fn page(&self, number: u64) -> Result<Page<E>, RepositoryError> {
        let page = number.max(1);

        let mut query = self.query.clone();
        query.limit(self.per_page);
        query.offset(page.saturating_sub(1).saturating_mul(self.per_page));

        let items = self.store.fetch(&query).await?;
        let total = self.store.count(&self.query).await?;

        Ok(Page {
            items,
            page,
            per_page: self.per_page,
            total,
        })
    }
}
