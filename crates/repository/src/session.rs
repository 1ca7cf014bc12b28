//! Async seams to the backing persistence layer.

use crate::{error::RepositoryError, query::SelectQuery};
use async_trait::async_trait;
use criteria::Value;

/// Executes prepared queries and materializes entities.
///
/// Implementations own the connection, the dialect and the row mapping; the
/// facade only hands them a prepared [`SelectQuery`].
#[async_trait]
pub trait EntityStore<E: Send>: Send + Sync {
    async fn fetch(&self, query: &SelectQuery) -> Result<Vec<E>, RepositoryError>;

    async fn fetch_one(&self, query: &SelectQuery) -> Result<Option<E>, RepositoryError>;

    async fn count(&self, query: &SelectQuery) -> Result<u64, RepositoryError>;
}

/// Unit-of-work surface: identity lookup plus the persistence lifecycle.
///
/// `persist` and `remove` only register intent; `flush` writes the pending
/// changes out. That split mirrors the underlying object manager and keeps
/// batched saves cheap.
#[async_trait]
pub trait Session<E: Send>: Send + Sync {
    async fn persist(&self, entity: &E) -> Result<(), RepositoryError>;

    async fn remove(&self, entity: &E) -> Result<(), RepositoryError>;

    async fn flush(&self) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Value) -> Result<Option<E>, RepositoryError>;
}
