//! Generic repository facade over the criteria compiler.
//!
//! Composes the `criteria` core with a query-builder abstraction, an async
//! persistence seam and a paginator to answer the four access patterns:
//! fetch-by-id, fetch-all, fetch-by-criteria and create/save/delete. Query
//! execution, connections and transactions stay behind the session and store
//! traits.

pub mod error;
pub mod pagination;
pub mod query;
pub mod repo;
pub mod session;

pub use error::RepositoryError;
pub use pagination::{Page, Paginator};
pub use query::{QueryBuilder, SelectQuery, apply_criteria, apply_sorting};
pub use repo::{Entity, EntityRepository};
pub use session::{EntityStore, Session};
