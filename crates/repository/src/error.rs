use criteria::CriteriaError;
use thiserror::Error;

/// All errors surfaced by the repository facade.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Criteria that could not be compiled into predicates.
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    /// A `:name` placeholder with no entry in the parameter table.
    #[error("unbound query parameter: {0}")]
    UnboundParameter(String),

    /// The backing store failed to execute a query.
    #[error("store error: {0}")]
    Store(String),

    /// The persistence session failed (persist, remove or flush).
    #[error("session error: {0}")]
    Session(String),
}
