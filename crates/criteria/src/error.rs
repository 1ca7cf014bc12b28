use thiserror::Error;

/// Errors raised while compiling criteria into predicates.
#[derive(Debug, Error)]
pub enum CriteriaError {
    /// A token that is not part of the comparison vocabulary.
    #[error("unknown comparison operator: {0}")]
    UnknownOperator(String),

    /// A null operand under an operator that has no null semantics.
    ///
    /// Only `=` and `<>` have a null rendering (`IS NULL` / `IS NOT NULL`);
    /// binding a literal null under `<`, `>=`, `IN`, `LIKE` and friends
    /// produces an always-false comparison, so it is rejected instead.
    #[error("operator {operator} on field {field} cannot take a null operand")]
    NullOperand { field: String, operator: String },
}
