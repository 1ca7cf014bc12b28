//! Query-builder abstraction and the concrete SELECT renderer.

use criteria::{Criteria, CriteriaError, Sorting, Value, compile};

pub mod dialect;
pub mod select;

pub use dialect::{Dialect, MySql, Postgres};
pub use select::SelectQuery;

/// The narrow surface compiled criteria merge into.
///
/// Anything that can take a WHERE clause, a named binding, an ORDER BY term
/// and paging bounds qualifies; the facade only ever talks to this trait.
pub trait QueryBuilder {
    fn and_where(&mut self, clause: String);
    fn bind(&mut self, name: String, value: Value);
    fn order_by(&mut self, term: String);
    fn limit(&mut self, n: u64);
    fn offset(&mut self, n: u64);
}

/// Compiles `criteria` against `alias` and merges the result into `builder`.
pub fn apply_criteria<Q: QueryBuilder>(
    builder: &mut Q,
    criteria: &Criteria,
    alias: &str,
) -> Result<(), CriteriaError> {
    let compiled = compile(criteria, alias)?;

    for predicate in compiled.predicates {
        builder.and_where(predicate.clause);
    }
    for (name, value) in compiled.params {
        builder.bind(name, value);
    }

    Ok(())
}

/// Appends the ordering terms to `builder`, in insertion order.
pub fn apply_sorting<Q: QueryBuilder>(builder: &mut Q, sorting: &Sorting, alias: &str) {
    for term in sorting.compile(alias) {
        builder.order_by(term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use criteria::{Comparison, FilterSpec, SortOrder};

    #[test]
    fn test_apply_criteria_merges_clauses_and_bindings() {
        let mut query = SelectQuery::new("users", "o");
        let criteria = Criteria::new()
            .filter("status", FilterSpec::compare(Comparison::Eq, Value::Null))
            .filter("age", FilterSpec::compare(Comparison::Gte, 18));

        apply_criteria(&mut query, &criteria, "o").unwrap();

        assert_eq!(query.clauses, vec!["o.status IS NULL", "o.age >= :age"]);
        assert_eq!(query.params.get("age"), Some(&Value::Int(18)));
        assert!(!query.params.contains_key("status"));
    }

    #[test]
    fn test_apply_sorting_appends_terms_in_order() {
        let mut query = SelectQuery::new("users", "o");
        let sorting = Sorting::new()
            .order_by("name", SortOrder::Asc)
            .order_by("age", SortOrder::Desc);

        apply_sorting(&mut query, &sorting, "o");

        assert_eq!(query.order, vec!["o.name ASC", "o.age DESC"]);
    }
}
