//! A prepared SELECT: accumulated clauses, named parameters and rendering.

use crate::{error::RepositoryError, query::QueryBuilder, query::dialect::Dialect};
use criteria::Value;
use indexmap::IndexMap;

/// A SELECT under construction against a single aliased table.
///
/// Clause text references parameters as `:name`; rendering substitutes the
/// dialect's positional placeholders in first-use order and returns the
/// parameter values alongside the SQL.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    pub table: String,
    pub alias: String,
    pub clauses: Vec<String>,
    pub params: IndexMap<String, Value>,
    pub order: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        SelectQuery {
            table: table.into(),
            alias: alias.into(),
            clauses: Vec::new(),
            params: IndexMap::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Renders the full row query.
    pub fn render(&self, dialect: &dyn Dialect) -> Result<(String, Vec<Value>), RepositoryError> {
        let mut sql = format!(
            "SELECT {alias}.* FROM {table} {alias}",
            alias = self.alias,
            table = dialect.quote_identifier(&self.table),
        );
        let mut params = Vec::new();

        self.render_where(&mut sql, &mut params, dialect)?;

        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order.join(", "));
        }
        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        if let Some(n) = self.offset {
            sql.push_str(&format!(" OFFSET {n}"));
        }

        Ok((sql, params))
    }

    /// Renders the matching `COUNT(*)` query: same predicates, no ordering
    /// or paging.
    pub fn render_count(
        &self,
        dialect: &dyn Dialect,
    ) -> Result<(String, Vec<Value>), RepositoryError> {
        let mut sql = format!(
            "SELECT COUNT(*) FROM {table} {alias}",
            alias = self.alias,
            table = dialect.quote_identifier(&self.table),
        );
        let mut params = Vec::new();

        self.render_where(&mut sql, &mut params, dialect)?;

        Ok((sql, params))
    }

    fn render_where(
        &self,
        sql: &mut String,
        params: &mut Vec<Value>,
        dialect: &dyn Dialect,
    ) -> Result<(), RepositoryError> {
        if self.clauses.is_empty() {
            return Ok(());
        }

        let mut rendered = Vec::with_capacity(self.clauses.len());
        for clause in &self.clauses {
            rendered.push(substitute(clause, &self.params, dialect, params)?);
        }
        sql.push_str(" WHERE ");
        sql.push_str(&rendered.join(" AND "));
        Ok(())
    }
}

impl QueryBuilder for SelectQuery {
    fn and_where(&mut self, clause: String) {
        self.clauses.push(clause);
    }

    fn bind(&mut self, name: String, value: Value) {
        self.params.insert(name, value);
    }

    fn order_by(&mut self, term: String) {
        self.order.push(term);
    }

    fn limit(&mut self, n: u64) {
        self.limit = Some(n);
    }

    fn offset(&mut self, n: u64) {
        self.offset = Some(n);
    }
}

/// Replaces each `:name` token with dialect placeholders, pushing the bound
/// values onto `out` in placeholder order. A `List` binding expands into one
/// placeholder per element; an empty list renders the SQL literal `NULL` so
/// `IN ()` never appears.
fn substitute(
    text: &str,
    bindings: &IndexMap<String, Value>,
    dialect: &dyn Dialect,
    out: &mut Vec<Value>,
) -> Result<String, RepositoryError> {
    let mut sql = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != ':' || !chars.peek().is_some_and(|&(_, n)| is_name_char(n)) {
            sql.push(c);
            continue;
        }

        let start = i + 1;
        let mut end = start;
        while let Some(&(j, n)) = chars.peek() {
            if !is_name_char(n) {
                break;
            }
            end = j + n.len_utf8();
            chars.next();
        }

        let name = &text[start..end];
        let value = bindings
            .get(name)
            .ok_or_else(|| RepositoryError::UnboundParameter(name.to_string()))?;

        match value {
            Value::List(items) if items.is_empty() => sql.push_str("NULL"),
            Value::List(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        sql.push_str(", ");
                    }
                    out.push(item.clone());
                    sql.push_str(&dialect.placeholder(out.len() - 1));
                }
            }
            scalar => {
                out.push(scalar.clone());
                sql.push_str(&dialect.placeholder(out.len() - 1));
            }
        }
    }

    Ok(sql)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::dialect::{MySql, Postgres};

    fn sample_query() -> SelectQuery {
        let mut query = SelectQuery::new("users", "o");
        query.and_where("o.status = :status".to_string());
        query.bind("status".to_string(), Value::String("open".into()));
        query
    }

    #[test]
    fn test_render_without_clauses() {
        let query = SelectQuery::new("users", "o");
        let (sql, params) = query.render(&Postgres).unwrap();

        assert_eq!(sql, r#"SELECT o.* FROM "users" o"#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_render_postgres_placeholders_in_first_use_order() {
        let mut query = sample_query();
        query.and_where("o.age >= :age".to_string());
        query.bind("age".to_string(), Value::Int(18));

        let (sql, params) = query.render(&Postgres).unwrap();
        assert_eq!(
            sql,
            r#"SELECT o.* FROM "users" o WHERE o.status = $1 AND o.age >= $2"#
        );
        assert_eq!(params, vec![Value::String("open".into()), Value::Int(18)]);
    }

    #[test]
    fn test_render_mysql_placeholders() {
        let (sql, _) = sample_query().render(&MySql).unwrap();
        assert_eq!(sql, "SELECT o.* FROM `users` o WHERE o.status = ?");
    }

    #[test]
    fn test_render_expands_list_binding() {
        let mut query = SelectQuery::new("users", "o");
        query.and_where("o.role IN (:role)".to_string());
        query.bind(
            "role".to_string(),
            Value::List(vec![
                Value::String("admin".into()),
                Value::String("editor".into()),
            ]),
        );

        let (sql, params) = query.render(&Postgres).unwrap();
        assert_eq!(sql, r#"SELECT o.* FROM "users" o WHERE o.role IN ($1, $2)"#);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_render_empty_list_binding_renders_null() {
        let mut query = SelectQuery::new("users", "o");
        query.and_where("o.role IN (:role)".to_string());
        query.bind("role".to_string(), Value::List(Vec::new()));

        let (sql, params) = query.render(&Postgres).unwrap();
        assert_eq!(sql, r#"SELECT o.* FROM "users" o WHERE o.role IN (NULL)"#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_render_order_limit_offset() {
        let mut query = sample_query();
        query.order_by("o.name ASC".to_string());
        query.order_by("o.age DESC".to_string());
        query.limit(10);
        query.offset(20);

        let (sql, _) = query.render(&Postgres).unwrap();
        assert_eq!(
            sql,
            r#"SELECT o.* FROM "users" o WHERE o.status = $1 ORDER BY o.name ASC, o.age DESC LIMIT 10 OFFSET 20"#
        );
    }

    #[test]
    fn test_render_count_drops_ordering_and_paging() {
        let mut query = sample_query();
        query.order_by("o.name ASC".to_string());
        query.limit(10);
        query.offset(20);

        let (sql, params) = query.render_count(&Postgres).unwrap();
        assert_eq!(sql, r#"SELECT COUNT(*) FROM "users" o WHERE o.status = $1"#);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_render_unbound_parameter_errors() {
        let mut query = SelectQuery::new("users", "o");
        query.and_where("o.status = :status".to_string());

        let err = query.render(&Postgres).unwrap_err();
        assert!(matches!(err, RepositoryError::UnboundParameter(name) if name == "status"));
    }

    #[test]
    fn test_is_null_clause_needs_no_binding() {
        let mut query = SelectQuery::new("users", "o");
        query.and_where("o.deleted_at IS NULL".to_string());

        let (sql, params) = query.render(&Postgres).unwrap();
        assert_eq!(sql, r#"SELECT o.* FROM "users" o WHERE o.deleted_at IS NULL"#);
        assert!(params.is_empty());
    }
}
