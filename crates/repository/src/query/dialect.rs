//! Database-specific syntax for rendering prepared queries.

/// Syntax details that differ between database engines.
pub trait Dialect: Send + Sync {
    /// Placeholder for the parameter at `index` (zero-based).
    ///
    /// - PostgreSQL counts: `$1`, `$2`, ...
    /// - MySQL repeats: `?`
    fn placeholder(&self, index: usize) -> String;

    /// Wraps a table or column name in the dialect's quoting characters.
    fn quote_identifier(&self, ident: &str) -> String;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn placeholder(&self, index: usize) -> String {
        format!("${}", index + 1)
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{ident}""#)
    }

    fn name(&self) -> &'static str {
        "PostgreSQL"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{ident}`")
    }

    fn name(&self) -> &'static str {
        "MySQL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(Postgres.placeholder(0), "$1");
        assert_eq!(Postgres.placeholder(2), "$3");
        assert_eq!(MySql.placeholder(7), "?");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(Postgres.quote_identifier("users"), r#""users""#);
        assert_eq!(MySql.quote_identifier("users"), "`users`");
    }
}
