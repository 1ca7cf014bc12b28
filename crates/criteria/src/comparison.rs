use crate::error::CriteriaError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Comparison operators accepted in a filter specification.
///
/// The set is closed; `Is` renders identically to `Eq` and exists only so
/// callers can write the null test as `IS` if they prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Is,
    In,
    NotIn,
    Contains,
}

impl Comparison {
    /// SQL rendering of the operator.
    pub const fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq | Comparison::Is => "=",
            Comparison::Neq => "<>",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::In => "IN",
            Comparison::NotIn => "NOT IN",
            Comparison::Contains => "CONTAINS",
        }
    }

    /// Recognizes an operator token by its rendered form (`"="`, `"IN"`, ...).
    ///
    /// Matching is exact; `"="` resolves to `Eq`.
    pub fn parse(token: &str) -> Option<Comparison> {
        match token {
            "=" => Some(Comparison::Eq),
            "<>" => Some(Comparison::Neq),
            "<" => Some(Comparison::Lt),
            "<=" => Some(Comparison::Lte),
            ">" => Some(Comparison::Gt),
            ">=" => Some(Comparison::Gte),
            "IN" => Some(Comparison::In),
            "NOT IN" => Some(Comparison::NotIn),
            "CONTAINS" => Some(Comparison::Contains),
            _ => None,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Comparison {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparison::parse(s).ok_or_else(|| CriteriaError::UnknownOperator(s.to_string()))
    }
}

/// Returns true if the token is one of the comparison operators.
pub fn is_comparison(token: &str) -> bool {
    Comparison::parse(token).is_some()
}

// Two-character tokens first so "<=" is not read as "<" followed by "=".
const OPERATOR_PREFIXES: [(&str, Comparison); 6] = [
    ("<=", Comparison::Lte),
    (">=", Comparison::Gte),
    ("<>", Comparison::Neq),
    ("<", Comparison::Lt),
    ("=", Comparison::Eq),
    (">", Comparison::Gt),
];

/// Splits a leading comparison operator off a raw string value.
///
/// Returns the operator and the untrimmed remainder, or `None` when the value
/// carries no operator prefix (the caller keeps the raw value unchanged).
pub fn break_value(raw: &str) -> Option<(Comparison, &str)> {
    OPERATOR_PREFIXES
        .iter()
        .find_map(|(token, op)| raw.strip_prefix(token).map(|rest| (*op, rest)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_comparison() {
        assert!(is_comparison("IN"));
        assert!(is_comparison("NOT IN"));
        assert!(is_comparison("<="));
        assert!(!is_comparison("LIKE"));
        assert!(!is_comparison("in"));
    }

    #[test]
    fn test_parse_equals_resolves_to_eq() {
        assert_eq!(Comparison::parse("="), Some(Comparison::Eq));
        assert_eq!(Comparison::Is.as_sql(), Comparison::Eq.as_sql());
    }

    #[test]
    fn test_from_str_unknown_operator() {
        let err = "LIKE".parse::<Comparison>().unwrap_err();
        assert!(matches!(err, CriteriaError::UnknownOperator(token) if token == "LIKE"));
    }

    #[test]
    fn test_break_value_two_char_before_one_char() {
        assert_eq!(break_value("<=5"), Some((Comparison::Lte, "5")));
        assert_eq!(break_value(">=5"), Some((Comparison::Gte, "5")));
        assert_eq!(break_value("<>x"), Some((Comparison::Neq, "x")));
        assert_eq!(break_value("<5"), Some((Comparison::Lt, "5")));
        assert_eq!(break_value(">5"), Some((Comparison::Gt, "5")));
        assert_eq!(break_value("=5"), Some((Comparison::Eq, "5")));
    }

    #[test]
    fn test_break_value_no_prefix() {
        assert_eq!(break_value("abc"), None);
        assert_eq!(break_value(""), None);
    }

    #[test]
    fn test_break_value_remainder_is_untrimmed() {
        assert_eq!(break_value(">= 5"), Some((Comparison::Gte, " 5")));
    }
}
