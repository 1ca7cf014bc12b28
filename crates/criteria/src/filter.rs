use crate::{
    comparison::{Comparison, break_value},
    value::Value,
};
use serde::{Deserialize, Serialize};

/// The filter applied to one field of a criteria mapping.
///
/// The variants make the four accepted shapes explicit instead of sniffing
/// them out of a dynamic value at compile time:
/// - `Equals` — a plain scalar, rendered as `=`.
/// - `IsNull` — the null test.
/// - `InList` — a bare sequence, rendered as `IN (...)`.
/// - `Compare` — an explicit operator/operand pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FilterSpec {
    Equals(Value),
    IsNull,
    InList(Vec<Value>),
    Compare(Comparison, Value),
}

impl FilterSpec {
    pub fn eq(value: impl Into<Value>) -> Self {
        FilterSpec::Equals(value.into())
    }

    pub const fn is_null() -> Self {
        FilterSpec::IsNull
    }

    pub fn in_list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        FilterSpec::InList(values.into_iter().map(Into::into).collect())
    }

    pub fn compare(operator: Comparison, operand: impl Into<Value>) -> Self {
        FilterSpec::Compare(operator, operand.into())
    }

    /// Builds a spec from a raw string that may carry an operator prefix.
    ///
    /// `">=5"` becomes `Compare(Gte, "5")`; a string with no recognized
    /// prefix passes through unchanged as an equality filter.
    pub fn from_raw(raw: &str) -> Self {
        match break_value(raw) {
            Some((operator, rest)) => FilterSpec::Compare(operator, Value::String(rest.into())),
            None => FilterSpec::Equals(Value::String(raw.into())),
        }
    }

    /// Converts a loose JSON filter value, reproducing the dynamic dispatch
    /// untyped callers rely on.
    ///
    /// A one-entry object whose sole key is a recognized operator becomes an
    /// explicit comparison. Every other object, and every array, falls back
    /// to the IN-list interpretation rather than erroring; this permissive
    /// fallback is deliberate and callers depend on it.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => FilterSpec::IsNull,
            serde_json::Value::Array(items) => {
                FilterSpec::InList(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                if map.len() == 1
                    && let Some((key, operand)) = map.iter().next()
                    && let Some(operator) = Comparison::parse(key)
                {
                    return FilterSpec::Compare(operator, Value::from_json(operand));
                }
                // Not a single-entry operator map: the whole object is an
                // IN-list over its values.
                FilterSpec::InList(map.values().map(Value::from_json).collect())
            }
            scalar => FilterSpec::Equals(Value::from_json(scalar)),
        }
    }
}

impl From<serde_json::Value> for FilterSpec {
    fn from(json: serde_json::Value) -> Self {
        FilterSpec::from_json(&json)
    }
}
