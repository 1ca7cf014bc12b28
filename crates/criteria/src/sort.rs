use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for one ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

impl SortOrder {
    /// Case-insensitive recognition of `"ASC"` / `"DESC"`.
    pub fn parse(token: &str) -> Option<SortOrder> {
        if token.eq_ignore_ascii_case("ASC") {
            Some(SortOrder::Asc)
        } else if token.eq_ignore_ascii_case("DESC") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }
}

/// An ordered field → direction mapping; iteration order is the order the
/// terms were added and is the order they render in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorting {
    fields: IndexMap<String, SortOrder>,
}

impl Sorting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.fields.insert(field.into(), order);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SortOrder)> {
        self.fields.iter().map(|(field, order)| (field.as_str(), *order))
    }

    /// Renders the ordering terms, one `alias.field DIRECTION` per entry.
    pub fn compile(&self, alias: &str) -> Vec<String> {
        self.fields
            .iter()
            .map(|(field, order)| format!("{alias}.{field} {order}"))
            .collect()
    }
}
