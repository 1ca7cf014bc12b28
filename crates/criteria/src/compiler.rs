//! Turns a criteria mapping into predicate clauses and parameter bindings.

use crate::{comparison::Comparison, error::CriteriaError, filter::FilterSpec, value::Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered field → filter mapping.
///
/// One entry per field: the parameter key is the field name, so two operators
/// on the same field in one call cannot be expressed. Inserting a field twice
/// replaces the earlier filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    fields: IndexMap<String, FilterSpec>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, spec: FilterSpec) -> Self {
        self.fields.insert(field.into(), spec);
        self
    }

    /// Shorthand for an equality filter.
    pub fn field_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(field, FilterSpec::eq(value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterSpec)> {
        self.fields.iter().map(|(field, spec)| (field.as_str(), spec))
    }

    /// Builds criteria from a loose JSON object, one filter per key, applying
    /// the shape dispatch of [`FilterSpec::from_json`] to each value.
    pub fn from_json(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let fields = map
            .iter()
            .map(|(field, json)| (field.clone(), FilterSpec::from_json(json)))
            .collect();
        Self { fields }
    }
}

/// One compiled clause; `binding` is absent exactly for the `IS NULL` /
/// `IS NOT NULL` renderings.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub clause: String,
    pub binding: Option<(String, Value)>,
}

impl Predicate {
    fn bare(clause: String) -> Self {
        Predicate {
            clause,
            binding: None,
        }
    }

    fn bound(clause: String, field: &str, value: Value) -> Self {
        Predicate {
            clause,
            binding: Some((field.to_string(), value)),
        }
    }
}

/// The compiled output of one criteria mapping: predicate clauses in input
/// order plus the named parameter table, ready to merge into a query builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledCriteria {
    pub predicates: Vec<Predicate>,
    pub params: IndexMap<String, Value>,
}

/// Compiles a criteria mapping against a table alias.
///
/// Pure function: no state survives the call, and compiling the same input
/// twice yields structurally identical output. The only rejected input is a
/// null operand under an operator with no null rendering.
pub fn compile(criteria: &Criteria, alias: &str) -> Result<CompiledCriteria, CriteriaError> {
    let mut compiled = CompiledCriteria::default();

    for (field, spec) in criteria.iter() {
        let predicate = compile_field(field, spec, alias)?;
        if let Some((name, value)) = &predicate.binding {
            compiled.params.insert(name.clone(), value.clone());
        }
        compiled.predicates.push(predicate);
    }

    Ok(compiled)
}

fn compile_field(field: &str, spec: &FilterSpec, alias: &str) -> Result<Predicate, CriteriaError> {
    let predicate = match spec {
        FilterSpec::IsNull | FilterSpec::Equals(Value::Null) => {
            Predicate::bare(format!("{alias}.{field} IS NULL"))
        }
        // A sequence operand has no scalar equality; it renders as
        // membership whichever way it was spelled.
        FilterSpec::InList(values) | FilterSpec::Equals(Value::List(values)) => Predicate::bound(
            format!("{alias}.{field} IN (:{field})"),
            field,
            Value::List(values.clone()),
        ),
        FilterSpec::Equals(value) => Predicate::bound(
            format!("{alias}.{field} = :{field}"),
            field,
            value.clone(),
        ),
        FilterSpec::Compare(Comparison::Contains, operand) => {
            // No wildcard wrapping here; the caller supplies its own `%`.
            require_operand(field, Comparison::Contains, operand)?;
            Predicate::bound(
                format!("{alias}.{field} LIKE :{field}"),
                field,
                operand.clone(),
            )
        }
        FilterSpec::Compare(op @ (Comparison::In | Comparison::NotIn), operand) => {
            require_operand(field, *op, operand)?;
            Predicate::bound(
                format!("{alias}.{field} {op} (:{field})"),
                field,
                operand.clone(),
            )
        }
        FilterSpec::Compare(Comparison::Eq | Comparison::Is, Value::Null) => {
            Predicate::bare(format!("{alias}.{field} IS NULL"))
        }
        FilterSpec::Compare(Comparison::Neq, Value::Null) => {
            Predicate::bare(format!("{alias}.{field} IS NOT NULL"))
        }
        FilterSpec::Compare(op, operand) => {
            require_operand(field, *op, operand)?;
            Predicate::bound(
                format!("{alias}.{field} {op} :{field}"),
                field,
                operand.clone(),
            )
        }
    };

    Ok(predicate)
}

fn require_operand(field: &str, op: Comparison, operand: &Value) -> Result<(), CriteriaError> {
    if operand.is_null() {
        return Err(CriteriaError::NullOperand {
            field: field.to_string(),
            operator: op.to_string(),
        });
    }
    Ok(())
}
