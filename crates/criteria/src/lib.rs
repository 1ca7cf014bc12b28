//! Criteria-to-predicate compilation for repository queries.
//!
//! The crate is the synchronous core of the repository adapter: a closed
//! comparison vocabulary, a typed filter specification per field, and a pure
//! compiler that turns an ordered criteria mapping into SQL predicate text
//! plus named parameter bindings. It performs no I/O and holds no state.

pub mod comparison;
pub mod compiler;
pub mod error;
pub mod filter;
pub mod sort;
pub mod value;

pub use comparison::{Comparison, break_value, is_comparison};
pub use compiler::{CompiledCriteria, Criteria, Predicate, compile};
pub use error::CriteriaError;
pub use filter::FilterSpec;
pub use sort::{SortOrder, Sorting};
pub use value::Value;
