//! dynqs: URL query parameters to document-database condition filters
//!
//! This crate re-exports the public API of the workspace members:
//!
//! - [`parser`] (`dynqs-parser`): operator token grammar and value coercion
//! - [`filter`] (`dynqs-filter`): configuration, key rules, hooks and assembly
//!
//! ```rust
//! use dynqs::{Query, QueryParser};
//!
//! let filter = QueryParser::default().parse(&Query::from_query_string("age=%3E5"))?;
//! assert_eq!(filter.to_json(), serde_json::json!({"age": {"gt": 5}}));
//! # Ok::<(), dynqs::Error>(())
//! ```

pub use dynqs_filter as filter;
pub use dynqs_parser as parser;

pub use dynqs_filter::{
    parse, Condition, CustomHook, Emitted, Error, FieldFilter, Filter, HookResult, Operand,
    Options, OptionsBuilder, OptionsConfig, Query, QueryParser, QueryValue, RangeKind, Result,
};
pub use dynqs_parser::{Coercer, Operator, OperatorSet, Scalar, TokenContext, TokenParser};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
