//! dynqs-filter: condition filters from URL query parameters
//!
//! Translates flat query parameters into the conditional filter object a
//! document-database client understands (`eq`, `ne`, `gt`, `ge`, `lt`, `le`,
//! `begins_with`, `contains`, `in`, `not_contains`, `not_null`).
//!
//! # Quick Start
//!
//! ```rust
//! use dynqs_filter::{Query, QueryParser};
//! use serde_json::json;
//!
//! let parser = QueryParser::default();
//! let query = Query::from_query_string("age=%3E%3D5&tags[]=a&tags[]=!b&name=^Jo");
//! let filter = parser.parse(&query)?;
//!
//! assert_eq!(
//!     filter.to_json(),
//!     json!({
//!         "age": {"ge": 5},
//!         "tags": {"in": ["a"], "not_contains": ["b"]},
//!         "name": {"begins_with": "Jo"}
//!     })
//! );
//! # Ok::<(), dynqs_filter::Error>(())
//! ```
//!
//! # Date ranges
//!
//! ```rust
//! use dynqs_filter::{Options, Query, QueryParser, RangeKind};
//! use serde_json::json;
//!
//! let options = Options::builder()
//!     .range_hook("createdAt", RangeKind::After, "createdAt")
//!     .build()?;
//! let filter = QueryParser::new(options)
//!     .parse(&Query::new().with("createdAt", "1609459200"))?;
//!
//! assert_eq!(
//!     filter.to_json(),
//!     json!({"createdAt": {"ge": "2021-01-01T00:00:00.000Z"}})
//! );
//! # Ok::<(), dynqs_filter::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod aggregate;
pub mod assembler;
#[allow(missing_docs)]
pub mod error;
pub mod hooks;
pub mod keys;
pub mod options;
pub mod output;
pub mod query;
#[cfg(test)]
mod tests;

pub use assembler::{parse, QueryParser};
pub use error::{Error, Result};
pub use hooks::{CustomHook, Emitted, HookError, HookRegistry, HookResult, RangeKind};
pub use keys::{KeyRules, Rejection};
pub use options::{HookSpec, Options, OptionsBuilder, OptionsConfig, StringConfig};
pub use output::{Condition, FieldFilter, Filter, Operand};
pub use query::{Query, QueryValue};

// Re-export parser types used in the public API
pub use dynqs_parser::{Coercer, Operator, OperatorSet, Scalar};
