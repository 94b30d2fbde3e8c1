//! dynqs-parser: operator grammar and value coercion for query filters
//!
//! This crate turns individual query-string values into typed conditions.
//! It knows nothing about keys, configuration files or output assembly; those
//! live in `dynqs-filter`.
//!
//! # Quick Start
//!
//! ```rust
//! use dynqs_parser::{Operator, Scalar, TokenContext, TokenParser};
//!
//! let parser = TokenParser::default();
//! let parsed = parser.parse(">=5", TokenContext::Scalar);
//! assert_eq!(parsed.operator, Operator::Ge);
//! assert_eq!(parsed.value, Scalar::Number(5.0));
//! ```
//!
//! # Coercion
//!
//! ```rust
//! use dynqs_parser::{Coercer, Scalar};
//!
//! let coercer = Coercer::default();
//! assert_eq!(coercer.coerce("TRUE"), Scalar::Bool(true));
//! assert_eq!(coercer.coerce("12abc"), Scalar::string("12abc"));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod coerce;
pub mod operator;
pub mod token;
pub mod value;
#[cfg(test)]
mod tests;

// Re-export main types
pub use coerce::{is_numeric, parse_number, Coercer};
pub use operator::{Operator, OperatorSet, DEFAULT_TOKENS, IN_TOKEN, NULL_TOKEN};
pub use token::{parse_token, ParsedCondition, TokenContext, TokenParser};
pub use value::Scalar;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
