//! Query assembly
//!
//! Walks the input parameters in order and routes each one to a custom hook,
//! the array aggregator, or the token parser, collecting the results into a
//! [`Filter`].

use crate::aggregate::aggregate;
use crate::error::{Error, Result};
use crate::keys::KeyRules;
use crate::options::Options;
use crate::output::{Condition, Filter, FieldFilter};
use crate::query::{Query, QueryValue};
use dynqs_parser::{Operator, Scalar, TokenContext, TokenParser};

/// Query-parameter to filter translator
#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    options: Options,
    tokens: TokenParser,
}

impl QueryParser {
    /// Create a parser from configuration
    pub fn new(options: Options) -> Self {
        let tokens = TokenParser::new(*options.coercer());
        Self { options, tokens }
    }

    /// The configuration in use
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Translate a query into a filter.
    ///
    /// Keys that fail validation and values of unsupported shape are dropped
    /// silently. The only error is a custom hook failing.
    pub fn parse(&self, query: &Query) -> Result<Filter> {
        let mut filter = Filter::new();

        for (raw_key, value) in query.iter() {
            let is_array = value.is_array();
            let key = KeyRules::normalize(raw_key, is_array);

            // `Other` values skip the shape check; only a hook can consume them
            let key = match value {
                QueryValue::Other(_) => self.admit_unshaped(key),
                _ => self.options.keys.admit(key, is_array).ok().or_else(|| {
                    log::debug!("skipping '{raw_key}': rejected by key rules");
                    None
                }),
            };
            let Some(key) = key else {
                continue;
            };

            if let Some(hook) = self.options.custom.get(key) {
                log::trace!("'{raw_key}' handled by custom hook '{key}'");
                let emitted = hook(value).map_err(|e| Error::hook(key, e.to_string()))?;
                if let Some(emitted) = emitted {
                    filter.insert(emitted.field, emitted.filter);
                }
                continue;
            }

            let field_filter = match value {
                QueryValue::Array(elements) => {
                    self.log_unsafe_values(key, elements);
                    aggregate(elements.as_slice(), &self.options.ops, &self.tokens).map(FieldFilter::from)
                }
                QueryValue::String(s) => {
                    self.log_unsafe_values(key, std::slice::from_ref(s));
                    Some(self.parse_scalar(s))
                }
                QueryValue::Other(_) => {
                    log::debug!("skipping '{raw_key}': unsupported value type");
                    None
                }
            };

            if let Some(field_filter) = field_filter {
                log::trace!("'{raw_key}' -> '{key}': {field_filter:?}");
                filter.insert(key, field_filter);
            }
        }

        Ok(filter)
    }

    /// Parse a query string directly
    pub fn parse_query_string(&self, input: &str) -> Result<Filter> {
        self.parse(&Query::from_query_string(input))
    }

    fn parse_scalar(&self, value: &str) -> FieldFilter {
        if value.is_empty() {
            return Condition::single(Operator::NotNull, Scalar::Bool(true)).into();
        }

        if self.options.ops.recognizes(value) {
            let (operator, value) = self.tokens.parse(value, TokenContext::Scalar).into_parsed();
            return Condition::single(operator, value).into();
        }

        self.tokens.coercer().coerce(value).into()
    }

    fn admit_unshaped<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        let rules = &self.options.keys;
        if !rules.whitelist.is_empty() && !rules.whitelist.contains(key) {
            return None;
        }
        if rules.blacklist.contains(key) {
            return None;
        }
        Some(rules.alias_for(key).unwrap_or(key))
    }

    fn log_unsafe_values(&self, key: &str, values: &[String]) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        for value in values {
            if self.options.keys.has_unsafe_chars(value) {
                log::debug!("value for '{key}' contains characters outside the value pattern");
            }
        }
    }
}

/// Translate a query with default options
pub fn parse(query: &Query) -> Filter {
    // default options register no hooks, so nothing can fail
    QueryParser::default().parse(query).unwrap_or_default()
}
