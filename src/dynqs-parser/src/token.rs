//! Operator token parser
//!
//! Consumes one operator-prefixed value such as `>=5`, `!foo` or `^abc` and
//! resolves it to an [`Operator`] and a coerced operand.
//!
//! | prefix | resolves to |
//! |--------|-------------|
//! | `!`    | `not_contains` in array context, `not_null: false` when empty, else `ne` |
//! | `>`    | `ge` when followed by `=`, else `gt` |
//! | `<`    | `le` when followed by `=`, else `lt` |
//! | `^`    | `begins_with` |
//! | `$`    | `contains` |
//! | other  | `in` in array context, `not_null: true` when empty, else `eq` |

use crate::coerce::Coercer;
use crate::operator::Operator;
use crate::value::Scalar;

/// Where the token being parsed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenContext {
    /// A single-valued parameter
    Scalar,
    /// One element of a multi-valued (`key[]`) parameter
    Array,
}

impl TokenContext {
    fn is_array(self) -> bool {
        matches!(self, TokenContext::Array)
    }
}

/// Result of parsing a single token
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCondition {
    /// Operator character that was consumed, if the prefix was recognised
    pub token: Option<char>,
    /// Raw operand text after the consumed prefix, or the full token
    pub operand: String,
    /// Resolved condition operator
    pub operator: Operator,
    /// Coerced operand value
    pub value: Scalar,
}

impl ParsedCondition {
    /// The condition as a single `(operator, value)` pair
    pub fn parsed(&self) -> (Operator, &Scalar) {
        (self.operator, &self.value)
    }

    /// Consume into a single `(operator, value)` pair
    pub fn into_parsed(self) -> (Operator, Scalar) {
        (self.operator, self.value)
    }
}

/// Parser for operator-prefixed query values
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenParser {
    coercer: Coercer,
}

impl TokenParser {
    /// Create a parser using the given coercion switches
    pub fn new(coercer: Coercer) -> Self {
        Self { coercer }
    }

    /// The coercer applied to operands
    pub fn coercer(&self) -> &Coercer {
        &self.coercer
    }

    /// Parse one token.
    ///
    /// Callers decide beforehand whether the first character is a configured
    /// operator token; this function resolves whatever prefix it finds.
    pub fn parse(&self, token: &str, context: TokenContext) -> ParsedCondition {
        let mut chars = token.chars();
        let op = chars.next();
        let rest = chars.as_str();
        let (eq, operand) = match rest.strip_prefix('=') {
            Some(after) => (true, after),
            None => (false, rest),
        };

        let resolved = match op {
            Some('!') => Some(if context.is_array() {
                (Operator::NotContains, None)
            } else if operand.is_empty() {
                (Operator::NotNull, Some(Scalar::Bool(false)))
            } else {
                (Operator::Ne, None)
            }),
            Some('>') => Some((if eq { Operator::Ge } else { Operator::Gt }, None)),
            Some('<') => Some((if eq { Operator::Le } else { Operator::Lt }, None)),
            Some('^') => Some((Operator::BeginsWith, None)),
            Some('$') => Some((Operator::Contains, None)),
            _ => None,
        };

        match resolved {
            Some((operator, fixed)) => ParsedCondition {
                token: op,
                operand: operand.to_string(),
                operator,
                value: fixed.unwrap_or_else(|| self.coercer.coerce(operand)),
            },
            // Unrecognised prefix: the whole token is the operand.
            None => {
                let (operator, value) = if context.is_array() {
                    (Operator::In, self.coercer.coerce(token))
                } else if token.is_empty() {
                    (Operator::NotNull, Scalar::Bool(true))
                } else {
                    (Operator::Eq, self.coercer.coerce(token))
                };
                ParsedCondition {
                    token: None,
                    operand: token.to_string(),
                    operator,
                    value,
                }
            }
        }
    }
}

/// Parse a token with default coercion
pub fn parse_token(token: &str, context: TokenContext) -> ParsedCondition {
    TokenParser::default().parse(token, context)
}
