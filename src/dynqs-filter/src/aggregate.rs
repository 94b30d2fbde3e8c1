//! Array aggregation
//!
//! Folds every element of a multi-valued parameter into one [`Condition`].
//! Membership (`in`) and `not_contains` values accumulate into lists; any
//! other operator keeps the last value seen.

use crate::output::Condition;
use dynqs_parser::{Operator, OperatorSet, TokenContext, TokenParser};

/// Aggregate the elements of one multi-valued parameter.
///
/// Returns `None` when `in` is not among the configured tokens or there are
/// no elements, so the field is left out of the output entirely.
pub fn aggregate<S: AsRef<str>>(
    elements: &[S],
    ops: &OperatorSet,
    parser: &TokenParser,
) -> Option<Condition> {
    if !ops.allows_in() || elements.is_empty() {
        return None;
    }

    let mut condition = Condition::new();

    for element in elements {
        let element = element.as_ref();

        if ops.recognizes(element) {
            let (operator, value) = parser.parse(element, TokenContext::Array).into_parsed();
            if operator.is_list() {
                condition.push(operator, value);
            } else {
                condition.set(operator, value);
            }
        } else {
            condition.push(Operator::In, parser.coercer().coerce(element));
        }
    }

    Some(condition)
}
