//! Tests for the operator token grammar
//!
//! Each row of the resolution table is exercised in both scalar and array
//! context.

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn scalar(token: &str) -> ParsedCondition {
    parse_token(token, TokenContext::Scalar)
}

fn array(token: &str) -> ParsedCondition {
    parse_token(token, TokenContext::Array)
}

#[test]
fn test_bang_resolves_to_ne() {
    let parsed = scalar("!foo");
    assert_eq!(parsed.token, Some('!'));
    assert_eq!(parsed.operand, "foo");
    assert_eq!(parsed.parsed(), (Operator::Ne, &Scalar::string("foo")));
}

#[test]
fn test_bang_equals_consumes_equals_sign() {
    assert_eq!(scalar("!=5").into_parsed(), (Operator::Ne, Scalar::Number(5.0)));
}

// Asymmetric on purpose: a bare `!` sets `not_null` to false while an empty
// value without operator sets it to true.
#[test]
fn test_bare_bang_is_not_null_false() {
    assert_eq!(scalar("!").into_parsed(), (Operator::NotNull, Scalar::Bool(false)));
    assert_eq!(scalar("").into_parsed(), (Operator::NotNull, Scalar::Bool(true)));
}

#[test]
fn test_bang_in_array_is_not_contains() {
    assert_eq!(array("!c").into_parsed(), (Operator::NotContains, Scalar::string("c")));
    assert_eq!(array("!").into_parsed(), (Operator::NotContains, Scalar::string("")));
}

#[test]
fn test_comparisons() {
    assert_eq!(scalar(">5").into_parsed(), (Operator::Gt, Scalar::Number(5.0)));
    assert_eq!(scalar(">=5").into_parsed(), (Operator::Ge, Scalar::Number(5.0)));
    assert_eq!(scalar("<5").into_parsed(), (Operator::Lt, Scalar::Number(5.0)));
    assert_eq!(scalar("<=5").into_parsed(), (Operator::Le, Scalar::Number(5.0)));
    assert_eq!(scalar("<=-1.5").into_parsed(), (Operator::Le, Scalar::Number(-1.5)));
    assert_eq!(array(">=2").into_parsed(), (Operator::Ge, Scalar::Number(2.0)));
}

#[test]
fn test_string_operators() {
    assert_eq!(
        scalar("^abc").into_parsed(),
        (Operator::BeginsWith, Scalar::string("abc"))
    );
    assert_eq!(
        scalar("$abc").into_parsed(),
        (Operator::Contains, Scalar::string("abc"))
    );
    assert_eq!(scalar("^=a").into_parsed(), (Operator::BeginsWith, Scalar::string("a")));
}

#[test]
fn test_operand_is_coerced() {
    assert_eq!(scalar("!true").into_parsed(), (Operator::Ne, Scalar::Bool(true)));
    assert_eq!(scalar(">12abc").into_parsed(), (Operator::Gt, Scalar::string("12abc")));
}

#[test]
fn test_unrecognised_prefix_keeps_whole_token() {
    let parsed = scalar("=5");
    assert_eq!(parsed.token, None);
    assert_eq!(parsed.operand, "=5");
    assert_eq!(parsed.into_parsed(), (Operator::Eq, Scalar::string("=5")));

    // `a=b` must not lose its `=`
    assert_eq!(scalar("a=b").operand, "a=b");
    assert_eq!(scalar("42").into_parsed(), (Operator::Eq, Scalar::Number(42.0)));
    assert_eq!(array("42").into_parsed(), (Operator::In, Scalar::Number(42.0)));
    assert_eq!(array("").into_parsed(), (Operator::In, Scalar::string("")));
}

#[test]
fn test_multibyte_first_character() {
    let parsed = scalar("æble");
    assert_eq!(parsed.into_parsed(), (Operator::Eq, Scalar::string("æble")));
}

#[test]
fn test_coercion_switches_reach_operands() {
    let parser = TokenParser::new(Coercer::disabled());
    assert_eq!(
        parser.parse(">5", TokenContext::Scalar).into_parsed(),
        (Operator::Gt, Scalar::string("5"))
    );
    assert_eq!(
        parser.parse("!", TokenContext::Scalar).into_parsed(),
        (Operator::NotNull, Scalar::Bool(false))
    );
}

proptest! {
    #[test]
    fn prop_numeric_coercion_is_idempotent(n in -1.0e12f64..1.0e12f64) {
        let coercer = Coercer::default();
        let first = coercer.coerce(&n.to_string());
        let second = coercer.coerce(&first.to_string());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_integer_coercion_is_idempotent(n in any::<i32>()) {
        let coercer = Coercer::default();
        let first = coercer.coerce(&n.to_string());
        prop_assert_eq!(&first, &Scalar::Number(f64::from(n)));
        prop_assert_eq!(coercer.coerce(&first.to_string()), first);
    }

    #[test]
    fn prop_boolean_coercion_is_idempotent(s in "[tT][rR][uU][eE]|[fF][aA][lL][sS][eE]") {
        let coercer = Coercer::default();
        let first = coercer.coerce(&s);
        prop_assert!(first.as_bool().is_some());
        prop_assert_eq!(coercer.coerce(&first.to_string()), first);
    }

    #[test]
    fn prop_unprefixed_token_is_equality_on_whole_token(
        token in "[a-zA-Z0-9_ .=*-][a-zA-Z0-9_ .=*!^$<>-]{0,12}"
    ) {
        let parsed = scalar(&token);
        prop_assert_eq!(parsed.token, None);
        prop_assert_eq!(&parsed.operand, &token);
        prop_assert_eq!(parsed.operator, Operator::Eq);
        prop_assert_eq!(&parsed.value, &Coercer::default().coerce(&token));

        let parsed = array(&token);
        prop_assert_eq!(parsed.operator, Operator::In);
        prop_assert_eq!(&parsed.operand, &token);
    }

    #[test]
    fn prop_trailing_garbage_never_coerces(n in any::<u32>(), tail in "[a-df-z]{1,4}") {
        let raw = format!("{n}{tail}");
        prop_assert_eq!(Coercer::default().coerce(&raw), Scalar::String(raw.clone()));
    }
}
