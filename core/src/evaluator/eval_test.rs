use bumpalo::Bump;
use pretty_assertions::assert_eq;

use crate::evaluator::{self, EvalErrorKind, ResourceExceededError, RuntimeError};
use crate::parser;
use crate::validator;
use crate::values::Number;

/// Parse, validate, and evaluate in one step.
fn eval_str(source: &str) -> Result<Number, evaluator::EvalError> {
    let arena = Bump::new();
    let parsed = parser::parse(&arena, source).expect("parse failed");
    let validated = validator::validate(&arena, &parsed).expect("validation failed");
    evaluator::eval(&validated)
}

fn eval_ok(source: &str) -> Number {
    eval_str(source).unwrap_or_else(|e| panic!("evaluation failed for {source:?}: {e}"))
}

#[test]
fn test_literals() {
    assert_eq!(eval_ok("42"), Number::Int(42));
    assert_eq!(eval_ok("3.5"), Number::Float(3.5));
    assert_eq!(eval_ok("0x2A"), Number::Int(42));
}

#[test]
fn test_binary_arithmetic() {
    assert_eq!(eval_ok("2 + 3"), Number::Int(5));
    assert_eq!(eval_ok("10 - 4"), Number::Int(6));
    assert_eq!(eval_ok("6 * 7"), Number::Int(42));
}

#[test]
fn test_true_division_always_floats() {
    assert_eq!(eval_ok("6 / 2"), Number::Float(3.0));
    assert_eq!(eval_ok("7 / 2"), Number::Float(3.5));
}

#[test]
fn test_floor_division_keeps_int() {
    assert_eq!(eval_ok("7 // 2"), Number::Int(3));
    assert_eq!(eval_ok("-7 // 2"), Number::Int(-4));
    assert_eq!(eval_ok("7.0 // 2"), Number::Float(3.0));
}

#[test]
fn test_modulo_sign_follows_divisor() {
    assert_eq!(eval_ok("7 % -2"), Number::Int(-1));
    assert_eq!(eval_ok("-7 % 2"), Number::Int(1));
}

#[test]
fn test_pow_right_associative() {
    assert_eq!(eval_ok("2 ** 3 ** 2"), Number::Int(512));
}

#[test]
fn test_unary_operators() {
    assert_eq!(eval_ok("-3 + 4"), Number::Int(1));
    assert_eq!(eval_ok("+5"), Number::Int(5));
    assert_eq!(eval_ok("--5"), Number::Int(5));
    assert_eq!(eval_ok("-2 ** 2"), Number::Int(-4));
}

#[test]
fn test_mixed_promotes_to_float() {
    assert_eq!(eval_ok("1 + 2.5"), Number::Float(3.5));
    assert_eq!(eval_ok("2.5 + 1"), Number::Float(3.5));
}

#[test]
fn test_evaluation_order_left_before_right() {
    // The left operand's error wins when both sides would fail
    let err = eval_str("(1 / 0) + (2 % 0)").unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::Runtime(RuntimeError::DivisionByZero)
    ));
    assert_eq!(err.span.str_of(&err.source), "(1 / 0)");
}

#[test]
fn test_division_by_zero_has_context() {
    let err = eval_str("1 + 2 / 0").unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::Runtime(RuntimeError::DivisionByZero)
    ));
    // The span points at the failing division, not the whole expression
    assert_eq!(err.span.str_of(&err.source), "2 / 0");
}

#[test]
fn test_domain_error() {
    let err = eval_str("(-8) ** 0.5").unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::Runtime(RuntimeError::Domain { .. })
    ));
}

#[test]
fn test_depth_limit() {
    let arena = Bump::new();
    let parsed = parser::parse(&arena, "1 + 2 + 3 + 4").expect("parse failed");
    let validated = validator::validate(&arena, &parsed).expect("validation failed");

    let err = evaluator::eval_with_limits(&validated, 2).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::ResourceExceeded(ResourceExceededError::StackOverflow { max_depth: 2, .. })
    ));

    // The same tree evaluates fine with room to recurse
    assert_eq!(
        evaluator::eval_with_limits(&validated, 10).unwrap(),
        Number::Int(10)
    );
}

#[test]
fn test_idempotent() {
    let first = eval_ok("(2 + 3) * 4 - 5 ** 2");
    for _ in 0..10 {
        assert_eq!(eval_ok("(2 + 3) * 4 - 5 ** 2"), first);
    }
}
