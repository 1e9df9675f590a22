//! The evaluation pipeline entry point.

use bumpalo::Bump;

use crate::api::{Error, Options};
use crate::values::Number;
use crate::{evaluator, parser, validator};

/// Evaluate an arithmetic expression with default options.
///
/// Sequences parse → validate → evaluate. The tree lives in an arena owned
/// by this call and is discarded before it returns; nothing is cached and
/// no state is shared, so concurrent calls are trivially safe.
///
/// # Example
///
/// ```
/// use abacus_core::api::evaluate;
/// use abacus_core::values::Number;
///
/// assert_eq!(evaluate("(2 + 3) * 4").unwrap(), Number::Int(20));
/// assert_eq!(evaluate("7 / 2").unwrap(), Number::Float(3.5));
/// assert!(evaluate("1 / 0").is_err());
/// ```
pub fn evaluate(expression: &str) -> Result<Number, Error> {
    evaluate_with_options(expression, &Options::default())
}

/// Evaluate an arithmetic expression with explicit resource limits.
pub fn evaluate_with_options(expression: &str, options: &Options) -> Result<Number, Error> {
    let arena = Bump::new();

    let parsed = parser::parse_with_max_depth(&arena, expression, options.max_depth)?;
    let validated = validator::validate_with_max_depth(&arena, &parsed, options.max_depth)?;
    let result = evaluator::eval_with_limits(&validated, options.max_depth)?;

    tracing::debug!(expression, %result, "evaluated expression");
    Ok(result)
}
