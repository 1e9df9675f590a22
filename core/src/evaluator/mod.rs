//! Tree-walking evaluator for validated expressions.
//!
//! The evaluator interprets checked trees ([`ValidatedExpr`]) and produces
//! numeric values ([`Number`]).
//!
//! ## Design Principles
//!
//! - **Never panic**: all adversarial inputs must be handled gracefully
//! - **Stack-safe**: depth tracking prevents stack overflow from deeply
//!   nested expressions
//! - **Validated input only**: the input type is the closed checked node
//!   set, so no rejection logic lives here
//!
//! ## Example
//!
//! ```
//! use abacus_core::{parser, validator, evaluator, values::Number};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let parsed = parser::parse(&arena, "1 + 2").unwrap();
//! let validated = validator::validate(&arena, &parsed).unwrap();
//! let result = evaluator::eval(&validated).unwrap();
//! assert_eq!(result, Number::Int(3));
//! ```

mod error;
mod eval;
mod operators;

#[cfg(test)]
mod eval_test;

pub use error::{EvalError, EvalErrorKind, ResourceExceededError, RuntimeError};
pub use eval::Evaluator;

use crate::validator::ValidatedExpr;
use crate::values::Number;

/// Default cap on evaluation recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Evaluate a validated expression with the default depth limit.
pub fn eval<'a>(expr: &'a ValidatedExpr<'a>) -> Result<Number, EvalError> {
    eval_with_limits(expr, DEFAULT_MAX_DEPTH)
}

/// Evaluate a validated expression with a custom depth limit.
///
/// The depth guard is a second line of defense: the validator already
/// bounds tree depth, so hitting it here means the caller asked for a
/// smaller evaluation budget than the validation budget.
pub fn eval_with_limits<'a>(expr: &'a ValidatedExpr<'a>, max_depth: usize) -> Result<Number, EvalError> {
    Evaluator::new(expr, max_depth).eval()
}
