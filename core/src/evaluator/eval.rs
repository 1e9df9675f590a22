//! Core evaluation logic.

use crate::{
    evaluator::{
        EvalError, EvalErrorKind,
        error::ResourceExceededError::*,
        operators,
    },
    validator::{CheckedExpr, ValidatedExpr},
    values::Number,
};

/// Evaluator for validated expressions.
///
/// Walks the checked tree recursively with explicit depth tracking. Every
/// node is one of the three checked cases, so there is no rejection logic
/// here at all — only arithmetic and the depth guard.
pub struct Evaluator<'a> {
    /// The validated expression being evaluated (used for error context).
    expr: &'a ValidatedExpr<'a>,
    max_depth: usize,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(expr: &'a ValidatedExpr<'a>, max_depth: usize) -> Self {
        Self {
            expr,
            max_depth,
            depth: 0,
        }
    }

    fn add_error_context(&self, expr: &'a CheckedExpr<'a>, kind: EvalErrorKind) -> EvalError {
        let span = self
            .expr
            .ann
            .span_of(expr)
            .unwrap_or_else(|| crate::parser::Span::new(0, self.expr.ann.source.len()));
        let source = self.expr.ann.source.to_string();
        EvalError { kind, span, source }
    }

    /// Evaluate the validated expression.
    pub fn eval(&mut self) -> Result<Number, EvalError> {
        self.eval_expr(self.expr.expr)
    }

    /// Evaluate an expression node.
    fn eval_expr(&mut self, expr: &'a CheckedExpr<'a>) -> Result<Number, EvalError> {
        // Check depth before recursing
        if self.depth >= self.max_depth {
            return Err(self.add_error_context(
                expr,
                StackOverflow {
                    depth: self.depth,
                    max_depth: self.max_depth,
                }
                .into(),
            ));
        }

        self.depth += 1;
        let result = self.eval_expr_inner(expr);
        self.depth -= 1;

        result
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_expr_inner(&mut self, expr: &'a CheckedExpr<'a>) -> Result<Number, EvalError> {
        match expr {
            CheckedExpr::Literal(value) => Ok(*value),

            CheckedExpr::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                Ok(operators::eval_unary(*op, value))
            }

            CheckedExpr::Binary { op, left, right } => {
                // Evaluate operands left before right
                let left_val = self.eval_expr(left)?;
                let right_val = self.eval_expr(right)?;

                // Integer arithmetic only when both operands are integers;
                // otherwise promote both to float
                let result = match (left_val, right_val) {
                    (Number::Int(l), Number::Int(r)) => operators::eval_binary_int(*op, l, r),
                    _ => operators::eval_binary_float(*op, left_val.as_f64(), right_val.as_f64()),
                };

                result.map_err(|e| self.add_error_context(expr, e.into()))
            }
        }
    }
}
