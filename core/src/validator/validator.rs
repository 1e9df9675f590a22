//! The validation gate between parsing and evaluation.
//!
//! Converts the raw parse tree into the closed [`CheckedExpr`] node set in
//! a single walk. The match over raw node kinds is exhaustive with every
//! arm written out: adding a variant to the raw tree will not compile
//! until this gate classifies it, and nothing defaults to "allow".

use bumpalo::Bump;

use crate::parser::{
    AnnotatedSource, BinaryOp, DEFAULT_MAX_DEPTH, Expr, Literal, ParsedExpr, Span, UnaryOp,
};
use crate::validator::{
    checked_expr::{ArithOp, CheckedExpr, SignOp, ValidatedExpr},
    error::{ValidationError, ValidationErrorKind},
};
use crate::values::Number;

/// Validate a parsed expression with the default depth limit.
pub fn validate<'a>(
    arena: &'a Bump,
    parsed: &ParsedExpr<'a>,
) -> Result<ValidatedExpr<'a>, ValidationError> {
    validate_with_max_depth(arena, parsed, DEFAULT_MAX_DEPTH)
}

/// Validate a parsed expression, bounding the walk at `max_depth`.
///
/// The walk always completes (or fails) before any evaluation starts;
/// validation and evaluation are never interleaved.
pub fn validate_with_max_depth<'a>(
    arena: &'a Bump,
    parsed: &ParsedExpr<'a>,
    max_depth: usize,
) -> Result<ValidatedExpr<'a>, ValidationError> {
    let ann = &*arena.alloc(AnnotatedSource::new(arena, parsed.ann.source));
    let mut validator = Validator {
        arena,
        raw: parsed.ann,
        ann,
        depth: 0,
        max_depth,
    };
    let expr = validator.check(parsed.expr)?;
    Ok(ValidatedExpr { expr, ann })
}

struct Validator<'a> {
    arena: &'a Bump,
    raw: &'a AnnotatedSource<'a, Expr<'a>>,
    ann: &'a AnnotatedSource<'a, CheckedExpr<'a>>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Validator<'a> {
    fn span_of(&self, expr: &'a Expr<'a>) -> Span {
        self.raw
            .span_of(expr)
            .unwrap_or_else(|| Span::new(0, self.raw.source.len()))
    }

    fn error(&self, kind: ValidationErrorKind) -> ValidationError {
        ValidationError::new(kind, self.raw.source.to_string())
    }

    fn reject_element(&self, expr: &'a Expr<'a>, kind: &str) -> ValidationError {
        self.error(ValidationErrorKind::DisallowedElement {
            kind: kind.to_string(),
            span: self.span_of(expr),
        })
    }

    fn alloc(&self, expr: &'a Expr<'a>, checked: CheckedExpr<'a>) -> &'a CheckedExpr<'a> {
        let node = &*self.arena.alloc(checked);
        self.ann.add_span(node, self.span_of(expr));
        node
    }

    fn check(&mut self, expr: &'a Expr<'a>) -> Result<&'a CheckedExpr<'a>, ValidationError> {
        if self.depth >= self.max_depth {
            return Err(self.error(ValidationErrorKind::MaxDepthExceeded {
                depth: self.depth,
                max_depth: self.max_depth,
            }));
        }

        self.depth += 1;
        let result = self.check_inner(expr);
        self.depth -= 1;

        result
    }

    fn check_inner(&mut self, expr: &'a Expr<'a>) -> Result<&'a CheckedExpr<'a>, ValidationError> {
        match expr {
            Expr::Literal(Literal::Int(value)) => {
                Ok(self.alloc(expr, CheckedExpr::Literal(Number::Int(*value))))
            }
            Expr::Literal(Literal::Float(value)) => {
                Ok(self.alloc(expr, CheckedExpr::Literal(Number::Float(*value))))
            }
            Expr::Literal(Literal::Bool(_)) => Err(self.reject_element(expr, "boolean literal")),
            Expr::Literal(Literal::Str(_)) => Err(self.reject_element(expr, "string literal")),

            Expr::Unary { op, expr: operand } => {
                let op = match op {
                    UnaryOp::Pos => SignOp::Pos,
                    UnaryOp::Neg => SignOp::Neg,
                    UnaryOp::Not | UnaryOp::BitNot => {
                        return Err(self.error(ValidationErrorKind::DisallowedUnaryOperator {
                            op: *op,
                            span: self.span_of(expr),
                        }));
                    }
                };
                let operand = self.check(operand)?;
                Ok(self.alloc(expr, CheckedExpr::Unary { op, operand }))
            }

            Expr::Binary { op, left, right } => {
                let op = match op {
                    BinaryOp::Add => ArithOp::Add,
                    BinaryOp::Sub => ArithOp::Sub,
                    BinaryOp::Mul => ArithOp::Mul,
                    BinaryOp::Div => ArithOp::Div,
                    BinaryOp::FloorDiv => ArithOp::FloorDiv,
                    BinaryOp::Rem => ArithOp::Rem,
                    BinaryOp::Pow => ArithOp::Pow,
                    BinaryOp::BitAnd
                    | BinaryOp::BitOr
                    | BinaryOp::BitXor
                    | BinaryOp::Shl
                    | BinaryOp::Shr => {
                        return Err(self.error(ValidationErrorKind::DisallowedBinaryOperator {
                            op: *op,
                            span: self.span_of(expr),
                        }));
                    }
                };
                let left = self.check(left)?;
                let right = self.check(right)?;
                Ok(self.alloc(expr, CheckedExpr::Binary { op, left, right }))
            }

            Expr::Comparison { .. } => Err(self.reject_element(expr, "comparison")),
            Expr::Boolean { .. } => Err(self.reject_element(expr, "boolean operation")),
            Expr::Ident(_) => Err(self.reject_element(expr, "name reference")),
            Expr::Call { .. } => Err(self.reject_element(expr, "function call")),
            Expr::Field { .. } => Err(self.reject_element(expr, "attribute access")),
            Expr::Index { .. } => Err(self.reject_element(expr, "subscript")),
            Expr::Array(_) => Err(self.reject_element(expr, "array literal")),
        }
    }
}
