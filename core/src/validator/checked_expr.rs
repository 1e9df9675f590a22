use crate::parser::AnnotatedSource;
use crate::values::Number;

/// A validated expression plus the span annotations for its nodes.
///
/// Only [`validator::validate`](crate::validator::validate) produces this
/// type, so holding one is proof the tree passed the gate.
#[derive(Debug)]
pub struct ValidatedExpr<'a> {
    pub expr: &'a CheckedExpr<'a>,
    pub ann: &'a AnnotatedSource<'a, CheckedExpr<'a>>,
}

/// The closed node set the evaluator accepts.
///
/// Everything outside these three cases was rejected during validation,
/// so the evaluator never needs a fallback arm for unsafe constructs —
/// they are unrepresentable here.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckedExpr<'a> {
    Literal(Number),
    Unary {
        op: SignOp,
        operand: &'a CheckedExpr<'a>,
    },
    Binary {
        op: ArithOp,
        left: &'a CheckedExpr<'a>,
        right: &'a CheckedExpr<'a>,
    },
}

/// Arithmetic binary operators that survive validation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Rem,
    Pow,
}

/// Sign operators that survive validation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SignOp {
    Pos,
    Neg,
}
