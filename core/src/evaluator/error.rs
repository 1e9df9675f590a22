//! Runtime evaluation errors.
//!
//! These are errors that can occur while evaluating a validated tree.
//! Unsafe constructs never reach this stage (the validator rejects them),
//! so the only runtime failures are arithmetic ones plus resource limits.

use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;

/// Evaluation error with source context.
#[derive(Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Span,
    pub source: String,
}

#[derive(Debug)]
pub enum EvalErrorKind {
    /// Arithmetic error raised by an operator.
    Runtime(RuntimeError),

    /// Resource limit exceeded.
    ResourceExceeded(ResourceExceededError),
}

/// Arithmetic errors that operators can produce.
#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    /// Division, floor-division, or modulo with a zero right operand.
    #[error("Division by zero")]
    DivisionByZero,

    /// Power operation whose result leaves the real domain.
    #[error("{message}")]
    Domain { message: String },
}

/// Resource limit violations that terminate evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum ResourceExceededError {
    /// Evaluation recursion depth exceeded.
    #[error("Evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}

impl EvalError {
    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            EvalErrorKind::Runtime(RuntimeError::DivisionByZero) => (
                "Division by zero".to_string(),
                Some("R001"),
                None,
            ),
            EvalErrorKind::Runtime(RuntimeError::Domain { message }) => (
                message.clone(),
                Some("R002"),
                Some("Power operations must produce a real result".to_string()),
            ),
            EvalErrorKind::ResourceExceeded(err) => (
                err.to_string(),
                Some("R003"),
                Some("Reduce nesting or simplify the expression".to_string()),
            ),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.span.clone(),
            related: Vec::new(),
            help,
            code: code.map(|s| s.to_string()),
        }
    }
}

impl core::fmt::Display for EvalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            EvalErrorKind::Runtime(e) => write!(f, "{}", e)?,
            EvalErrorKind::ResourceExceeded(e) => write!(f, "{}", e)?,
        }
        write!(f, " at {}..{}", self.span.0.start, self.span.0.end)
    }
}

impl std::error::Error for EvalError {}

// Convenient conversions for error construction
impl From<RuntimeError> for EvalErrorKind {
    fn from(e: RuntimeError) -> Self {
        EvalErrorKind::Runtime(e)
    }
}

impl From<ResourceExceededError> for EvalErrorKind {
    fn from(e: ResourceExceededError) -> Self {
        EvalErrorKind::ResourceExceeded(e)
    }
}
