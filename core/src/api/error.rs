//! Public error types for the evaluation API.
//!
//! This module defines the stable error types exposed to library users.
//! Internal errors are converted to these public types at API boundaries.

use thiserror::Error;

use crate::evaluator::{EvalError, EvalErrorKind, RuntimeError};
use crate::parser::{ParseError, ParseErrorKind, Span};
use crate::validator::{ValidationError, ValidationErrorKind};

/// Public error type for all evaluation failures.
///
/// Every stage of the pipeline folds into this one enum so callers never
/// need to know which stage failed — only what went wrong. Variants that
/// point at a location in the input carry a [`Diagnostic`] plus the source
/// text for rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// The expression was empty or contained only whitespace.
    #[error("expression is empty or contains only whitespace")]
    EmptyInput,

    /// The text does not parse as a single expression.
    #[error("syntax error: {}", .diagnostic.message)]
    Syntax { diagnostic: Diagnostic, src: String },

    /// The expression contains a construct outside the arithmetic grammar
    /// (a name, call, attribute access, subscript, ...).
    #[error("{}", .diagnostic.message)]
    DisallowedElement { diagnostic: Diagnostic, src: String },

    /// The expression contains an operator outside the allowed sets.
    #[error("{}", .diagnostic.message)]
    DisallowedOperator { diagnostic: Diagnostic, src: String },

    /// Division, floor-division, or modulo with a zero right operand.
    #[error("division by zero")]
    DivisionByZero { diagnostic: Diagnostic, src: String },

    /// A power operation whose result leaves the real domain.
    #[error("{}", .diagnostic.message)]
    Domain { diagnostic: Diagnostic, src: String },

    /// The expression exceeded a resource limit (nesting depth).
    #[error("resource limit exceeded: {message}")]
    ResourceLimit { message: String },
}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "V001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - evaluation cannot succeed.
    Error,
    /// Warning - suspicious input that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic (e.g., "defined here").
#[derive(Debug, Clone)]
pub struct RelatedInfo {
    /// Source location of the related information.
    pub span: Span,

    /// Message explaining the relevance.
    pub message: String,
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match &err.kind {
            ParseErrorKind::EmptyInput => Error::EmptyInput,
            ParseErrorKind::MaxDepthExceeded { depth, max_depth } => Error::ResourceLimit {
                message: format!(
                    "expression nesting depth {} exceeds maximum of {}",
                    depth, max_depth
                ),
            },
            _ => {
                let diagnostic = err.to_diagnostic();
                Error::Syntax {
                    diagnostic,
                    src: err.source,
                }
            }
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        let diagnostic = err.to_diagnostic();
        match &err.kind {
            ValidationErrorKind::DisallowedElement { .. } => Error::DisallowedElement {
                diagnostic,
                src: err.source,
            },
            ValidationErrorKind::DisallowedBinaryOperator { .. }
            | ValidationErrorKind::DisallowedUnaryOperator { .. } => Error::DisallowedOperator {
                diagnostic,
                src: err.source,
            },
            ValidationErrorKind::MaxDepthExceeded { depth, max_depth } => Error::ResourceLimit {
                message: format!(
                    "expression nesting depth {} exceeds maximum of {}",
                    depth, max_depth
                ),
            },
        }
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        let diagnostic = err.to_diagnostic();
        match &err.kind {
            EvalErrorKind::Runtime(RuntimeError::DivisionByZero) => Error::DivisionByZero {
                diagnostic,
                src: err.source,
            },
            EvalErrorKind::Runtime(RuntimeError::Domain { .. }) => Error::Domain {
                diagnostic,
                src: err.source,
            },
            EvalErrorKind::ResourceExceeded(resource) => Error::ResourceLimit {
                message: resource.to_string(),
            },
        }
    }
}
