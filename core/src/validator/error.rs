use crate::api::{Diagnostic, Severity};
use crate::parser::{BinaryOp, Span, UnaryOp};

/// Validation error with context
#[derive(Debug)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub source: String,
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        if let Some(ref help) = diagnostic.help {
            write!(f, "\nhelp: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Specific kinds of validation errors
#[derive(Debug)]
pub enum ValidationErrorKind {
    /// A construct outside the arithmetic-only node set
    DisallowedElement { kind: String, span: Span },
    /// A binary operator outside the arithmetic set
    DisallowedBinaryOperator { op: BinaryOp, span: Span },
    /// A unary operator other than sign
    DisallowedUnaryOperator { op: UnaryOp, span: Span },
    /// Maximum nesting depth exceeded during the walk
    MaxDepthExceeded { depth: usize, max_depth: usize },
}

impl ValidationErrorKind {
    /// Get the span of the error
    pub fn span(&self) -> Option<Span> {
        match self {
            ValidationErrorKind::DisallowedElement { span, .. } => Some(span.clone()),
            ValidationErrorKind::DisallowedBinaryOperator { span, .. } => Some(span.clone()),
            ValidationErrorKind::DisallowedUnaryOperator { span, .. } => Some(span.clone()),
            ValidationErrorKind::MaxDepthExceeded { .. } => None,
        }
    }
}

impl ValidationError {
    /// Create a new ValidationError
    pub fn new(kind: ValidationErrorKind, source: String) -> Self {
        Self { kind, source }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            ValidationErrorKind::DisallowedElement { kind, .. } => (
                format!("Disallowed expression element: {}", kind),
                Some("V001"),
                Some("Only numeric literals, + - * / // % **, sign operators, and parentheses are allowed".to_string()),
            ),
            ValidationErrorKind::DisallowedBinaryOperator { op, .. } => (
                format!("Disallowed binary operator: {}", op),
                Some("V002"),
                Some("Allowed binary operators are + - * / // % **".to_string()),
            ),
            ValidationErrorKind::DisallowedUnaryOperator { op, .. } => (
                format!("Disallowed unary operator: {}", op),
                Some("V003"),
                Some("Allowed unary operators are + and -".to_string()),
            ),
            ValidationErrorKind::MaxDepthExceeded { max_depth, .. } => (
                format!(
                    "Expression nesting depth exceeds maximum of {} levels",
                    max_depth
                ),
                Some("V004"),
                Some("Reduce nesting or simplify the expression".to_string()),
            ),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self
                .kind
                .span()
                .unwrap_or_else(|| Span::new(0, self.source.len())),
            related: Vec::new(),
            help,
            code: code.map(|s| s.to_string()),
        }
    }
}
