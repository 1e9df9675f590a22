//! Abacus - safe evaluation of arithmetic expressions
//!
//! # Overview
//!
//! Abacus evaluates arithmetic supplied as text while guaranteeing that
//! nothing but arithmetic can run. The allowed language is numeric
//! literals, the binary operators `+ - * / // % **`, unary sign, and
//! parentheses. Everything else — names, calls, attribute access,
//! subscripts, comparisons, boolean logic — parses but is rejected by a
//! fail-closed validation gate before evaluation starts, with an error
//! naming the offending construct.
//!
//! # Quick Start
//!
//! ```
//! use abacus::{evaluate, Number};
//!
//! assert_eq!(evaluate("2 + 3 * 4").unwrap(), Number::Int(14));
//! assert_eq!(evaluate("(2 + 3) * 4").unwrap(), Number::Int(20));
//! assert_eq!(evaluate("7 / 2").unwrap(), Number::Float(3.5));
//!
//! // Injection attempts are classified, not evaluated
//! assert!(evaluate("__import__('os').system('true')").is_err());
//! ```
//!
//! # Errors
//!
//! Every failure is an [`Error`] variant tagging what went wrong
//! (`EmptyInput`, `Syntax`, `DisallowedElement`, `DisallowedOperator`,
//! `DivisionByZero`, `Domain`, `ResourceLimit`). Variants that point into
//! the source carry a [`Diagnostic`] which [`render_error`] can print with
//! source snippets and annotations.

mod error_renderer;

// Re-export public API from abacus_core
pub use abacus_core::api::{
    Diagnostic, Error, Options, RelatedInfo, Severity, evaluate, evaluate_with_options,
};

// Re-export commonly used value types
pub use abacus_core::values::Number;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
