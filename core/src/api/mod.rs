//! Public API for safe arithmetic expression evaluation.
//!
//! This module provides the stable surface for callers: a single
//! [`evaluate`] function that sequences parse → validate → evaluate, a
//! single [`Error`] type tagging every way that pipeline can fail, and the
//! [`Diagnostic`] model consumed by error renderers.
//!
//! # Example
//!
//! ```
//! use abacus_core::api::evaluate;
//! use abacus_core::values::Number;
//!
//! assert_eq!(evaluate("2 + 3 * 4").unwrap(), Number::Int(14));
//! assert!(evaluate("__import__('os')").is_err());
//! ```

pub mod error;
pub mod evaluate;
pub mod options;

pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use evaluate::{evaluate, evaluate_with_options};
pub use options::Options;
