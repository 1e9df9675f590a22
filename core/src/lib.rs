//! Core pipeline for safe arithmetic expression evaluation.
//!
//! Expression text flows through three stages, each of which owns one
//! concern:
//!
//! 1. [`parser`] — turns text into a raw expression tree. The grammar
//!    accepts a superset of the evaluable language (names, calls, member
//!    access, comparisons, ...) so that rejection can name the offending
//!    construct.
//! 2. [`validator`] — the single gate between parsing and evaluation.
//!    Converts the raw tree into the closed arithmetic-only
//!    [`validator::CheckedExpr`] node set, rejecting everything else.
//! 3. [`evaluator`] — walks a checked tree and produces a
//!    [`values::Number`].
//!
//! The [`api`] module packages the pipeline behind a single
//! [`api::evaluate`] entry point with a stable error type.

pub mod api;
pub mod evaluator;
pub mod parser;
pub mod validator;
pub mod values;
