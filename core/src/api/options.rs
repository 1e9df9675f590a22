//! Configuration options for expression evaluation.

/// Resource limits applied to a single [`evaluate`](crate::api::evaluate)
/// call.
///
/// # Example
///
/// ```
/// use abacus_core::api::Options;
///
/// let options = Options { max_depth: 100 };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum expression nesting depth, enforced at parse time (bracket
    /// nesting), during validation (tree depth), and again during
    /// evaluation (recursion depth).
    ///
    /// Default: 500
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: crate::parser::DEFAULT_MAX_DEPTH,
        }
    }
}
