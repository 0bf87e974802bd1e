//! Error types for the patch engine

use thiserror::Error;

/// Errors raised when building rewrite rules from untrusted input
///
/// Applying a rule never fails; only construction does. A rule that passes
/// validation is guaranteed to render well-formed require statements and to
/// converge when applied repeatedly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    /// Source or target module name was empty
    #[error("module name is empty")]
    EmptyModule,

    /// Module name would break out of the rendered require statement
    #[error("module name contains a quote: {0:?}")]
    QuotedModule(String),

    /// The replacement still matches the search statement, so applying the
    /// rule a second time would rewrite its own output
    #[error("rewrite {from:?} -> {to:?} is not idempotent")]
    RecursiveTarget {
        /// Module name being rewritten
        from: String,
        /// Module path it would be rewritten to
        to: String,
    },
}
