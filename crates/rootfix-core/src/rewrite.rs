//! Require-rewrite rules
//!
//! A rule matches the exact statement text the host printer emits for a
//! module load (`require("<name>");` plus the trailing newline) and swaps
//! in the same statement with a different module path. Matching is a fixed
//! literal, not a pattern: the printer's output format is stable, and a
//! literal keeps the replacement length-independent of its surroundings so
//! everything outside the match stays byte-identical.

use std::borrow::Cow;

use crate::error::RewriteError;
use crate::types::EmitOptions;

/// Module name the host printer emits for the bundled support library
pub const BUNDLE_MODULE: &str = "lualib_bundle";

/// Module path the bundle resolves from on the target machine
pub const BUNDLE_ROOT_TARGET: &str = "/lualib_bundle";

/// One require-rewrite rule: load `from` as `to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireRewrite {
    from: String,
    to: String,
}

impl RequireRewrite {
    /// Build a validated rule
    ///
    /// Rejects empty names, names containing a `"` (which would break out
    /// of the rendered statement), and replacements that still contain the
    /// search statement (which would make repeated application diverge).
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, RewriteError> {
        let from = from.into();
        let to = to.into();
        if from.is_empty() || to.is_empty() {
            return Err(RewriteError::EmptyModule);
        }
        if from.contains('"') {
            return Err(RewriteError::QuotedModule(from));
        }
        if to.contains('"') {
            return Err(RewriteError::QuotedModule(to));
        }
        let rule = Self { from, to };
        if rule.target_stmt().contains(&rule.search_stmt()) {
            return Err(RewriteError::RecursiveTarget {
                from: rule.from,
                to: rule.to,
            });
        }
        Ok(rule)
    }

    /// The default rule: resolve the bundle from the filesystem root
    pub fn rootfix() -> Self {
        Self {
            from: BUNDLE_MODULE.to_string(),
            to: BUNDLE_ROOT_TARGET.to_string(),
        }
    }

    /// Bundle rule with a custom target module path
    pub fn for_target(to: impl Into<String>) -> Result<Self, RewriteError> {
        Self::new(BUNDLE_MODULE, to)
    }

    /// Bundle rule honoring the `root_fix` build option when set
    pub fn from_options(options: &EmitOptions) -> Result<Self, RewriteError> {
        match &options.root_fix {
            Some(target) => Self::for_target(target.clone()),
            None => Ok(Self::rootfix()),
        }
    }

    /// Module name this rule matches
    pub fn source(&self) -> &str {
        &self.from
    }

    /// Module path this rule substitutes
    pub fn target(&self) -> &str {
        &self.to
    }

    /// Exact statement text the host printer emits for the unqualified load
    pub fn search_stmt(&self) -> String {
        format!("require(\"{}\");\n", self.from)
    }

    /// Statement text after path qualification
    pub fn target_stmt(&self) -> String {
        format!("require(\"{}\");\n", self.to)
    }

    /// Number of matches in `code`
    pub fn occurrences(&self, code: &str) -> usize {
        code.matches(&self.search_stmt()).count()
    }

    /// Replace every occurrence of the matched statement
    ///
    /// Input without a match is returned borrowed and untouched. The
    /// replacement never re-contains the search statement (enforced at
    /// construction), so applying a rule twice equals applying it once.
    pub fn apply<'a>(&self, code: &'a str) -> Cow<'a, str> {
        let needle = self.search_stmt();
        if !code.contains(&needle) {
            return Cow::Borrowed(code);
        }
        Cow::Owned(code.replace(&needle, &self.target_stmt()))
    }
}
