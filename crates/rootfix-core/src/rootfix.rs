//! Bundle require rootfix
//!
//! The concrete patch this crate exists for: path-qualify the bundled
//! support-library load emitted at the top of every transpiled file.

use std::sync::Arc;

use crate::error::RewriteError;
use crate::patch::EmitPatch;
use crate::rewrite::RequireRewrite;
use crate::types::{EmitContext, EmitOptions, PrintedFile};

/// Rewrites the bundled support-library require to a path-qualified one
pub struct RequireRootfix {
    rewrite: RequireRewrite,
}

impl RequireRootfix {
    /// Patch with the default rule (`lualib_bundle` -> `/lualib_bundle`)
    pub fn new() -> Self {
        Self {
            rewrite: RequireRewrite::rootfix(),
        }
    }

    /// Patch honoring the `root_fix` build option when set
    pub fn from_options(options: &EmitOptions) -> Result<Self, RewriteError> {
        Ok(Self {
            rewrite: RequireRewrite::from_options(options)?,
        })
    }

    /// Patch driven by an arbitrary rewrite rule
    pub fn with_rewrite(rewrite: RequireRewrite) -> Self {
        Self { rewrite }
    }

    /// The rule this patch applies
    pub fn rewrite(&self) -> &RequireRewrite {
        &self.rewrite
    }
}

impl Default for RequireRootfix {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitPatch for RequireRootfix {
    fn name(&self) -> &'static str {
        "require-rootfix"
    }

    fn description(&self) -> &'static str {
        "Path-qualifies the bundled support-library require"
    }

    fn can_handle(&self, code: &str) -> bool {
        // Quick check for the bare module name before rendering the full
        // statement; emitted files without the prologue skip the rewrite.
        code.contains(self.rewrite.source())
    }

    fn priority(&self) -> u8 {
        80 // Run before any user-declared rewrites
    }

    fn apply(&self, file: &mut PrintedFile, _ctx: &EmitContext<'_>) -> usize {
        let count = self.rewrite.occurrences(&file.code);
        if count > 0 {
            file.code = self.rewrite.apply(&file.code).into_owned();
        }
        count
    }
}

/// Factory function to create the rootfix patch for registry registration
pub fn create_rootfix_patch() -> Arc<dyn EmitPatch> {
    Arc::new(RequireRootfix::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_fixture() -> EmitOptions {
        EmitOptions::default()
    }

    #[test]
    fn patches_the_emitted_prologue() {
        let patch = RequireRootfix::new();
        let options = options_fixture();
        let ctx = EmitContext::new("main.lua", &options);
        let mut file = PrintedFile::new(
            "local ____lualib = require(\"lualib_bundle\");\nlocal x = 1\n",
        );

        assert!(patch.can_handle(&file.code));
        assert_eq!(patch.apply(&mut file, &ctx), 1);
        assert_eq!(
            file.code,
            "local ____lualib = require(\"/lualib_bundle\");\nlocal x = 1\n"
        );
    }

    #[test]
    fn skips_files_without_the_prologue() {
        let patch = RequireRootfix::new();
        let options = options_fixture();
        let ctx = EmitContext::new("util.lua", &options);
        let mut file = PrintedFile::new("local rednet = require(\"rednet\");\n");

        assert!(!patch.can_handle(&file.code));
        assert_eq!(patch.apply(&mut file, &ctx), 0);
        assert_eq!(file.code, "local rednet = require(\"rednet\");\n");
    }

    #[test]
    fn second_application_finds_nothing() {
        let patch = RequireRootfix::new();
        let options = options_fixture();
        let ctx = EmitContext::new("main.lua", &options);
        let mut file = PrintedFile::new("require(\"lualib_bundle\");\n");

        assert_eq!(patch.apply(&mut file, &ctx), 1);
        let after_first = file.code.clone();
        assert_eq!(patch.apply(&mut file, &ctx), 0);
        assert_eq!(file.code, after_first);
    }

    #[test]
    fn source_map_passes_through_untouched() {
        let patch = RequireRootfix::new();
        let options = options_fixture();
        let ctx = EmitContext::new("main.lua", &options);
        let mut file = PrintedFile::with_source_map(
            "require(\"lualib_bundle\");\n",
            "{\"version\":3}",
        );

        patch.apply(&mut file, &ctx);
        assert_eq!(file.source_map.as_deref(), Some("{\"version\":3}"));
    }

    #[test]
    fn root_fix_option_changes_the_target() {
        let options = EmitOptions {
            root_fix: Some("/rom/lualib_bundle".to_string()),
        };
        let patch = RequireRootfix::from_options(&options).unwrap();
        let ctx = EmitContext::new("main.lua", &options);
        let mut file = PrintedFile::new("require(\"lualib_bundle\");\n");

        patch.apply(&mut file, &ctx);
        assert_eq!(file.code, "require(\"/rom/lualib_bundle\");\n");
    }
}
