//! Emitted-unit record and emit context
//!
//! `PrintedFile` mirrors what the host printer hands back for one compiled
//! source file. The patch engine borrows it for the duration of a single
//! call, rewrites `code` in place, and never keeps a reference afterwards.

use serde::{Deserialize, Serialize};

/// Output record for a single emitted file
///
/// `source_map` is owned entirely by the host printer and passes through
/// the patch engine untouched; literal replacement of a fixed-length
/// statement keeps the map's positions valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedFile {
    /// Rendered Lua source text
    pub code: String,
    /// Source-map payload from the printer, if one was produced
    pub source_map: Option<String>,
}

impl PrintedFile {
    /// Wrap rendered output without a source map
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            source_map: None,
        }
    }

    /// Wrap rendered output together with its source map
    pub fn with_source_map(code: impl Into<String>, source_map: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            source_map: Some(source_map.into()),
        }
    }
}

/// Per-build options the emit pipeline is invoked with
///
/// The lone option mirrors the host compiler's option surface: when
/// `root_fix` is set, the bundled support library is loaded from that
/// module path instead of the default `/lualib_bundle`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Override for the module path the bundle should resolve from
    #[serde(default)]
    pub root_fix: Option<String>,
}

/// Per-file context handed to each patch
///
/// Read-only. Patches use it for logging and option lookup; the match
/// decision itself works on the emitted text alone.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Name of the file being emitted
    pub file_name: &'a str,
    /// Options for the current build
    pub options: &'a EmitOptions,
}

impl<'a> EmitContext<'a> {
    /// Create a context for one emitted file
    pub fn new(file_name: &'a str, options: &'a EmitOptions) -> Self {
        Self { file_name, options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_file_without_map() {
        let file = PrintedFile::new("return 1\n");
        assert_eq!(file.code, "return 1\n");
        assert!(file.source_map.is_none());
    }

    #[test]
    fn printed_file_keeps_map_payload() {
        let file = PrintedFile::with_source_map("return 1\n", "{\"mappings\":\"AAAA\"}");
        assert_eq!(file.source_map.as_deref(), Some("{\"mappings\":\"AAAA\"}"));
    }

    #[test]
    fn emit_options_default_has_no_override() {
        assert_eq!(EmitOptions::default().root_fix, None);
    }
}
