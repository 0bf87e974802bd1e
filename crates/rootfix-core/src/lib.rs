//! Rootfix patch engine
//!
//! A TypeScript-to-Lua pipeline emits every compiled file with a prologue
//! that loads the bundled support library by bare name:
//!
//! ```lua
//! local ____lualib = require("lualib_bundle");
//! ```
//!
//! The target runtime resolves modules from the filesystem root, so the
//! bare name never resolves once the output is installed on a machine.
//! This crate rewrites the emitted load statement to a path-qualified one
//! (`require("/lualib_bundle");`) after the printer has run, leaving every
//! other byte of the output untouched.
//!
//! ## Architecture
//!
//! ```text
//! host printer ──> PrintedFile { code, source map }
//!                     │
//!                     ▼
//!              PatchRegistry::apply_all
//!                ├─> RequireRootfix (bundle load rewrite)
//!                └─> ... further EmitPatch implementations
//!                     │
//!                     ▼
//!              patched PrintedFile, returned to the pipeline
//! ```
//!
//! Patches are synchronous and stateless: one call per emitted file, no
//! shared state, safe under concurrent per-file emission.

pub mod error;
pub mod patch;
pub mod rewrite;
pub mod rootfix;
pub mod types;

// Re-export main types for convenience
pub use error::RewriteError;
pub use patch::{EmitPatch, PatchRegistry};
pub use rewrite::{RequireRewrite, BUNDLE_MODULE, BUNDLE_ROOT_TARGET};
pub use rootfix::{create_rootfix_patch, RequireRootfix};
pub use types::{EmitContext, EmitOptions, PrintedFile};
