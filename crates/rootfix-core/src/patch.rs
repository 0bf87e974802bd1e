//! Emission hook seam
//!
//! The host compiler exposes a pluggable printer stage: once per compiled
//! file it hands the fully rendered output to whatever hooks are
//! registered and takes back the (possibly rewritten) result. `EmitPatch`
//! is that contract on the Rust side; `PatchRegistry` holds the registered
//! hooks and runs them in priority order.

use std::sync::Arc;

use tracing::debug;

use crate::types::{EmitContext, PrintedFile};

/// A patch applied to each printed file before it re-enters the pipeline
///
/// Implementations must be stateless and synchronous: the host may emit
/// files concurrently, and a patch is invoked once per file with no shared
/// mutable state between calls.
pub trait EmitPatch: Send + Sync {
    /// Unique name of this patch
    fn name(&self) -> &'static str;

    /// Human-readable description of what the patch rewrites
    fn description(&self) -> &'static str;

    /// Cheap pre-check before the full rewrite
    fn can_handle(&self, code: &str) -> bool;

    /// Higher priority runs earlier
    fn priority(&self) -> u8 {
        50
    }

    /// Rewrite the file in place, returning the number of replacements made
    fn apply(&self, file: &mut PrintedFile, ctx: &EmitContext<'_>) -> usize;
}

/// Ordered collection of emit patches
pub struct PatchRegistry {
    patches: Vec<Arc<dyn EmitPatch>>,
}

impl PatchRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            patches: Vec::new(),
        }
    }

    /// Register a patch, keeping the collection sorted by priority
    ///
    /// Registration order breaks ties (the sort is stable).
    pub fn register(&mut self, patch: Arc<dyn EmitPatch>) {
        self.patches.push(patch);
        self.patches.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Number of registered patches
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Run every applicable patch over one emitted file
    ///
    /// Returns the total number of replacements across all patches. A file
    /// no patch matches passes through untouched.
    pub fn apply_all(&self, file: &mut PrintedFile, ctx: &EmitContext<'_>) -> usize {
        let mut total = 0;
        for patch in &self.patches {
            if !patch.can_handle(&file.code) {
                continue;
            }
            let count = patch.apply(file, ctx);
            if count > 0 {
                debug!(
                    "{}: {} replacement(s) in {}",
                    patch.name(),
                    count,
                    ctx.file_name
                );
            }
            total += count;
        }
        total
    }
}

impl Default for PatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmitOptions;

    struct MarkerPatch {
        needle: &'static str,
        replacement: &'static str,
        priority: u8,
    }

    impl EmitPatch for MarkerPatch {
        fn name(&self) -> &'static str {
            "marker"
        }

        fn description(&self) -> &'static str {
            "test patch"
        }

        fn can_handle(&self, code: &str) -> bool {
            code.contains(self.needle)
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn apply(&self, file: &mut PrintedFile, _ctx: &EmitContext<'_>) -> usize {
            let count = file.code.matches(self.needle).count();
            file.code = file.code.replace(self.needle, self.replacement);
            count
        }
    }

    #[test]
    fn empty_registry_is_a_no_op() {
        let registry = PatchRegistry::new();
        let mut file = PrintedFile::new("print(1)\n");
        let options = EmitOptions::default();
        let ctx = EmitContext::new("a.lua", &options);
        assert_eq!(registry.apply_all(&mut file, &ctx), 0);
        assert_eq!(file.code, "print(1)\n");
    }

    #[test]
    fn patches_run_in_priority_order() {
        let mut registry = PatchRegistry::new();
        // Low priority registered first, high priority must still win
        registry.register(Arc::new(MarkerPatch {
            needle: "B",
            replacement: "C",
            priority: 10,
        }));
        registry.register(Arc::new(MarkerPatch {
            needle: "A",
            replacement: "B",
            priority: 90,
        }));

        let mut file = PrintedFile::new("A");
        let options = EmitOptions::default();
        let ctx = EmitContext::new("a.lua", &options);
        let total = registry.apply_all(&mut file, &ctx);
        // A -> B (priority 90), then B -> C (priority 10)
        assert_eq!(file.code, "C");
        assert_eq!(total, 2);
    }

    #[test]
    fn can_handle_gates_application() {
        let mut registry = PatchRegistry::new();
        registry.register(Arc::new(MarkerPatch {
            needle: "absent",
            replacement: "x",
            priority: 50,
        }));
        let mut file = PrintedFile::new("print(1)\n");
        let options = EmitOptions::default();
        let ctx = EmitContext::new("a.lua", &options);
        assert_eq!(registry.apply_all(&mut file, &ctx), 0);
    }
}
