use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use rootfix_core::{PatchRegistry, RequireRewrite, RequireRootfix, BUNDLE_MODULE, BUNDLE_ROOT_TARGET};

/// One extra require rewrite declared in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Module name the emitted output loads
    pub from: String,
    /// Module path it should load instead
    pub to: String,
}

/// `[patch]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Module name the host printer emits for the bundled library
    #[serde(default = "default_module")]
    pub module: String,

    /// Module path the bundle should load from instead
    #[serde(default = "default_target")]
    pub target: String,

    /// Additional require rewrites applied after the bundle rule
    #[serde(default)]
    pub rules: Vec<RewriteRule>,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            module: default_module(),
            target: default_target(),
            rules: Vec::new(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Rewrite configuration
    #[serde(default)]
    pub patch: PatchConfig,
}

fn default_module() -> String {
    BUNDLE_MODULE.to_string()
}

fn default_target() -> String {
    BUNDLE_ROOT_TARGET.to_string()
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rootfix").join("config.toml"))
}

impl CliConfig {
    /// Load configuration with CLI overrides
    ///
    /// A missing file yields the defaults; a present but invalid file is an
    /// error. `root_override` comes from `--root` and wins over the file.
    pub fn load(path: Option<PathBuf>, root_override: Option<String>) -> Result<Self> {
        let path = path.or_else(default_config_path);
        let mut config = match path {
            Some(ref p) if p.exists() => {
                debug!("Loading config from {}", p.display());
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config file {}", p.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", p.display()))?
            }
            _ => CliConfig::default(),
        };

        if let Some(root) = root_override {
            config.patch.target = root;
        }

        Ok(config)
    }

    /// Build the validated rewrite rules this config declares
    ///
    /// The bundle rule always comes first, followed by `[[patch.rules]]`
    /// entries in declaration order.
    pub fn rewrites(&self) -> Result<Vec<RequireRewrite>> {
        let mut rewrites =
            vec![
                RequireRewrite::new(self.patch.module.as_str(), self.patch.target.as_str())
                    .context("invalid [patch] module/target")?,
            ];
        for rule in &self.patch.rules {
            rewrites.push(
                RequireRewrite::new(rule.from.as_str(), rule.to.as_str()).with_context(|| {
                    format!("invalid rewrite rule {:?} -> {:?}", rule.from, rule.to)
                })?,
            );
        }
        Ok(rewrites)
    }

    /// Assemble the patch registry for this config
    pub fn build_registry(&self) -> Result<PatchRegistry> {
        let mut registry = PatchRegistry::new();
        for rewrite in self.rewrites()? {
            registry.register(Arc::new(RequireRootfix::with_rewrite(rewrite)));
        }
        Ok(registry)
    }
}
