//! `rootfix apply` - patch emitted Lua files in place

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use rootfix_core::{EmitContext, EmitOptions, PatchRegistry, PrintedFile};

use crate::config::CliConfig;

/// Output formats for apply summaries
#[derive(Debug, Clone)]
pub enum ApplyOutputFormat {
    Table,
    Json,
}

impl From<String> for ApplyOutputFormat {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "json" => ApplyOutputFormat::Json,
            _ => ApplyOutputFormat::Table,
        }
    }
}

/// Table-friendly per-file result
#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Replacements")]
    replacements: usize,
    #[tabled(rename = "Status")]
    status: String,
}

/// JSON per-file result
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    replacements: usize,
    changed: bool,
}

/// Execute apply command
pub fn execute(
    config: CliConfig,
    paths: Vec<PathBuf>,
    check: bool,
    stdin: bool,
    format: String,
) -> Result<()> {
    let registry = config.build_registry()?;
    let options = EmitOptions::default();

    if stdin {
        if !paths.is_empty() {
            bail!("--stdin cannot be combined with input paths");
        }
        return patch_stream(&registry, &options, std::io::stdin(), std::io::stdout());
    }

    if paths.is_empty() {
        bail!("no input paths given (pass files or directories, or use --stdin)");
    }

    let files = collect_lua_files(&paths)?;
    if files.is_empty() {
        warn!("No Lua files found under the given paths");
    }

    let mut reports = Vec::new();
    for path in &files {
        let name = path.display().to_string();
        let code = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {name}"))?;

        let mut unit = PrintedFile::new(code);
        let ctx = EmitContext::new(&name, &options);
        let replacements = registry.apply_all(&mut unit, &ctx);

        if replacements > 0 && !check {
            write_atomic(path, &unit.code)?;
            info!("Patched {} ({} replacement(s))", name, replacements);
        } else {
            debug!("No changes for {}", name);
        }

        reports.push(FileReport {
            file: name,
            replacements,
            changed: replacements > 0,
        });
    }

    render_summary(&reports, check, format.into())?;

    let pending = reports.iter().filter(|r| r.changed).count();
    if check && pending > 0 {
        warn!("{} file(s) still load the bundle by bare name", pending);
        bail!("{pending} file(s) need patching");
    }
    Ok(())
}

/// Patch one emitted unit from `reader` and write the result to `writer`
///
/// Backs the `--stdin` mode; split out so tests can drive it with buffers.
pub fn patch_stream(
    registry: &PatchRegistry,
    options: &EmitOptions,
    mut reader: impl Read,
    mut writer: impl Write,
) -> Result<()> {
    let mut code = String::new();
    reader
        .read_to_string(&mut code)
        .context("failed to read input stream")?;

    let mut unit = PrintedFile::new(code);
    let ctx = EmitContext::new("<stdin>", options);
    registry.apply_all(&mut unit, &ctx);

    writer
        .write_all(unit.code.as_bytes())
        .context("failed to write patched output")?;
    Ok(())
}

/// Gather files to patch: directories are walked for .lua files,
/// explicit files are taken as-is
fn collect_lua_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("failed to walk {}", path.display()))?;
                let is_lua = entry.path().extension().map(|e| e == "lua").unwrap_or(false);
                if entry.file_type().is_file() && is_lua {
                    files.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("input path does not exist: {}", path.display());
        }
    }
    Ok(files)
}

/// Replace `path` with `code` without a window where the file is partial
fn write_atomic(path: &Path, code: &str) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(code.as_bytes())
        .with_context(|| format!("failed to write patched output for {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

fn render_summary(reports: &[FileReport], check: bool, format: ApplyOutputFormat) -> Result<()> {
    match format {
        ApplyOutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reports)?);
        }
        ApplyOutputFormat::Table => {
            let rows: Vec<FileRow> = reports
                .iter()
                .map(|r| FileRow {
                    file: r.file.clone(),
                    replacements: r.replacements,
                    status: match (r.changed, check) {
                        (true, true) => "would patch".to_string(),
                        (true, false) => "patched".to_string(),
                        (false, _) => "unchanged".to_string(),
                    },
                })
                .collect();
            if !rows.is_empty() {
                println!("{}", Table::new(rows).with(Style::modern()));
            }
        }
    }
    Ok(())
}
