use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "rootfix")]
#[command(about = "rootfix - patch transpiled Lua so bundled modules load from the filesystem root")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/rootfix/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Set output format (table, json)
    #[arg(short = 'f', long, global = true, default_value = "table")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Patch emitted Lua files in place
    Apply {
        /// Files to patch, or directories to walk for .lua files
        paths: Vec<PathBuf>,

        /// Report files that would change without writing them,
        /// exit non-zero if any
        #[arg(long)]
        check: bool,

        /// Read one emitted unit from stdin, write patched text to stdout
        #[arg(long)]
        stdin: bool,

        /// Module path the bundled library should load from
        /// (overrides config, e.g. /lib/lualib_bundle)
        #[arg(long, value_name = "PATH")]
        root: Option<String>,
    },

    /// Show the effective rewrite rules
    Rules,
}
