//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Greenscan -- barcode scanning with product sustainability scoring.
///
/// Use `greenscan <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "greenscan", version, about, long_about = None)]
pub struct Cli {
    /// Path to the greenscan.toml configuration file.
    #[arg(short, long, default_value = "greenscan.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a scanned code without any network lookup.
    Classify(ClassifyArgs),

    /// Scan a code: classify, look up the product, score it and record history.
    Lookup(LookupArgs),

    /// Score a product record stored in a JSON file.
    Assess(AssessArgs),

    /// Inspect or clear the scan history.
    History(HistoryArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- classify ----

/// Classify a decoded code.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Decoded barcode or QR payload.
    pub code: String,

    /// Reader format that produced the code (e.g. ean_reader, qr_code_reader).
    #[arg(long, default_value = "manual")]
    pub format: String,
}

// ---- lookup ----

/// Look up a code against the configured mirrors.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Decoded barcode or QR payload.
    pub code: String,

    /// Reader format that produced the code.
    #[arg(long, default_value = "manual")]
    pub format: String,

    /// Do not record the scan in history.
    #[arg(long)]
    pub no_history: bool,
}

// ---- assess ----

/// Score a provider product record read from disk.
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// JSON file holding either a full provider response or a bare product record.
    pub file: PathBuf,

    /// Barcode to attach to the normalized product.
    #[arg(long, default_value = "")]
    pub barcode: String,
}

// ---- history ----

/// Scan history management.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List recorded scans, newest first.
    List {
        /// Show at most this many entries.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show a single history entry.
    Show {
        /// Entry ID (UUID).
        id: String,
    },
    /// Delete every recorded scan.
    Clear,
}

// ---- config ----

/// Manage greenscan configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, lookup, history).
        #[arg(long)]
        section: Option<String>,
    },
}
