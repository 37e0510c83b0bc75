//! Command handlers -- one module per subcommand

pub mod assess;
pub mod classify;
pub mod config;
pub mod history;
pub mod lookup;

use std::path::Path;

use greenscan_core::config::GreenscanConfig;
use greenscan_scanner::{FileKeyValueStore, HistoryStore, ScannerConfig};

use crate::cli::Commands;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Route a parsed subcommand to its handler.
pub async fn dispatch(
    command: Commands,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match command {
        Commands::Classify(args) => classify::execute(args, writer),
        Commands::Lookup(args) => lookup::execute(args, config_path, writer).await,
        Commands::Assess(args) => assess::execute(args, writer).await,
        Commands::History(args) => history::execute(args, config_path, writer).await,
        Commands::Config(args) => config::execute(args, config_path, writer).await,
    }
}

/// Load the effective scanner configuration.
///
/// A missing config file is not an error: defaults plus environment
/// overrides apply.
pub(crate) async fn load_scanner_config(config_path: &Path) -> Result<ScannerConfig, CliError> {
    let core = GreenscanConfig::load_or_default(config_path).await?;
    let config = ScannerConfig::from_core(&core);
    config.validate()?;
    Ok(config)
}

/// Open the file-backed history named by `config`.
pub(crate) async fn open_file_history(
    config: &ScannerConfig,
) -> Result<HistoryStore<FileKeyValueStore>, CliError> {
    let store = FileKeyValueStore::new(config.history_path.clone());
    Ok(HistoryStore::open(store, config.history_capacity).await?)
}
