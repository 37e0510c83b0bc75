//! `greenscan lookup` command handler

use std::io::Write;
use std::path::Path;

use tracing::info;

use greenscan_core::event::ScanEvent;
use greenscan_scanner::{
    HistoryStore, KeyValueStore, LookupOrchestrator, LookupStatus, MemoryKeyValueStore,
    MirrorClient, ProductSource, ScanReport, ScanSession,
};

use crate::cli::LookupArgs;
use crate::commands::assess::{write_assessment, write_product};
use crate::commands::classify::{write_action, write_classification};
use crate::commands::{load_scanner_config, open_file_history};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `lookup` command.
///
/// Runs one scan through a [`ScanSession`]. The report is rendered even when
/// no mirror knows the product; the command then exits with the not-found code.
pub async fn execute(
    args: LookupArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = load_scanner_config(config_path).await?;
    let orchestrator = LookupOrchestrator::new(MirrorClient::from_config(&config)?)?;
    let event = ScanEvent::new(args.code, args.format);

    info!(
        code = %event.code,
        mirrors = ?orchestrator.source_names(),
        "starting lookup"
    );

    let report = if config.history_enabled && !args.no_history {
        let history = open_file_history(&config).await?;
        scan_once(orchestrator, history, event).await?
    } else {
        let history = HistoryStore::open(MemoryKeyValueStore::new(), config.history_capacity).await?;
        scan_once(orchestrator, history, event).await?
    };

    writer.render(&report)?;

    if let LookupStatus::NotFound { mirrors_tried } = report.lookup {
        return Err(CliError::NotFound(format!(
            "product {} not found in database ({} mirrors tried)",
            report.scan.classification.code, mirrors_tried
        )));
    }

    Ok(())
}

async fn scan_once<S: ProductSource, K: KeyValueStore>(
    orchestrator: LookupOrchestrator<S>,
    history: HistoryStore<K>,
    event: ScanEvent,
) -> Result<ScanReport, CliError> {
    let mut session = ScanSession::new(orchestrator, history);
    Ok(session.process(event).await?)
}

impl Render for ScanReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        write_classification(w, &self.scan)?;
        match &self.lookup {
            LookupStatus::Found { source } => writeln!(w, "Lookup: found via {source}")?,
            LookupStatus::NotFound { mirrors_tried } => writeln!(
                w,
                "Lookup: {} ({mirrors_tried} mirrors tried)",
                "product not found in database".red()
            )?,
            LookupStatus::Skipped => writeln!(w, "Lookup: skipped")?,
        }
        write_action(w, self.action.as_ref())?;

        if let Some(product) = &self.product {
            writeln!(w)?;
            write_product(w, product)?;
        }
        if let Some(assessment) = &self.assessment {
            writeln!(w)?;
            write_assessment(w, assessment)?;
        }
        writeln!(w)?;
        writeln!(w, "History entry: {}", self.entry_id.to_string().dimmed())
    }
}
