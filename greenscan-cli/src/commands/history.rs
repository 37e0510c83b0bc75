//! `greenscan history` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use greenscan_scanner::{FileKeyValueStore, HistoryEntry, HistoryStore, Rating};

use crate::cli::{HistoryAction, HistoryArgs};
use crate::commands::assess::{write_assessment, write_product};
use crate::commands::classify::write_classification;
use crate::commands::{load_scanner_config, open_file_history};
use crate::error::CliError;
use crate::output::{OutputWriter, Render, truncate};

/// Execute the `history` command.
pub async fn execute(
    args: HistoryArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = load_scanner_config(config_path).await?;
    let mut history = open_file_history(&config).await?;

    match args.action {
        HistoryAction::List { limit } => {
            writer.render(&build_list(&history, limit, &config.history_path))
        }
        HistoryAction::Show { id } => {
            let entry = find_entry(&history, &id)?;
            writer.render(&HistoryEntryView(entry))
        }
        HistoryAction::Clear => {
            let cleared = history.len();
            history.clear().await?;
            info!(cleared, path = %config.history_path.display(), "history cleared");
            writer.render(&HistoryClearReport { cleared })
        }
    }
}

fn build_list(
    history: &HistoryStore<FileKeyValueStore>,
    limit: Option<usize>,
    path: &Path,
) -> HistoryListReport {
    let limit = limit.unwrap_or(usize::MAX);
    HistoryListReport {
        source: path.display().to_string(),
        total: history.len(),
        capacity: history.capacity(),
        entries: history.entries().iter().take(limit).cloned().collect(),
    }
}

fn find_entry<'a>(
    history: &'a HistoryStore<FileKeyValueStore>,
    id: &str,
) -> Result<&'a HistoryEntry, CliError> {
    let id = Uuid::parse_str(id)
        .map_err(|e| CliError::Command(format!("invalid history id '{id}': {e}")))?;
    history
        .get(id)
        .ok_or_else(|| CliError::NotFound(format!("history entry {id}")))
}

#[derive(Serialize)]
pub struct HistoryListReport {
    pub source: String,
    pub total: usize,
    pub capacity: usize,
    pub entries: Vec<HistoryEntry>,
}

impl Render for HistoryListReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Scan history: {} ({}/{})",
            self.source.bold(),
            self.total,
            self.capacity
        )?;
        writeln!(w)?;

        if self.entries.is_empty() {
            writeln!(w, "{}", "No scans recorded.".dimmed())?;
            return Ok(());
        }

        writeln!(
            w,
            "{:<36} {:<20} {:<16} {:<28} {:<9} Rating",
            "ID", "Scanned", "Code", "Product", "Score"
        )?;
        writeln!(w, "{}", "-".repeat(120))?;

        for entry in &self.entries {
            let product = entry
                .product
                .as_ref()
                .map(|p| truncate(&p.name, 28))
                .unwrap_or_else(|| "-".to_owned());
            let (score, rating) = match &entry.assessment {
                Some(a) => (format!("{:.1}", a.score), a.rating),
                None => ("-".to_owned(), Rating::Unknown),
            };
            writeln!(
                w,
                "{:<36} {:<20} {:<16} {:<28} {:<9} {}",
                entry.id,
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                truncate(&entry.scan.classification.code, 16),
                product,
                score,
                rating
            )?;
        }

        Ok(())
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct HistoryEntryView<'a>(&'a HistoryEntry);

impl Render for HistoryEntryView<'_> {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let entry = self.0;
        writeln!(w, "Entry: {}", entry.id)?;
        writeln!(w, "Scanned: {}", entry.timestamp.to_rfc3339())?;
        write_classification(w, &entry.scan)?;
        if let Some(product) = &entry.product {
            writeln!(w)?;
            write_product(w, product)?;
        }
        if let Some(assessment) = &entry.assessment {
            writeln!(w)?;
            write_assessment(w, assessment)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct HistoryClearReport {
    pub cleared: usize,
}

impl Render for HistoryClearReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Cleared {} history entries.", self.cleared)
    }
}
