//! `greenscan classify` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use greenscan_core::event::ScanEvent;
use greenscan_scanner::{ClassifiedCode, ClassifiedScan, OutboundAction, classify};

use crate::cli::ClassifyArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `classify` command.
///
/// Pure local classification: no network, no history.
pub fn execute(args: ClassifyArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let report = build_report(ScanEvent::new(args.code, args.format));
    info!(
        code = %report.scan.classification.code,
        content_type = %report.scan.classification.content_type,
        "code classified"
    );
    writer.render(&report)
}

fn build_report(event: ScanEvent) -> ClassifyReport {
    let classification = classify(&event.code);
    let action = classification.action();
    ClassifyReport {
        scan: ClassifiedScan {
            event,
            classification,
        },
        action,
    }
}

#[derive(Serialize)]
pub struct ClassifyReport {
    #[serde(flatten)]
    pub scan: ClassifiedScan,
    pub action: Option<OutboundAction>,
}

impl Render for ClassifyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        write_classification(w, &self.scan)?;
        write_action(w, self.action.as_ref())
    }
}

/// Shared "Code / Format / Type" block used by classify and lookup output.
pub(crate) fn write_classification(w: &mut dyn Write, scan: &ClassifiedScan) -> std::io::Result<()> {
    use colored::Colorize;

    let ClassifiedCode {
        code,
        is_valid,
        code_type,
        content_type,
    } = &scan.classification;

    writeln!(w, "Code: {}", code.bold())?;
    writeln!(w, "Format: {}", scan.event.format_label())?;
    let validity = if *is_valid {
        "valid product barcode".green()
    } else {
        "not a product barcode".dimmed()
    };
    writeln!(w, "Type: {code_type} / {content_type} ({validity})")
}

pub(crate) fn write_action(w: &mut dyn Write, action: Option<&OutboundAction>) -> std::io::Result<()> {
    match action {
        Some(OutboundAction::OpenUrl(target)) => writeln!(w, "Action: open {target}"),
        Some(OutboundAction::Mail(target)) => writeln!(w, "Action: mail {target}"),
        Some(OutboundAction::Call(target)) => writeln!(w, "Action: call {target}"),
        None => Ok(()),
    }
}
