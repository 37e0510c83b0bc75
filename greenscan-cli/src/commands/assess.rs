//! `greenscan assess` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use greenscan_scanner::{
    NormalizedProduct, NutritionGrade, ProviderProduct, ProviderResponse, Rating,
    SustainabilityAssessment, assess, normalize,
};

use crate::cli::AssessArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `assess` command.
///
/// The file may hold a full provider response (`{"status": 1, "product": {...}}`)
/// or a bare product record. A response without a product, or with
/// `status` 0, yields the "no data" assessment.
pub async fn execute(args: AssessArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let record = read_record(&args.file).await?;
    let report = build_report(record.as_ref(), &args.barcode);

    info!(
        file = %args.file.display(),
        score = report.assessment.score,
        rating = %report.assessment.rating,
        "product assessed"
    );

    writer.render(&report)
}

async fn read_record(path: &Path) -> Result<Option<ProviderProduct>, CliError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_record(&content)
        .map_err(|e| CliError::Command(format!("invalid product file {}: {e}", path.display())))
}

/// Parse either a provider response or a bare product record.
fn parse_record(content: &str) -> Result<Option<ProviderProduct>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let is_response = value
        .as_object()
        .is_some_and(|obj| obj.contains_key("status") || obj.contains_key("product"));

    if is_response {
        let response: ProviderResponse = serde_json::from_value(value)?;
        Ok(if response.is_match() {
            response.product
        } else {
            None
        })
    } else {
        Ok(Some(serde_json::from_value(value)?))
    }
}

fn build_report(record: Option<&ProviderProduct>, barcode: &str) -> AssessReport {
    let product = normalize(record, barcode).ok();
    let assessment = assess(product.as_ref());
    AssessReport {
        product,
        assessment,
    }
}

#[derive(Serialize)]
pub struct AssessReport {
    pub product: Option<NormalizedProduct>,
    pub assessment: SustainabilityAssessment,
}

impl Render for AssessReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if let Some(product) = &self.product {
            write_product(w, product)?;
            writeln!(w)?;
        }
        write_assessment(w, &self.assessment)
    }
}

/// Product detail block shared with `lookup`.
pub(crate) fn write_product(w: &mut dyn Write, product: &NormalizedProduct) -> std::io::Result<()> {
    use colored::Colorize;

    writeln!(w, "Product: {}", product.name.bold())?;
    writeln!(w, "  Brand:      {}", product.brand)?;
    let grade = match product.nutrition_grade {
        NutritionGrade::Unknown => "unknown".to_owned(),
        grade => grade.to_string().to_uppercase(),
    };
    writeln!(w, "  Nutri-Score: {grade}")?;
    writeln!(w, "  Packaging:  {}", product.packaging)?;
    if !product.categories.is_empty() {
        writeln!(w, "  Categories: {}", product.categories)?;
    }
    if !product.origin_country.is_empty() {
        writeln!(w, "  Origin:     {}", product.origin_country)?;
    }
    if let Some(image) = &product.image {
        writeln!(w, "  Image:      {image}")?;
    }
    writeln!(w, "  Source:     {}", product.data_source)
}

/// Sustainability block shared with `lookup`.
pub(crate) fn write_assessment(
    w: &mut dyn Write,
    assessment: &SustainabilityAssessment,
) -> std::io::Result<()> {
    use colored::Colorize;

    let score = format!("{:.1}/10", assessment.score);
    let rating = assessment.rating.to_string();
    let rating = match assessment.rating {
        Rating::Excellent => rating.green().bold(),
        Rating::Good => rating.green(),
        Rating::Average => rating.yellow(),
        Rating::Poor => rating.red(),
        Rating::Unknown => rating.dimmed(),
    };
    writeln!(w, "Sustainability: {} {}", score.bold(), rating)?;
    writeln!(w, "  {}", assessment.analysis)?;

    if assessment.rating != Rating::Unknown {
        let f = &assessment.factors;
        let flags = [
            ("organic", f.organic),
            ("fair trade", f.fair_trade),
            ("local", f.local_origin),
            ("recyclable packaging", f.recyclable_packaging),
            ("single-use plastic", f.single_use_packaging),
        ];
        let present: Vec<&str> = flags
            .iter()
            .filter(|(_, on)| *on)
            .map(|(label, _)| *label)
            .collect();
        if present.is_empty() {
            writeln!(w, "  Factors: none")?;
        } else {
            writeln!(w, "  Factors: {}", present.join(", "))?;
        }
    }
    Ok(())
}
