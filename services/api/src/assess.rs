use carbon_construct::config::AppConfig;
use carbon_construct::error::AppError;
use carbon_construct::greenstar::{
    format_currency, format_percentage, ComplianceReport, ProjectData,
};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Project JSON document to score
    #[arg(long)]
    pub(crate) project: PathBuf,
    /// Initiative catalog CSV (defaults to GREENSTAR_INITIATIVES_CSV or the built-in catalog)
    #[arg(long)]
    pub(crate) initiatives: Option<PathBuf>,
    /// Print the full report as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        project,
        initiatives,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if initiatives.is_some() {
        config.greenstar.initiatives_csv = initiatives;
    }
    let calculator = config.greenstar.build_calculator()?;

    let raw = fs::read_to_string(&project)?;
    let project: ProjectData = serde_json::from_str(&raw)?;
    debug!(project_id = %project.project_id, products = project.products.len(), "project loaded");

    let summary = calculator.calculate_project_compliance(&project)?;
    let report = ComplianceReport::new(&project, summary);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report_lines(&report) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Text rendering shared by `greenstar assess` and the demo.
pub(crate) fn report_lines(report: &ComplianceReport) -> Vec<String> {
    let summary = &report.summary;
    let mut lines = vec![
        format!(
            "Green Star Responsible Products: {} ({})",
            report.project_name, report.project_id
        ),
        format!("Evaluated on {}", summary.evaluated_on),
        format!(
            "Overall score {} | {} | band {}",
            report.overall_score_label, report.achievement_label, report.band_label
        ),
        format!(
            "Credits achieved {} of {} | points {} of {}",
            summary.achieved_credits,
            summary.total_possible_credits,
            summary.points_awarded,
            summary.points_available
        ),
    ];

    if !summary.layer_scores.is_empty() {
        lines.push("Layer scores:".to_string());
        for entry in &summary.layer_scores {
            lines.push(format!(
                "  - {} (weight {}): {} | {} of {} points",
                entry.layer_label,
                format_percentage(entry.weight),
                format_percentage(entry.score),
                entry.points_awarded,
                entry.points_available
            ));
        }
    }

    if !summary.total_compliance.is_empty() {
        lines.push("Credit results:".to_string());
        for result in &summary.total_compliance {
            let outcome = if result.achieved {
                format!("achieved, {} points", result.points_awarded)
            } else {
                "not achieved".to_string()
            };
            lines.push(format!(
                "  - {} / {}: {} of {} certified (target {}) -> {}",
                result.building_layer,
                result.credit_type,
                format_percentage(result.percentage),
                format_currency(result.total_cost),
                format_percentage(result.required_percentage),
                outcome
            ));
        }
    }

    if !summary.recommendations.is_empty() {
        lines.push("Recommendations:".to_string());
        for recommendation in &summary.recommendations {
            lines.push(format!("  - {recommendation}"));
        }
    }

    lines
}
