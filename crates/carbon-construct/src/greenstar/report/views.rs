use serde::Serialize;

use super::super::domain::{ProjectData, ProjectId};
use super::super::format::{format_percentage, ComplianceBand};
use super::CalculationSummary;

/// Presentation payload shared by the HTTP endpoint and the CLI `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub project_id: ProjectId,
    pub project_name: String,
    pub overall_score_label: String,
    pub achievement_label: &'static str,
    pub band: ComplianceBand,
    pub band_label: &'static str,
    pub band_color: &'static str,
    pub summary: CalculationSummary,
}

impl ComplianceReport {
    pub fn new(project: &ProjectData, summary: CalculationSummary) -> Self {
        let band = ComplianceBand::for_ratio(summary.overall_score);
        Self {
            project_id: project.project_id.clone(),
            project_name: project.project_name.clone(),
            overall_score_label: format_percentage(summary.overall_score),
            achievement_label: summary.achievement_level.label(),
            band,
            band_label: band.label(),
            band_color: band.color(),
            summary,
        }
    }
}
