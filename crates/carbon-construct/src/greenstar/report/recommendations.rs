use super::super::domain::ProjectData;
use super::super::evaluation::ComplianceResult;
use super::super::format::{format_currency, format_percentage};

pub(crate) fn generate_recommendations(
    project: &ProjectData,
    results: &[ComplianceResult],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if project.products.is_empty() {
        recommendations.push(
            "Add products with verified Responsible Products certifications to start earning credits"
                .to_string(),
        );
    }

    if project.building_layer_costs.is_empty() {
        recommendations.push(
            "Allocate project cost to the Structure, Envelope, Systems and Finishes layers"
                .to_string(),
        );
    }

    let mut gaps: Vec<&ComplianceResult> =
        results.iter().filter(|result| !result.achieved).collect();
    gaps.sort_by(|a, b| b.shortfall().total_cmp(&a.shortfall()));

    recommendations.extend(gaps.into_iter().map(describe_gap));
    recommendations
}

fn describe_gap(result: &ComplianceResult) -> String {
    let layer = result.building_layer.label();
    let credit = result.credit_type.label();

    if result.total_cost <= 0.0 {
        return format!(
            "{layer} layer, {credit}: no cost is allocated to this layer; allocate cost and certified products to reach {}",
            format_percentage(result.required_percentage)
        );
    }

    let additional = result.shortfall() * result.total_cost;
    format!(
        "{layer} layer, {credit}: {} certified against a {} target; add about {} of qualifying certified products ({} points available)",
        format_percentage(result.percentage),
        format_percentage(result.required_percentage),
        format_currency(additional),
        result.points_available
    )
}
