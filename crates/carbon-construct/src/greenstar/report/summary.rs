use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{AchievementLevel, BuildingLayer};
use super::super::evaluation::ComplianceResult;
use super::super::format::weighted_layer_score;

/// Project-level outcome of a compliance calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSummary {
    pub overall_score: f64,
    pub achievement_level: AchievementLevel,
    pub achieved_credits: usize,
    pub total_possible_credits: usize,
    pub points_awarded: u32,
    pub points_available: u32,
    pub evaluated_on: NaiveDate,
    pub total_compliance: Vec<ComplianceResult>,
    pub layer_scores: Vec<LayerScore>,
    pub recommendations: Vec<String>,
}

impl CalculationSummary {
    pub fn results_for(&self, layer: BuildingLayer) -> impl Iterator<Item = &ComplianceResult> {
        self.total_compliance
            .iter()
            .filter(move |result| result.building_layer == layer)
    }

    /// Layer scores folded with the fixed layer weights.
    pub fn weighted_layer_score(&self) -> f64 {
        let scores: BTreeMap<BuildingLayer, f64> = self
            .layer_scores
            .iter()
            .map(|entry| (entry.layer, entry.score))
            .collect();
        weighted_layer_score(&scores)
    }
}

/// Points-weighted compliance for one building layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerScore {
    pub layer: BuildingLayer,
    pub layer_label: String,
    pub weight: f64,
    pub score: f64,
    pub points_awarded: u32,
    pub points_available: u32,
}

pub(crate) fn layer_scores(results: &[ComplianceResult]) -> Vec<LayerScore> {
    BuildingLayer::ordered()
        .into_iter()
        .filter_map(|layer| {
            let mut evaluated = results
                .iter()
                .filter(|result| result.building_layer == layer)
                .peekable();
            evaluated.peek()?;

            let (weighted, points_available, points_awarded) =
                evaluated.fold((0.0, 0u32, 0u32), |(weighted, available, awarded), result| {
                    (
                        weighted + result.percentage * f64::from(result.points_available),
                        available + result.points_available,
                        awarded + result.points_awarded,
                    )
                });

            let score = if points_available > 0 {
                weighted / f64::from(points_available)
            } else {
                0.0
            };

            Some(LayerScore {
                layer,
                layer_label: layer.label().to_string(),
                weight: layer.weight(),
                score,
                points_awarded,
                points_available,
            })
        })
        .collect()
}

/// `Σ(percentage × layer weight × points) / Σ(layer weight × points)`.
pub(crate) fn overall_score(results: &[ComplianceResult], total_project_cost: f64) -> f64 {
    if total_project_cost <= 0.0 {
        return 0.0;
    }

    let (numerator, denominator) =
        results
            .iter()
            .fold((0.0, 0.0), |(numerator, denominator), result| {
                let weight = result.building_layer.weight() * f64::from(result.points_available);
                (numerator + result.percentage * weight, denominator + weight)
            });

    if denominator > 0.0 {
        (numerator / denominator).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
