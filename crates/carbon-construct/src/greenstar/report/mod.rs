mod recommendations;
mod summary;
mod views;

pub use summary::{CalculationSummary, LayerScore};
pub use views::ComplianceReport;

use super::catalog::InitiativeCatalog;
use super::credits::CreditCatalog;
use super::domain::{AchievementLevel, ProjectData};
use super::evaluation::CreditEvaluator;
use super::validation::InputGuard;
use super::CalculationError;
use tracing::info;

/// Drives the credit evaluator across a project and folds the results.
///
/// Holds only read-only reference data, so one instance can be shared across
/// requests and every call is a pure function of its `ProjectData`.
#[derive(Debug, Clone)]
pub struct ComplianceCalculator {
    initiatives: InitiativeCatalog,
    credits: CreditCatalog,
    guard: InputGuard,
}

impl ComplianceCalculator {
    pub fn new(initiatives: InitiativeCatalog, credits: CreditCatalog) -> Self {
        Self {
            initiatives,
            credits,
            guard: InputGuard::default(),
        }
    }

    pub fn standard() -> Self {
        Self::new(InitiativeCatalog::standard(), CreditCatalog::standard())
    }

    pub fn with_guard(mut self, guard: InputGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn initiatives(&self) -> &InitiativeCatalog {
        &self.initiatives
    }

    pub fn credits(&self) -> &CreditCatalog {
        &self.credits
    }

    pub fn evaluator(&self, project: &ProjectData) -> CreditEvaluator<'_> {
        CreditEvaluator::new(&self.initiatives, &self.credits, project.submission_date)
    }

    pub fn calculate_project_compliance(
        &self,
        project: &ProjectData,
    ) -> Result<CalculationSummary, CalculationError> {
        self.guard.validate(project)?;
        self.credits
            .validate_for(project.building_layer_costs.keys().copied())?;

        let evaluator = self.evaluator(project);
        let mut total_compliance =
            Vec::with_capacity(project.building_layer_costs.len() * self.credits.credits().len());

        // BTreeMap iteration follows the layer declaration order.
        for (layer, layer_cost) in &project.building_layer_costs {
            for definition in self.credits.credits() {
                total_compliance.push(evaluator.evaluate_credit(
                    *layer,
                    definition.credit_type,
                    &project.products,
                    *layer_cost,
                )?);
            }
        }

        let achieved_credits = total_compliance
            .iter()
            .filter(|result| result.achieved)
            .count();
        let points_awarded: u32 = total_compliance
            .iter()
            .map(|result| result.points_awarded)
            .sum();
        let points_available: u32 = total_compliance
            .iter()
            .map(|result| result.points_available)
            .sum();

        let overall_score = summary::overall_score(&total_compliance, project.total_project_cost);
        let achievement_level = AchievementLevel::from_score(overall_score);
        let layer_scores = summary::layer_scores(&total_compliance);
        let recommendations =
            recommendations::generate_recommendations(project, &total_compliance);

        info!(
            project_id = %project.project_id,
            overall_score,
            achieved_credits,
            total_possible_credits = total_compliance.len(),
            "project compliance calculated"
        );

        Ok(CalculationSummary {
            overall_score,
            achievement_level,
            achieved_credits,
            total_possible_credits: total_compliance.len(),
            points_awarded,
            points_available,
            evaluated_on: evaluator.evaluated_on(),
            total_compliance,
            layer_scores,
            recommendations,
        })
    }
}
