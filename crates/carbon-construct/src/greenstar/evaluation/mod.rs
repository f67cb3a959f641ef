mod rules;

use super::catalog::InitiativeCatalog;
use super::credits::CreditCatalog;
use super::domain::{BuildingLayer, CreditType, Product};
use super::CalculationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(test)]
pub(crate) use rules::{certification_standing, CertificationStanding};

/// Outcome of one credit in one building layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub building_layer: BuildingLayer,
    pub credit_type: CreditType,
    pub percentage: f64,
    pub achieved: bool,
    pub points_awarded: u32,
    pub compliant_cost: f64,
    pub total_cost: f64,
    pub required_percentage: f64,
    pub points_available: u32,
}

impl ComplianceResult {
    /// Distance to the threshold, zero once achieved.
    pub fn shortfall(&self) -> f64 {
        (self.required_percentage - self.percentage).max(0.0)
    }
}

/// Stateless evaluator over read-only initiative and credit catalogs.
#[derive(Debug, Clone, Copy)]
pub struct CreditEvaluator<'a> {
    initiatives: &'a InitiativeCatalog,
    credits: &'a CreditCatalog,
    evaluated_on: NaiveDate,
}

impl<'a> CreditEvaluator<'a> {
    pub fn new(
        initiatives: &'a InitiativeCatalog,
        credits: &'a CreditCatalog,
        evaluated_on: NaiveDate,
    ) -> Self {
        Self {
            initiatives,
            credits,
            evaluated_on,
        }
    }

    pub fn evaluated_on(&self) -> NaiveDate {
        self.evaluated_on
    }

    pub fn evaluate_credit(
        &self,
        layer: BuildingLayer,
        credit_type: CreditType,
        products: &[Product],
        layer_cost: f64,
    ) -> Result<ComplianceResult, CalculationError> {
        let definition = self.credits.definition(credit_type)?;
        let threshold = *self.credits.threshold(layer, credit_type)?;

        let compliant_cost: f64 = products
            .iter()
            .filter(|product| product.applies_to(layer))
            .filter(|product| {
                rules::product_qualifies(product, definition, self.initiatives, self.evaluated_on)
            })
            .map(|product| product.cost)
            // unvalidated callers can pass NaN or negative costs; they never count as compliant
            .filter(|cost| cost.is_finite() && *cost >= 0.0)
            .sum();

        let total_cost = layer_cost.max(0.0);
        let percentage = if total_cost > 0.0 {
            (compliant_cost / total_cost).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let achieved = percentage >= threshold.min_percentage;
        let points_awarded = if achieved { threshold.points } else { 0 };

        debug!(
            layer = layer.label(),
            credit = credit_type.label(),
            percentage,
            achieved,
            "credit evaluated"
        );

        Ok(ComplianceResult {
            building_layer: layer,
            credit_type,
            percentage,
            achieved,
            points_awarded,
            compliant_cost,
            total_cost,
            required_percentage: threshold.min_percentage,
            points_available: threshold.points,
        })
    }
}
