//! Green Star Responsible Products compliance calculator.
//!
//! Products carry certifications issued under recognised initiatives. For each
//! building layer the evaluator works out which share of the allocated cost is
//! backed by a qualifying certification, compares it to the credit thresholds,
//! and the calculator folds every layer/credit result into one summary.

pub mod catalog;
pub mod credits;
pub mod domain;
pub mod evaluation;
pub mod format;
pub mod report;
pub mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogImportError, InitiativeCatalog};
pub use credits::{CatalogGap, CreditCatalog, CreditDefinition, CreditThreshold};
pub use domain::{
    AchievementLevel, BuildingLayer, CategoryType, Certification, CreditType, Initiative,
    InitiativeId, Product, ProductId, ProjectData, ProjectId, ResponsibleProductValue,
    VerificationStatus,
};
pub use evaluation::{ComplianceResult, CreditEvaluator};
pub use format::{format_currency, format_percentage, weighted_layer_score, ComplianceBand};
pub use report::{CalculationSummary, ComplianceCalculator, ComplianceReport, LayerScore};
pub use router::compliance_router;
pub use validation::{InputGuard, InputViolation};

/// Error raised by a compliance calculation. Either variant aborts the whole call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("compliance catalog incomplete: {0}")]
    Configuration(#[from] CatalogGap),
    #[error("invalid project data: {0}")]
    InvalidInput(#[from] InputViolation),
}
