use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{BuildingLayer, CategoryType, CreditType};

/// Minimum compliant-cost share needed to achieve a credit, and its reward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditThreshold {
    pub min_percentage: f64,
    pub points: u32,
}

impl CreditThreshold {
    pub const fn new(min_percentage: f64, points: u32) -> Self {
        Self {
            min_percentage,
            points,
        }
    }
}

/// Qualification rules shared by every layer a credit is evaluated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditDefinition {
    pub credit_type: CreditType,
    #[serde(default)]
    pub min_rpv: Option<f64>,
    #[serde(default)]
    pub accepted_categories: Vec<CategoryType>,
}

impl CreditDefinition {
    /// Any verified certification from an active initiative counts.
    pub fn open(credit_type: CreditType) -> Self {
        Self {
            credit_type,
            min_rpv: None,
            accepted_categories: Vec::new(),
        }
    }

    pub fn with_min_rpv(mut self, min_rpv: f64) -> Self {
        self.min_rpv = Some(min_rpv);
        self
    }

    pub fn accepting(mut self, categories: &[CategoryType]) -> Self {
        self.accepted_categories = categories.to_vec();
        self
    }

    pub fn rpv_satisfied(&self, rpv_score: f64) -> bool {
        self.min_rpv.map(|floor| rpv_score >= floor).unwrap_or(true)
    }
}

/// Gaps in the credit catalog that make a calculation impossible.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogGap {
    #[error("no threshold registered for {credit_type} in the {layer} layer")]
    MissingThreshold {
        layer: BuildingLayer,
        credit_type: CreditType,
    },
    #[error("credit {0} is not registered")]
    UnregisteredCredit(CreditType),
}

/// Registered credits, in registration order, plus the `(layer, credit)` threshold table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditCatalog {
    credits: Vec<CreditDefinition>,
    thresholds: BTreeMap<(BuildingLayer, CreditType), CreditThreshold>,
}

impl CreditCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a credit; re-registering replaces the rules but keeps the original position.
    pub fn register(mut self, definition: CreditDefinition) -> Self {
        match self
            .credits
            .iter_mut()
            .find(|existing| existing.credit_type == definition.credit_type)
        {
            Some(existing) => *existing = definition,
            None => self.credits.push(definition),
        }
        self
    }

    pub fn with_threshold(
        mut self,
        layer: BuildingLayer,
        credit_type: CreditType,
        threshold: CreditThreshold,
    ) -> Self {
        self.thresholds.insert((layer, credit_type), threshold);
        self
    }

    pub fn standard() -> Self {
        let catalog = Self::new()
            .register(CreditDefinition::open(CreditType::ResponsibleSourcing))
            .register(
                CreditDefinition::open(CreditType::RecycledContent)
                    .with_min_rpv(12.0)
                    .accepting(&[CategoryType::Ecolabel, CategoryType::CircularEconomy]),
            )
            .register(
                CreditDefinition::open(CreditType::ProductTransparency)
                    .with_min_rpv(8.0)
                    .accepting(&[CategoryType::Transparency]),
            );

        BuildingLayer::ordered()
            .into_iter()
            .flat_map(|layer| {
                CreditType::ordered()
                    .into_iter()
                    .map(move |credit| (layer, credit))
            })
            .fold(catalog, |catalog, (layer, credit)| {
                catalog.with_threshold(layer, credit, standard_threshold(layer, credit))
            })
    }

    pub fn credits(&self) -> &[CreditDefinition] {
        &self.credits
    }

    pub fn definition(&self, credit_type: CreditType) -> Result<&CreditDefinition, CatalogGap> {
        self.credits
            .iter()
            .find(|definition| definition.credit_type == credit_type)
            .ok_or(CatalogGap::UnregisteredCredit(credit_type))
    }

    pub fn threshold(
        &self,
        layer: BuildingLayer,
        credit_type: CreditType,
    ) -> Result<&CreditThreshold, CatalogGap> {
        self.thresholds
            .get(&(layer, credit_type))
            .ok_or(CatalogGap::MissingThreshold { layer, credit_type })
    }

    /// Confirms every registered credit has a threshold for each of `layers`.
    pub fn validate_for<I>(&self, layers: I) -> Result<(), CatalogGap>
    where
        I: IntoIterator<Item = BuildingLayer>,
    {
        for layer in layers {
            for definition in &self.credits {
                self.threshold(layer, definition.credit_type)?;
            }
        }
        Ok(())
    }
}

const fn standard_threshold(layer: BuildingLayer, credit: CreditType) -> CreditThreshold {
    use BuildingLayer::*;
    use CreditType::*;

    match (layer, credit) {
        (Structure, ResponsibleSourcing) => CreditThreshold::new(0.30, 3),
        (Structure, RecycledContent) => CreditThreshold::new(0.20, 2),
        (Structure, ProductTransparency) => CreditThreshold::new(0.15, 1),
        (Envelope, ResponsibleSourcing) => CreditThreshold::new(0.25, 2),
        (Envelope, RecycledContent) => CreditThreshold::new(0.15, 1),
        (Envelope, ProductTransparency) => CreditThreshold::new(0.15, 1),
        (Systems, ResponsibleSourcing) => CreditThreshold::new(0.20, 2),
        (Systems, RecycledContent) => CreditThreshold::new(0.10, 1),
        (Systems, ProductTransparency) => CreditThreshold::new(0.20, 1),
        (Finishes, ResponsibleSourcing) => CreditThreshold::new(0.35, 2),
        (Finishes, RecycledContent) => CreditThreshold::new(0.25, 1),
        (Finishes, ProductTransparency) => CreditThreshold::new(0.30, 1),
    }
}
