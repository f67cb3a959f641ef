use std::collections::BTreeSet;

use tracing::warn;

use super::domain::{BuildingLayer, ProductId, ProjectData};

pub const DEFAULT_LAYER_DRIFT_TOLERANCE: f64 = 0.01;

/// Layer allocations may overrun the project total by at least this much.
const MIN_ABSOLUTE_DRIFT: f64 = 1.0;

/// Project data the calculator refuses to score.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputViolation {
    #[error("product {product_id} has invalid cost {cost}")]
    InvalidProductCost { product_id: ProductId, cost: f64 },
    #[error("product {product_id} must have a positive quantity (found {quantity})")]
    InvalidQuantity { product_id: ProductId, quantity: f64 },
    #[error("product {0} is listed more than once")]
    DuplicateProduct(ProductId),
    #[error("{layer} layer has invalid allocated cost {cost}")]
    InvalidLayerCost { layer: BuildingLayer, cost: f64 },
    #[error("total project cost {0} must be a non-negative amount")]
    InvalidProjectCost(f64),
    #[error("layer allocations {allocated:.2} exceed total project cost {total:.2}")]
    AllocationExceedsTotal { allocated: f64, total: f64 },
}

/// Guard run ahead of evaluation so invalid amounts never reach the scoring maths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputGuard {
    layer_drift_tolerance: f64,
}

impl Default for InputGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LAYER_DRIFT_TOLERANCE)
    }
}

impl InputGuard {
    pub fn new(layer_drift_tolerance: f64) -> Self {
        let sanitized = if layer_drift_tolerance.is_finite() && layer_drift_tolerance >= 0.0 {
            layer_drift_tolerance
        } else {
            DEFAULT_LAYER_DRIFT_TOLERANCE
        };

        Self {
            layer_drift_tolerance: sanitized,
        }
    }

    pub fn layer_drift_tolerance(&self) -> f64 {
        self.layer_drift_tolerance
    }

    pub fn validate(&self, project: &ProjectData) -> Result<(), InputViolation> {
        let total = project.total_project_cost;
        if !total.is_finite() || total < 0.0 {
            return Err(InputViolation::InvalidProjectCost(total));
        }

        let mut seen = BTreeSet::new();
        for product in &project.products {
            if !product.cost.is_finite() || product.cost < 0.0 {
                return Err(InputViolation::InvalidProductCost {
                    product_id: product.product_id.clone(),
                    cost: product.cost,
                });
            }
            if !product.quantity.is_finite() || product.quantity <= 0.0 {
                return Err(InputViolation::InvalidQuantity {
                    product_id: product.product_id.clone(),
                    quantity: product.quantity,
                });
            }
            if !seen.insert(&product.product_id) {
                return Err(InputViolation::DuplicateProduct(product.product_id.clone()));
            }
        }

        for (layer, cost) in &project.building_layer_costs {
            if !cost.is_finite() || *cost < 0.0 {
                return Err(InputViolation::InvalidLayerCost {
                    layer: *layer,
                    cost: *cost,
                });
            }
        }

        // A zero total means the project cost is not known yet; the score is reported as 0.
        let allocated = project.allocated_cost();
        if total > 0.0 && allocated > total {
            let allowance = (total * self.layer_drift_tolerance).max(MIN_ABSOLUTE_DRIFT);
            if allocated - total > allowance {
                return Err(InputViolation::AllocationExceedsTotal { allocated, total });
            }
            warn!(
                project_id = %project.project_id,
                allocated,
                total,
                "layer allocations exceed project total within tolerance"
            );
        }

        Ok(())
    }
}
