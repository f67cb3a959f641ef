use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::greenstar::catalog::InitiativeCatalog;
use crate::greenstar::credits::{CreditCatalog, CreditDefinition, CreditThreshold};
use crate::greenstar::domain::{
    BuildingLayer, CategoryType, Certification, CreditType, Initiative, InitiativeId, Product,
    ProductId, ProjectData, ProjectId, ResponsibleProductValue, VerificationStatus,
};
use crate::greenstar::report::ComplianceCalculator;

pub(super) fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

pub(super) fn certification(initiative: &str, status: VerificationStatus) -> Certification {
    Certification {
        initiative_id: InitiativeId(initiative.to_string()),
        certificate_number: format!("{}-0001", initiative.to_ascii_uppercase()),
        issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        expiry_date: Some(NaiveDate::from_ymd_opt(2027, 1, 14).expect("valid date")),
        verification_status: status,
        responsible_product_value: Some(ResponsibleProductValue {
            rpv_score: 15.0,
            captured_on: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        }),
    }
}

pub(super) fn verified(initiative: &str) -> Certification {
    certification(initiative, VerificationStatus::Verified)
}

pub(super) fn product(
    id: &str,
    layers: &[BuildingLayer],
    cost: f64,
    certifications: Vec<Certification>,
) -> Product {
    Product {
        product_id: ProductId(id.to_string()),
        name: format!("Product {id}"),
        manufacturer: "Southern Cross Building Supplies".to_string(),
        description: String::new(),
        certifications,
        building_layers: layers.to_vec(),
        cost,
        quantity: 1.0,
        unit: "lot".to_string(),
        category: "Materials".to_string(),
        subcategory: None,
    }
}

pub(super) fn project(
    products: Vec<Product>,
    layer_costs: &[(BuildingLayer, f64)],
    total_project_cost: f64,
) -> ProjectData {
    ProjectData {
        project_id: ProjectId("proj-001".to_string()),
        project_name: "Harbourside Offices".to_string(),
        products,
        building_layer_costs: layer_costs.iter().copied().collect::<BTreeMap<_, _>>(),
        total_project_cost,
        submission_date: evaluation_date(),
    }
}

/// One open credit with the same threshold in every layer.
pub(super) fn single_credit_catalog(min_percentage: f64, points: u32) -> CreditCatalog {
    BuildingLayer::ordered().into_iter().fold(
        CreditCatalog::new().register(CreditDefinition::open(CreditType::ResponsibleSourcing)),
        |catalog, layer| {
            catalog.with_threshold(
                layer,
                CreditType::ResponsibleSourcing,
                CreditThreshold::new(min_percentage, points),
            )
        },
    )
}

pub(super) fn calculator(credits: CreditCatalog) -> ComplianceCalculator {
    ComplianceCalculator::new(InitiativeCatalog::standard(), credits)
}

pub(super) fn shared_calculator() -> Arc<ComplianceCalculator> {
    Arc::new(ComplianceCalculator::standard())
}

pub(super) fn initiative(id: &str, rpv_score: f64, categories: &[CategoryType]) -> Initiative {
    Initiative {
        initiative_id: InitiativeId(id.to_string()),
        initiative_name: id.to_string(),
        rpv_score,
        categories: categories.to_vec(),
        recognition_date: NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"),
        is_active: true,
        description: String::new(),
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
