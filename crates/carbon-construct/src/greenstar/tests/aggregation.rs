use super::common::*;

use crate::greenstar::credits::{CatalogGap, CreditCatalog, CreditDefinition, CreditThreshold};
use crate::greenstar::domain::{AchievementLevel, BuildingLayer, CreditType};
use crate::greenstar::report::ComplianceCalculator;
use crate::greenstar::validation::InputViolation;
use crate::greenstar::CalculationError;

fn mixed_project() -> crate::greenstar::domain::ProjectData {
    project(
        vec![
            product(
                "steel-frame",
                &[BuildingLayer::Structure],
                420_000.0,
                vec![verified("responsible-steel")],
            ),
            product(
                "concrete",
                &[BuildingLayer::Structure],
                180_000.0,
                vec![verified("geca")],
            ),
            product(
                "facade",
                &[BuildingLayer::Envelope],
                150_000.0,
                vec![verified("epd-australasia")],
            ),
            product("ductwork", &[BuildingLayer::Systems], 90_000.0, vec![]),
            product(
                "carpet",
                &[BuildingLayer::Finishes],
                60_000.0,
                vec![verified("greentag-level-a")],
            ),
        ],
        &[
            (BuildingLayer::Finishes, 100_000.0),
            (BuildingLayer::Systems, 200_000.0),
            (BuildingLayer::Envelope, 300_000.0),
            (BuildingLayer::Structure, 600_000.0),
        ],
        1_200_000.0,
    )
}

#[test]
fn empty_project_scores_zero_without_failing() {
    let calculator = ComplianceCalculator::standard();
    let summary = calculator
        .calculate_project_compliance(&project(vec![], &[], 0.0))
        .expect("empty input is valid");

    assert_eq!(summary.overall_score, 0.0);
    assert_eq!(summary.achieved_credits, 0);
    assert_eq!(summary.total_possible_credits, 0);
    assert_eq!(summary.achievement_level, AchievementLevel::None);
    assert!(summary.total_compliance.is_empty());
    assert!(summary.recommendations[0].contains("Add products"));
}

#[test]
fn empty_products_with_allocated_layers_recommend_certified_products() {
    let calculator = calculator(single_credit_catalog(0.5, 10));
    let summary = calculator
        .calculate_project_compliance(&project(
            vec![],
            &[(BuildingLayer::Structure, 100_000.0)],
            100_000.0,
        ))
        .expect("valid project");

    assert_eq!(summary.overall_score, 0.0);
    assert_eq!(summary.total_possible_credits, 1);
    assert!(summary.recommendations[0].contains("certifications"));
    assert!(summary.recommendations[1].starts_with("Structure layer"));
}

#[test]
fn zero_total_project_cost_reports_zero_score() {
    let calculator = calculator(single_credit_catalog(0.5, 10));
    let summary = calculator
        .calculate_project_compliance(&project(
            vec![product(
                "steel-frame",
                &[BuildingLayer::Structure],
                100_000.0,
                vec![verified("responsible-steel")],
            )],
            &[(BuildingLayer::Structure, 100_000.0)],
            0.0,
        ))
        .expect("zero total is degenerate, not invalid");

    assert_eq!(summary.overall_score, 0.0);
    assert_eq!(summary.achieved_credits, 1);
}

#[test]
fn calculation_is_deterministic() {
    let calculator = ComplianceCalculator::standard();
    let project = mixed_project();

    let first = calculator
        .calculate_project_compliance(&project)
        .expect("valid project");
    let second = calculator
        .calculate_project_compliance(&project)
        .expect("valid project");

    assert_eq!(first, second);
    assert_eq!(first.overall_score.to_bits(), second.overall_score.to_bits());
}

#[test]
fn results_follow_layer_then_registration_order() {
    let credits = CreditCatalog::standard();
    let calculator = calculator(credits.clone());
    let summary = calculator
        .calculate_project_compliance(&mixed_project())
        .expect("valid project");

    let expected: Vec<(BuildingLayer, CreditType)> = BuildingLayer::ordered()
        .into_iter()
        .flat_map(|layer| {
            credits
                .credits()
                .iter()
                .map(move |definition| (layer, definition.credit_type))
        })
        .collect();
    let actual: Vec<(BuildingLayer, CreditType)> = summary
        .total_compliance
        .iter()
        .map(|result| (result.building_layer, result.credit_type))
        .collect();

    assert_eq!(actual, expected);
    assert_eq!(summary.total_possible_credits, 12);
    assert!(summary
        .total_compliance
        .iter()
        .all(|result| (0.0..=1.0).contains(&result.percentage)));
}

#[test]
fn overall_score_weights_layers_and_points() {
    let calculator = calculator(single_credit_catalog(0.5, 10));
    let summary = calculator
        .calculate_project_compliance(&project(
            vec![product(
                "steel-frame",
                &[BuildingLayer::Structure],
                100_000.0,
                vec![verified("responsible-steel")],
            )],
            &[
                (BuildingLayer::Structure, 100_000.0),
                (BuildingLayer::Finishes, 50_000.0),
            ],
            150_000.0,
        ))
        .expect("valid project");

    // (1.0 * 0.4 * 10) / (0.4 * 10 + 0.1 * 10)
    assert_close(summary.overall_score, 0.8);
    assert_eq!(summary.achievement_level, AchievementLevel::GoodPractice);
    assert_eq!(summary.achieved_credits, 1);
    assert_eq!(summary.points_awarded, 10);
    assert_eq!(summary.points_available, 20);

    assert_eq!(summary.layer_scores.len(), 2);
    assert_eq!(summary.layer_scores[0].layer, BuildingLayer::Structure);
    assert_close(summary.layer_scores[0].score, 1.0);
    assert_eq!(summary.layer_scores[1].layer, BuildingLayer::Finishes);
    assert_close(summary.layer_scores[1].score, 0.0);
    assert_close(summary.weighted_layer_score(), 0.4);
}

#[test]
fn partially_compliant_envelope_recommends_closing_the_gap() {
    let calculator = calculator(single_credit_catalog(0.6, 4));
    let summary = calculator
        .calculate_project_compliance(&project(
            vec![
                product(
                    "glazing",
                    &[BuildingLayer::Envelope],
                    50_000.0,
                    vec![verified("fsc-coc")],
                ),
                product("render", &[BuildingLayer::Envelope], 50_000.0, vec![]),
            ],
            &[(BuildingLayer::Envelope, 100_000.0)],
            100_000.0,
        ))
        .expect("valid project");

    let result = &summary.total_compliance[0];
    assert_close(result.percentage, 0.5);
    assert!(!result.achieved);
    assert_eq!(result.points_awarded, 0);

    assert_eq!(summary.recommendations.len(), 1);
    let recommendation = &summary.recommendations[0];
    assert!(recommendation.contains("Envelope"));
    assert!(recommendation.contains("50.0%"));
    assert!(recommendation.contains("60.0%"));
    assert!(recommendation.contains("$10,000"));
}

#[test]
fn recommendations_list_largest_shortfall_first() {
    let calculator = calculator(single_credit_catalog(0.5, 10));
    let summary = calculator
        .calculate_project_compliance(&project(
            vec![
                product(
                    "frame",
                    &[BuildingLayer::Structure],
                    40_000.0,
                    vec![verified("pefc-coc")],
                ),
                product(
                    "joinery",
                    &[BuildingLayer::Finishes],
                    10_000.0,
                    vec![verified("pefc-coc")],
                ),
            ],
            &[
                (BuildingLayer::Structure, 100_000.0),
                (BuildingLayer::Systems, 50_000.0),
                (BuildingLayer::Finishes, 50_000.0),
            ],
            200_000.0,
        ))
        .expect("valid project");

    let layers: Vec<&str> = summary
        .recommendations
        .iter()
        .map(|line| line.split(' ').next().unwrap_or_default())
        .collect();
    // shortfalls: Systems 0.5, Finishes 0.3, Structure 0.1
    assert_eq!(layers, vec!["Systems", "Finishes", "Structure"]);
}

#[test]
fn adding_a_qualifying_certification_never_lowers_the_score() {
    let calculator = ComplianceCalculator::standard();
    let baseline = mixed_project();
    let before = calculator
        .calculate_project_compliance(&baseline)
        .expect("valid project");

    let mut improved = baseline.clone();
    let ductwork = improved
        .products
        .iter_mut()
        .find(|product| product.product_id.0 == "ductwork")
        .expect("ductwork present");
    ductwork.certifications.push(verified("c2c-silver"));

    let after = calculator
        .calculate_project_compliance(&improved)
        .expect("valid project");

    assert!(after.overall_score >= before.overall_score);
    assert!(after.overall_score > before.overall_score);
    assert!(after.achieved_credits >= before.achieved_credits);
}

#[test]
fn catalog_gap_aborts_the_whole_calculation() {
    let credits = CreditCatalog::new()
        .register(CreditDefinition::open(CreditType::ResponsibleSourcing))
        .with_threshold(
            BuildingLayer::Structure,
            CreditType::ResponsibleSourcing,
            CreditThreshold::new(0.3, 3),
        );
    let calculator = calculator(credits);

    let result = calculator.calculate_project_compliance(&project(
        vec![],
        &[
            (BuildingLayer::Structure, 50_000.0),
            (BuildingLayer::Envelope, 50_000.0),
        ],
        100_000.0,
    ));

    assert_eq!(
        result,
        Err(CalculationError::Configuration(
            CatalogGap::MissingThreshold {
                layer: BuildingLayer::Envelope,
                credit_type: CreditType::ResponsibleSourcing,
            }
        ))
    );
}

#[test]
fn invalid_input_is_rejected_before_scoring() {
    let calculator = ComplianceCalculator::standard();
    let mut project = mixed_project();
    project.products[0].cost = -5.0;

    match calculator.calculate_project_compliance(&project) {
        Err(CalculationError::InvalidInput(InputViolation::InvalidProductCost {
            product_id,
            ..
        })) => assert_eq!(product_id.0, "steel-frame"),
        other => panic!("expected invalid product cost, got {other:?}"),
    }
}

#[test]
fn achievement_levels_use_fixed_cut_points() {
    assert_eq!(AchievementLevel::from_score(0.0), AchievementLevel::None);
    assert_eq!(AchievementLevel::from_score(0.599), AchievementLevel::None);
    assert_eq!(
        AchievementLevel::from_score(0.60),
        AchievementLevel::GoodPractice
    );
    assert_eq!(
        AchievementLevel::from_score(0.849),
        AchievementLevel::GoodPractice
    );
    assert_eq!(
        AchievementLevel::from_score(0.85),
        AchievementLevel::BestPractice
    );
}
