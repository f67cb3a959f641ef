use crate::assess::report_lines;
use carbon_construct::error::AppError;
use carbon_construct::greenstar::{
    BuildingLayer, Certification, ComplianceCalculator, ComplianceReport, InitiativeId, Product,
    ProductId, ProjectData, ProjectId, ResponsibleProductValue, VerificationStatus,
};
use chrono::NaiveDate;
use clap::Args;
use std::collections::BTreeMap;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the sample project (YYYY-MM-DD). Defaults to 2025-06-30.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let project = sample_project(args.as_of.unwrap_or_else(default_as_of));
    let calculator = ComplianceCalculator::standard();
    let summary = calculator.calculate_project_compliance(&project)?;
    let report = ComplianceReport::new(&project, summary);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("CarbonConstruct demo (built-in initiative and credit catalogs)");
    for line in report_lines(&report) {
        println!("{line}");
    }
    Ok(())
}

fn default_as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn certification(
    initiative: &str,
    number: &str,
    issued: NaiveDate,
    expires: Option<NaiveDate>,
    status: VerificationStatus,
) -> Certification {
    Certification {
        initiative_id: InitiativeId(initiative.to_string()),
        certificate_number: number.to_string(),
        issue_date: issued,
        expiry_date: expires,
        verification_status: status,
        responsible_product_value: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    manufacturer: &str,
    layers: &[BuildingLayer],
    cost: f64,
    (quantity, unit): (f64, &str),
    category: &str,
    certifications: Vec<Certification>,
) -> Product {
    Product {
        product_id: ProductId(id.to_string()),
        name: name.to_string(),
        manufacturer: manufacturer.to_string(),
        description: String::new(),
        certifications,
        building_layers: layers.to_vec(),
        cost,
        quantity,
        unit: unit.to_string(),
        category: category.to_string(),
        subcategory: None,
    }
}

/// Mid-rise office fit for showing partial compliance across all four layers.
pub(crate) fn sample_project(as_of: NaiveDate) -> ProjectData {
    let mut steel_cert = certification(
        "responsible-steel",
        "RS-2024-0117",
        date(2024, 3, 1),
        Some(date(2027, 2, 28)),
        VerificationStatus::Verified,
    );
    steel_cert.responsible_product_value = Some(ResponsibleProductValue {
        rpv_score: 18.0,
        captured_on: date(2024, 3, 1),
    });

    let products = vec![
        product(
            "steel-frame",
            "Structural steel frame",
            "Southern Cross Steel",
            &[BuildingLayer::Structure],
            420_000.0,
            (180.0, "t"),
            "Steel",
            vec![steel_cert],
        ),
        product(
            "clt-floor",
            "CLT floor cassettes",
            "Tasman Timber Systems",
            &[BuildingLayer::Structure, BuildingLayer::Envelope],
            150_000.0,
            (820.0, "m2"),
            "Timber",
            vec![certification(
                "pefc-coc",
                "PEFC-AU-88213",
                date(2023, 11, 20),
                Some(date(2026, 11, 19)),
                VerificationStatus::Verified,
            )],
        ),
        product(
            "facade-panels",
            "Facade panels",
            "Coastline Facades",
            &[BuildingLayer::Envelope],
            90_000.0,
            (1_400.0, "m2"),
            "Cladding",
            vec![certification(
                "epd-australasia",
                "EPD-AU-20231",
                date(2024, 1, 10),
                None,
                VerificationStatus::Verified,
            )],
        ),
        product(
            "ahu",
            "Air handling units",
            "Brisk Air",
            &[BuildingLayer::Systems],
            110_000.0,
            (4.0, "ea"),
            "HVAC",
            vec![certification(
                "greentag-level-a",
                "GT-A-9910",
                date(2025, 2, 1),
                Some(date(2028, 1, 31)),
                VerificationStatus::PendingVerification,
            )],
        ),
        product(
            "carpet-tiles",
            "Recycled nylon carpet tiles",
            "Loomcraft",
            &[BuildingLayer::Finishes],
            45_000.0,
            (2_600.0, "m2"),
            "Flooring",
            vec![certification(
                "c2c-silver",
                "C2C-7781",
                date(2024, 8, 15),
                Some(date(2026, 8, 14)),
                VerificationStatus::Verified,
            )],
        ),
    ];

    let building_layer_costs = BTreeMap::from([
        (BuildingLayer::Structure, 600_000.0),
        (BuildingLayer::Envelope, 300_000.0),
        (BuildingLayer::Systems, 200_000.0),
        (BuildingLayer::Finishes, 100_000.0),
    ]);

    ProjectData {
        project_id: ProjectId("harbourside-2025".to_string()),
        project_name: "Harbourside Offices Stage 2".to_string(),
        products,
        building_layer_costs,
        total_project_cost: 1_200_000.0,
        submission_date: as_of,
    }
}
