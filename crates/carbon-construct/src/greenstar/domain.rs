use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Physical construction layer used to allocate and weight project cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingLayer {
    Structure,
    Envelope,
    Systems,
    Finishes,
}

impl BuildingLayer {
    pub const fn ordered() -> [Self; 4] {
        [Self::Structure, Self::Envelope, Self::Systems, Self::Finishes]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "Structure",
            Self::Envelope => "Envelope",
            Self::Systems => "Systems",
            Self::Finishes => "Finishes",
        }
    }

    /// Fixed relative weight applied when folding layer results into one score.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Structure => 0.4,
            Self::Envelope => 0.3,
            Self::Systems => 0.2,
            Self::Finishes => 0.1,
        }
    }
}

impl fmt::Display for BuildingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sustainability credit evaluated independently for every building layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    ResponsibleSourcing,
    RecycledContent,
    ProductTransparency,
}

impl CreditType {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::ResponsibleSourcing,
            Self::RecycledContent,
            Self::ProductTransparency,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ResponsibleSourcing => "Responsible Sourcing",
            Self::RecycledContent => "Recycled Content",
            Self::ProductTransparency => "Product Transparency",
        }
    }
}

impl fmt::Display for CreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Project-level tier derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementLevel {
    None,
    GoodPractice,
    BestPractice,
}

impl AchievementLevel {
    pub const BEST_PRACTICE_CUT: f64 = 0.85;
    pub const GOOD_PRACTICE_CUT: f64 = 0.60;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::BEST_PRACTICE_CUT {
            Self::BestPractice
        } else if score >= Self::GOOD_PRACTICE_CUT {
            Self::GoodPractice
        } else {
            Self::None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Not Achieved",
            Self::GoodPractice => "Good Practice",
            Self::BestPractice => "Best Practice",
        }
    }
}

/// Area of responsibility a recognised initiative covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Transparency,
    ChainOfCustody,
    Ecolabel,
    CircularEconomy,
    Stewardship,
}

impl CategoryType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "transparency" => Some(Self::Transparency),
            "chain_of_custody" => Some(Self::ChainOfCustody),
            "ecolabel" => Some(Self::Ecolabel),
            "circular_economy" => Some(Self::CircularEconomy),
            "stewardship" => Some(Self::Stewardship),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InitiativeId(pub String);

impl fmt::Display for InitiativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recognised third-party scheme carrying a Responsible Product Value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub initiative_id: InitiativeId,
    pub initiative_name: String,
    pub rpv_score: f64,
    pub categories: Vec<CategoryType>,
    pub recognition_date: NaiveDate,
    pub is_active: bool,
    pub description: String,
}

impl Initiative {
    /// Active and already recognised on `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.recognition_date <= date
    }

    pub fn covers_any(&self, categories: &[CategoryType]) -> bool {
        categories.is_empty()
            || categories
                .iter()
                .any(|category| self.categories.contains(category))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    PendingVerification,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingVerification => "pending_verification",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

/// RPV snapshot copied onto a certification when it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponsibleProductValue {
    pub rpv_score: f64,
    pub captured_on: NaiveDate,
}

/// Evidence linking a product to an initiative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub initiative_id: InitiativeId,
    pub certificate_number: String,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub responsible_product_value: Option<ResponsibleProductValue>,
}

impl Certification {
    /// A certificate expiring on `date` is still current.
    pub fn is_current_on(&self, date: NaiveDate) -> bool {
        self.expiry_date.map(|expiry| expiry >= date).unwrap_or(true)
    }

    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }
}

/// Material line item submitted for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    pub building_layers: Vec<BuildingLayer>,
    pub cost: f64,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
}

impl Product {
    pub fn applies_to(&self, layer: BuildingLayer) -> bool {
        self.building_layers.contains(&layer)
    }
}

/// Top-level calculation input, immutable for the duration of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub project_id: ProjectId,
    pub project_name: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub building_layer_costs: BTreeMap<BuildingLayer, f64>,
    pub total_project_cost: f64,
    pub submission_date: NaiveDate,
}

impl ProjectData {
    pub fn allocated_cost(&self) -> f64 {
        self.building_layer_costs.values().sum()
    }
}
