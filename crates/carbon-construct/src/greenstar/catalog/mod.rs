//! Reference table of recognised Responsible Products initiatives.
//!
//! The catalog is read-only during a calculation. It is either the built-in
//! table or one imported from a CSV export supplied by the catalog provider.

mod parser;

use super::domain::{CategoryType, Initiative, InitiativeId};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Errors raised while importing an initiative catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read initiative catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid initiative CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: initiative_id is required")]
    MissingId { line: usize },
    #[error("initiative {initiative_id} has invalid RPV score {value}")]
    InvalidRpv { initiative_id: String, value: f64 },
    #[error("line {line}: recognition_date '{value}' is not YYYY-MM-DD")]
    InvalidDate { line: usize, value: String },
    #[error("line {line}: unknown initiative category '{value}'")]
    UnknownCategory { line: usize, value: String },
    #[error("initiative {0} is listed more than once")]
    Duplicate(InitiativeId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitiativeCatalog {
    initiatives: BTreeMap<InitiativeId, Initiative>,
}

impl InitiativeCatalog {
    pub fn new(initiatives: Vec<Initiative>) -> Result<Self, CatalogImportError> {
        let mut table = BTreeMap::new();
        for initiative in initiatives {
            let id = initiative.initiative_id.clone();
            if table.insert(id.clone(), initiative).is_some() {
                return Err(CatalogImportError::Duplicate(id));
            }
        }

        Ok(Self { initiatives: table })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        Self::new(parser::parse_initiatives(reader)?)
    }

    /// Built-in initiative table used when no catalog export is configured.
    pub fn standard() -> Self {
        let entries = [
            (
                "epd-australasia",
                "EPD Australasia",
                10.0,
                &[CategoryType::Transparency][..],
                (2018, 3, 1),
                true,
                "ISO 14025 Type III environmental product declarations.",
            ),
            (
                "declare",
                "Declare Label",
                8.0,
                &[CategoryType::Transparency][..],
                (2020, 7, 1),
                true,
                "Ingredient disclosure label for building products.",
            ),
            (
                "fsc-coc",
                "FSC Chain of Custody",
                15.0,
                &[CategoryType::ChainOfCustody, CategoryType::Stewardship][..],
                (2015, 1, 1),
                true,
                "Forest Stewardship Council chain of custody certification.",
            ),
            (
                "pefc-coc",
                "PEFC Chain of Custody",
                12.0,
                &[CategoryType::ChainOfCustody][..],
                (2015, 1, 1),
                true,
                "Programme for the Endorsement of Forest Certification chain of custody.",
            ),
            (
                "responsible-steel",
                "ResponsibleSteel Certified Site",
                18.0,
                &[CategoryType::Stewardship, CategoryType::ChainOfCustody][..],
                (2021, 2, 1),
                true,
                "Site certification for responsible steel production.",
            ),
            (
                "greentag-level-a",
                "Global GreenTag GreenRate Level A",
                20.0,
                &[CategoryType::Ecolabel, CategoryType::Transparency][..],
                (2017, 6, 1),
                true,
                "Third-party ecolabel with health and lifecycle assessment.",
            ),
            (
                "geca",
                "Good Environmental Choice Australia",
                14.0,
                &[CategoryType::Ecolabel, CategoryType::CircularEconomy][..],
                (2016, 9, 1),
                true,
                "Type I ecolabel covering recycled and low impact products.",
            ),
            (
                "c2c-silver",
                "Cradle to Cradle Certified Silver",
                22.0,
                &[CategoryType::CircularEconomy, CategoryType::Ecolabel][..],
                (2019, 4, 1),
                true,
                "Material health and circularity certification.",
            ),
            (
                "greentag-legacy",
                "GreenTag GreenRate (legacy scheme)",
                6.0,
                &[CategoryType::Ecolabel][..],
                (2012, 1, 1),
                false,
                "Superseded scheme retained for historical certificates.",
            ),
        ];

        let initiatives = entries
            .into_iter()
            .map(
                |(id, name, rpv_score, categories, (year, month, day), is_active, description)| {
                    (
                        InitiativeId(id.to_string()),
                        Initiative {
                            initiative_id: InitiativeId(id.to_string()),
                            initiative_name: name.to_string(),
                            rpv_score,
                            categories: categories.to_vec(),
                            // a malformed entry is never recognised rather than always recognised
                            recognition_date: NaiveDate::from_ymd_opt(year, month, day)
                                .unwrap_or(NaiveDate::MAX),
                            is_active,
                            description: description.to_string(),
                        },
                    )
                },
            )
            .collect();

        Self { initiatives }
    }

    pub fn get(&self, id: &InitiativeId) -> Option<&Initiative> {
        self.initiatives.get(id)
    }

    pub fn len(&self) -> usize {
        self.initiatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initiatives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Initiative> {
        self.initiatives.values()
    }

    /// Initiatives that may contribute to compliance on `date`.
    pub fn active_on(&self, date: NaiveDate) -> impl Iterator<Item = &Initiative> {
        self.initiatives
            .values()
            .filter(move |initiative| initiative.is_active_on(date))
    }

    pub fn in_category(&self, category: CategoryType) -> impl Iterator<Item = &Initiative> {
        self.initiatives
            .values()
            .filter(move |initiative| initiative.categories.contains(&category))
    }
}
