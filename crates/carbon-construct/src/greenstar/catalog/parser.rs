use super::super::domain::{CategoryType, Initiative, InitiativeId};
use super::CatalogImportError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_initiatives<R: Read>(reader: R) -> Result<Vec<Initiative>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut initiatives = Vec::new();

    for (index, record) in csv_reader.deserialize::<InitiativeRow>().enumerate() {
        // header occupies line 1
        let line = index + 2;
        let row = record?;
        initiatives.push(row.into_initiative(line)?);
    }

    Ok(initiatives)
}

#[derive(Debug, Deserialize)]
struct InitiativeRow {
    initiative_id: String,
    initiative_name: String,
    rpv_score: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    categories: Option<String>,
    recognition_date: String,
    #[serde(deserialize_with = "flexible_bool")]
    is_active: bool,
    #[serde(default)]
    description: String,
}

impl InitiativeRow {
    fn into_initiative(self, line: usize) -> Result<Initiative, CatalogImportError> {
        if self.initiative_id.is_empty() {
            return Err(CatalogImportError::MissingId { line });
        }

        if !self.rpv_score.is_finite() || self.rpv_score < 0.0 {
            return Err(CatalogImportError::InvalidRpv {
                initiative_id: self.initiative_id,
                value: self.rpv_score,
            });
        }

        let recognition_date = NaiveDate::parse_from_str(&self.recognition_date, "%Y-%m-%d")
            .map_err(|_| CatalogImportError::InvalidDate {
                line,
                value: self.recognition_date.clone(),
            })?;

        let mut categories = Vec::new();
        for raw in self
            .categories
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .filter(|value| !value.trim().is_empty())
        {
            let category =
                CategoryType::parse(raw).ok_or_else(|| CatalogImportError::UnknownCategory {
                    line,
                    value: raw.trim().to_string(),
                })?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Ok(Initiative {
            initiative_id: InitiativeId(self.initiative_id),
            initiative_name: self.initiative_name,
            rpv_score: self.rpv_score,
            categories,
            recognition_date,
            is_active: self.is_active,
            description: self.description,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, found '{other}'"
        ))),
    }
}
