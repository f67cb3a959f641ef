use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::BuildingLayer;

/// Whole-unit currency with thousands separators, e.g. `$1,234,568`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Ratio in `[0, 1]` rendered as a percentage with one decimal place.
pub fn format_percentage(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", ratio * 100.0)
}

/// Folds per-layer scores with the fixed layer weights, as given.
pub fn weighted_layer_score(scores: &BTreeMap<BuildingLayer, f64>) -> f64 {
    scores
        .iter()
        .map(|(layer, score)| score * layer.weight())
        .sum()
}

/// Display scale for colour-coding a percentage. Unrelated to `AchievementLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ComplianceBand {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= 0.85 {
            Self::Excellent
        } else if ratio >= 0.60 {
            Self::Good
        } else if ratio >= 0.40 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#15803d",
            Self::Good => "#65a30d",
            Self::Fair => "#d97706",
            Self::Poor => "#dc2626",
        }
    }
}
