//! Equipment registry entries from the daily performance report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Normal,
    Maintenance,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Normal => "Normal",
            EquipmentStatus::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health classification of an asset score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    Good,
    Fair,
    Poor,
}

impl HealthBand {
    /// ≥85 is good, ≥70 fair, anything lower poor.
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => HealthBand::Good,
            70..=84 => HealthBand::Fair,
            _ => HealthBand::Poor,
        }
    }
}

/// An asset as handed to the asset-details and maintenance-log pages.
///
/// Switchgear reports an operation count instead of a loading figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub asset_type: String,
    pub availability_pct: f64,
    pub load_pct: Option<f64>,
    pub operations: Option<u32>,
    pub status: EquipmentStatus,
    pub health_score: Option<u8>,
}

impl Equipment {
    pub fn health_band(&self) -> Option<HealthBand> {
        self.health_score.map(HealthBand::from_score)
    }
}

impl Record for Equipment {
    type Id = String;

    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "asset_type",
        "availability",
        "load",
        "operations",
        "status",
        "health_score",
    ];

    fn id(&self) -> &String {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::text(&self.id),
            "name" => FieldValue::text(&self.name),
            "asset_type" => FieldValue::text(&self.asset_type),
            "availability" => FieldValue::Number(self.availability_pct),
            "load" => FieldValue::Number(self.load_pct?),
            "operations" => FieldValue::Integer(i64::from(self.operations?)),
            "status" => FieldValue::text(self.status.as_str()),
            "health_score" => FieldValue::Integer(i64::from(self.health_score?)),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_band_thresholds() {
        assert_eq!(HealthBand::from_score(85), HealthBand::Good);
        assert_eq!(HealthBand::from_score(84), HealthBand::Fair);
        assert_eq!(HealthBand::from_score(70), HealthBand::Fair);
        assert_eq!(HealthBand::from_score(69), HealthBand::Poor);
    }
}
