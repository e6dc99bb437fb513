//! Grid-map records: substations and the transmission corridors between them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::record::{FieldValue, Record};

/// Regional load dispatch area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Northern,
    Southern,
    Eastern,
    Western,
}

impl Region {
    /// Regions in the order the distribution panel lists them.
    pub const ALL: [Region; 4] = [
        Region::Northern,
        Region::Southern,
        Region::Eastern,
        Region::Western,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Northern => "Northern",
            Region::Southern => "Southern",
            Region::Eastern => "Eastern",
            Region::Western => "Western",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown("region", s))
    }
}

/// Operating state of a substation or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstationStatus {
    Operational,
    Maintenance,
    Warning,
}

impl SubstationStatus {
    pub const ALL: [SubstationStatus; 3] = [
        SubstationStatus::Operational,
        SubstationStatus::Maintenance,
        SubstationStatus::Warning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubstationStatus::Operational => "operational",
            SubstationStatus::Maintenance => "maintenance",
            SubstationStatus::Warning => "warning",
        }
    }

    /// Marker colour used on the grid map.
    pub fn marker_color(&self) -> &'static str {
        match self {
            SubstationStatus::Operational => "#10B981",
            SubstationStatus::Warning => "#F59E0B",
            SubstationStatus::Maintenance => "#EF4444",
        }
    }
}

impl fmt::Display for SubstationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubstationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubstationStatus::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown("status", s))
    }
}

/// Latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A substation marker on the grid map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substation {
    pub id: u32,
    pub name: String,
    pub region: Region,
    /// Voltage class in kV, e.g. "400/220".
    pub voltage: String,
    pub coordinates: Coordinates,
    pub status: SubstationStatus,
    pub capacity_mw: f64,
    pub load_pct: f64,
    pub assets: u32,
    pub last_inspection: NaiveDate,
}

impl Substation {
    /// Fields matched by the substation text search.
    pub const SEARCH_FIELDS: [&'static str; 2] = ["name", "region"];
}

impl Record for Substation {
    type Id = u32;

    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "region",
        "voltage",
        "status",
        "capacity",
        "load",
        "assets",
        "last_inspection",
    ];

    fn id(&self) -> &u32 {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Integer(i64::from(self.id)),
            "name" => FieldValue::text(&self.name),
            "region" => FieldValue::text(self.region.as_str()),
            "voltage" => FieldValue::text(&self.voltage),
            "status" => FieldValue::text(self.status.as_str()),
            "capacity" => FieldValue::Number(self.capacity_mw),
            "load" => FieldValue::Number(self.load_pct),
            "assets" => FieldValue::Integer(i64::from(self.assets)),
            "last_inspection" => FieldValue::Date(self.last_inspection),
            _ => return None,
        })
    }
}

/// A transmission corridor between two substations.
///
/// `from`/`to` are substation ids and are not checked against the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionLine {
    pub id: String,
    pub from: u32,
    pub to: u32,
    pub voltage: String,
    pub length_km: f64,
    pub status: SubstationStatus,
}

impl TransmissionLine {
    pub fn new(
        from: u32,
        to: u32,
        voltage: impl Into<String>,
        length_km: f64,
        status: SubstationStatus,
    ) -> Self {
        Self {
            id: format!("{from}-{to}"),
            from,
            to,
            voltage: voltage.into(),
            length_km,
            status,
        }
    }

    /// Whether the line terminates at the given substation.
    pub fn touches(&self, substation: u32) -> bool {
        self.from == substation || self.to == substation
    }
}

impl Record for TransmissionLine {
    type Id = String;

    const FIELDS: &'static [&'static str] = &["id", "from", "to", "voltage", "length", "status"];

    fn id(&self) -> &String {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::text(&self.id),
            "from" => FieldValue::Integer(i64::from(self.from)),
            "to" => FieldValue::Integer(i64::from(self.to)),
            "voltage" => FieldValue::text(&self.voltage),
            "length" => FieldValue::Number(self.length_km),
            "status" => FieldValue::text(self.status.as_str()),
            _ => return None,
        })
    }
}

/// Headline figures for the grid map, computed over every substation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStats {
    pub total_substations: usize,
    pub operational: usize,
    pub under_maintenance: usize,
    pub warnings: usize,
    pub total_capacity_mw: f64,
    /// Mean loading, rounded to a whole percent. Zero for an empty grid.
    pub avg_load_pct: u32,
}

impl GridStats {
    pub fn compute<'a>(substations: impl IntoIterator<Item = &'a Substation>) -> Self {
        let mut stats = GridStats {
            total_substations: 0,
            operational: 0,
            under_maintenance: 0,
            warnings: 0,
            total_capacity_mw: 0.0,
            avg_load_pct: 0,
        };
        let mut load_sum = 0.0;

        for sub in substations {
            stats.total_substations += 1;
            match sub.status {
                SubstationStatus::Operational => stats.operational += 1,
                SubstationStatus::Maintenance => stats.under_maintenance += 1,
                SubstationStatus::Warning => stats.warnings += 1,
            }
            stats.total_capacity_mw += sub.capacity_mw;
            load_sum += sub.load_pct;
        }

        if stats.total_substations > 0 {
            stats.avg_load_pct = (load_sum / stats.total_substations as f64).round() as u32;
        }
        stats
    }
}
