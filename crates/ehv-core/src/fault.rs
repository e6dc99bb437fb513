//! Protection fault events.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::record::{FieldValue, Record};

/// Fault severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Every severity in display order.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown("severity", s))
    }
}

/// Resolution state of a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultStatus {
    Resolved,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
    Investigating,
}

impl FaultStatus {
    pub const ALL: [FaultStatus; 3] = [
        FaultStatus::Resolved,
        FaultStatus::UnderMaintenance,
        FaultStatus::Investigating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaultStatus::Resolved => "Resolved",
            FaultStatus::UnderMaintenance => "Under Maintenance",
            FaultStatus::Investigating => "Investigating",
        }
    }
}

impl fmt::Display for FaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaultStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaultStatus::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown("fault status", s))
    }
}

/// A single fault event recorded against an asset.
///
/// `asset` names an equipment id but is never validated against the registry.
/// Current and voltage are `None` where the relay reported "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultLog {
    pub id: String,
    pub timestamp: NaiveDateTime,
    pub asset: String,
    pub asset_type: String,
    pub fault_type: String,
    pub severity: Severity,
    pub duration_secs: u32,
    pub action: String,
    pub status: FaultStatus,
    pub temperature_c: f64,
    pub current_a: Option<f64>,
    pub voltage_kv: Option<f64>,
    pub description: String,
}

impl FaultLog {
    /// Fields matched by the fault-log text search.
    pub const SEARCH_FIELDS: [&'static str; 3] = ["asset", "fault_type", "description"];

    /// Duration as shown in the fault table ("45 sec", "2.5 min").
    pub fn duration_label(&self) -> String {
        format_duration(self.duration_secs)
    }

    /// Measurement label, "N/A" when absent.
    pub fn current_label(&self) -> String {
        self.current_a
            .map(|a| format!("{a:.0}A"))
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn voltage_label(&self) -> String {
        self.voltage_kv
            .map(|kv| format!("{kv:.0}kV"))
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.0}°C", self.temperature_c)
    }
}

fn format_duration(secs: u32) -> String {
    if secs < 60 {
        return format!("{secs} sec");
    }
    if secs % 60 == 0 {
        format!("{} min", secs / 60)
    } else {
        format!("{:.1} min", secs as f64 / 60.0)
    }
}

impl Record for FaultLog {
    type Id = String;

    const FIELDS: &'static [&'static str] = &[
        "id",
        "timestamp",
        "asset",
        "asset_type",
        "fault_type",
        "severity",
        "duration",
        "action",
        "status",
        "temperature",
        "current",
        "voltage",
        "description",
    ];

    fn id(&self) -> &String {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::text(&self.id),
            "timestamp" => FieldValue::DateTime(self.timestamp),
            "asset" => FieldValue::text(&self.asset),
            "asset_type" => FieldValue::text(&self.asset_type),
            "fault_type" => FieldValue::text(&self.fault_type),
            "severity" => FieldValue::text(self.severity.as_str()),
            "duration" => FieldValue::Integer(i64::from(self.duration_secs)),
            "action" => FieldValue::text(&self.action),
            "status" => FieldValue::text(self.status.as_str()),
            "temperature" => FieldValue::Number(self.temperature_c),
            "current" => FieldValue::Number(self.current_a?),
            "voltage" => FieldValue::Number(self.voltage_kv?),
            "description" => FieldValue::text(&self.description),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert!("severe".parse::<Severity>().is_err());
    }

    #[test]
    fn test_duration_labels() {
        assert_eq!(format_duration(45), "45 sec");
        assert_eq!(format_duration(150), "2.5 min");
        assert_eq!(format_duration(900), "15 min");
    }

    #[test]
    fn test_missing_measurements() {
        let logs = datasets::fault_logs();
        let f003 = logs.iter().find(|f| f.id == "F003").unwrap();
        assert_eq!(f003.current_label(), "N/A");
        assert!(f003.field("current").is_none());
        assert_eq!(f003.field("severity").unwrap().to_text(), "High");
    }

    #[test]
    fn test_status_serializes_with_display_name() {
        let json = serde_json::to_string(&FaultStatus::UnderMaintenance).unwrap();
        assert_eq!(json, "\"Under Maintenance\"");
    }
}
