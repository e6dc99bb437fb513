//! Maintenance work orders.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::record::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Completed,
    Scheduled,
}

impl MaintenanceStatus {
    pub const ALL: [MaintenanceStatus; 2] =
        [MaintenanceStatus::Completed, MaintenanceStatus::Scheduled];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaintenanceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaintenanceStatus::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown("maintenance status", s))
    }
}

/// One entry of an asset's maintenance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    pub id: u32,
    pub date: NaiveDate,
    /// Work type, e.g. "Routine Inspection".
    pub kind: String,
    /// Assigned technician, "Pending" until scheduled work is staffed.
    pub technician: String,
    pub status: MaintenanceStatus,
    pub description: String,
    pub duration_hours: f64,
    /// Cost in whole rupees.
    pub cost_inr: u32,
}

impl MaintenanceEntry {
    pub const SEARCH_FIELDS: [&'static str; 3] = ["kind", "technician", "description"];

    /// Cost with Indian digit grouping, e.g. "₹15,000".
    pub fn cost_label(&self) -> String {
        format!("₹{}", group_indian(self.cost_inr))
    }
}

/// Group digits as lakh/crore: last three, then pairs.
fn group_indian(n: u32) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

impl Record for MaintenanceEntry {
    type Id = u32;

    const FIELDS: &'static [&'static str] = &[
        "id",
        "date",
        "kind",
        "technician",
        "status",
        "description",
        "duration",
        "cost",
    ];

    fn id(&self) -> &u32 {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Integer(i64::from(self.id)),
            "date" => FieldValue::Date(self.date),
            "kind" => FieldValue::text(&self.kind),
            "technician" => FieldValue::text(&self.technician),
            "status" => FieldValue::text(self.status.as_str()),
            "description" => FieldValue::text(&self.description),
            "duration" => FieldValue::Number(self.duration_hours),
            "cost" => FieldValue::Integer(i64::from(self.cost_inr)),
            _ => return None,
        })
    }
}
