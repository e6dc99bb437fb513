//! Bundled datasets shown by the dashboard.
//!
//! The records are built once on first access and shared for the life of the
//! process. Use the `*_store` helpers to get an indexed [`RecordStore`].

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use crate::equipment::{Equipment, EquipmentStatus};
use crate::error::Result;
use crate::fault::{FaultLog, FaultStatus, Severity};
use crate::grid::{Coordinates, Region, Substation, SubstationStatus, TransmissionLine};
use crate::maintenance::{MaintenanceEntry, MaintenanceStatus};
use crate::store::RecordStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, mi, s).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn fault(
    id: &str,
    timestamp: NaiveDateTime,
    asset: &str,
    asset_type: &str,
    fault_type: &str,
    severity: Severity,
    duration_secs: u32,
    action: &str,
    status: FaultStatus,
    temperature_c: f64,
    current_a: Option<f64>,
    voltage_kv: Option<f64>,
    description: &str,
) -> FaultLog {
    FaultLog {
        id: id.to_string(),
        timestamp,
        asset: asset.to_string(),
        asset_type: asset_type.to_string(),
        fault_type: fault_type.to_string(),
        severity,
        duration_secs,
        action: action.to_string(),
        status,
        temperature_c,
        current_a,
        voltage_kv,
        description: description.to_string(),
    }
}

static FAULT_LOGS: Lazy<Vec<FaultLog>> = Lazy::new(|| {
    use FaultStatus::*;
    use Severity::*;
    vec![
        fault(
            "F001",
            at(2024, 1, 15, 14, 23, 45),
            "XFMR_400_1",
            "Transformer",
            "Over Temperature",
            High,
            150,
            "Auto Shutdown",
            Resolved,
            85.0,
            Some(1250.0),
            Some(398.0),
            "Winding temperature exceeded safe limit. System initiated automatic shutdown.",
        ),
        fault(
            "F002",
            at(2024, 1, 15, 12, 15, 30),
            "LINE_400_1",
            "Transmission Line",
            "Phase Loss",
            Critical,
            45,
            "Breaker Trip",
            Resolved,
            45.0,
            Some(0.0),
            Some(0.0),
            "Phase loss detected on Line 1. Protection relay triggered breaker trip.",
        ),
        fault(
            "F003",
            at(2024, 1, 14, 18, 45, 12),
            "BREAKER_400_2",
            "Circuit Breaker",
            "Mechanical Failure",
            High,
            900,
            "Manual Intervention",
            UnderMaintenance,
            65.0,
            None,
            None,
            "Mechanical linkage failure detected. Breaker failed to trip automatically.",
        ),
        fault(
            "F004",
            at(2024, 1, 14, 9, 30, 22),
            "BUS_400_1",
            "Busbar",
            "Voltage Dip",
            Medium,
            30,
            "Auto Recovery",
            Resolved,
            55.0,
            Some(1350.0),
            Some(380.0),
            "Voltage dip detected. Automatic voltage regulation system engaged.",
        ),
        fault(
            "F005",
            at(2024, 1, 13, 22, 10, 5),
            "XFMR_400_2",
            "Transformer",
            "Oil Level Low",
            Medium,
            300,
            "Alarm Only",
            Resolved,
            70.0,
            Some(1100.0),
            Some(395.0),
            "Transformer oil level dropped below threshold. Warning alarm triggered.",
        ),
        fault(
            "F006",
            at(2024, 1, 13, 15, 20, 18),
            "CT_400_1",
            "Current Transformer",
            "Calibration Drift",
            Low,
            600,
            "Alarm Only",
            Resolved,
            40.0,
            None,
            None,
            "CT calibration out of tolerance. Scheduled for recalibration.",
        ),
        fault(
            "F007",
            at(2024, 1, 12, 8, 45, 33),
            "CVT_400_1",
            "Capacitor VT",
            "Capacitance Loss",
            Low,
            120,
            "Auto Bypass",
            Resolved,
            50.0,
            None,
            None,
            "Partial capacitance loss detected. Backup system engaged.",
        ),
        fault(
            "F008",
            at(2024, 1, 11, 21, 30, 47),
            "REACTOR_400_1",
            "Reactor",
            "Over Current",
            High,
            90,
            "Load Shedding",
            Resolved,
            75.0,
            Some(1500.0),
            Some(400.0),
            "Reactor current exceeded rated capacity. Load shedding initiated.",
        ),
    ]
});

#[allow(clippy::too_many_arguments)]
fn substation(
    id: u32,
    name: &str,
    region: Region,
    voltage: &str,
    (lat, lon): (f64, f64),
    status: SubstationStatus,
    capacity_mw: f64,
    load_pct: f64,
    assets: u32,
    last_inspection: NaiveDate,
) -> Substation {
    Substation {
        id,
        name: name.to_string(),
        region,
        voltage: voltage.to_string(),
        coordinates: Coordinates { lat, lon },
        status,
        capacity_mw,
        load_pct,
        assets,
        last_inspection,
    }
}

static SUBSTATIONS: Lazy<Vec<Substation>> = Lazy::new(|| {
    use Region::*;
    use SubstationStatus::*;
    vec![
        substation(1, "Kolkata 400/220 kV", Eastern, "400/220", (22.5726, 88.3639), Operational, 2000.0, 85.0, 45, date(2024, 1, 15)),
        substation(2, "Delhi North 400 kV", Northern, "400", (28.7041, 77.1025), Operational, 2500.0, 92.0, 52, date(2024, 1, 10)),
        substation(3, "Mumbai West 400/220 kV", Western, "400/220", (19.0760, 72.8777), Maintenance, 1800.0, 78.0, 38, date(2024, 1, 5)),
        substation(4, "Chennai South 400 kV", Southern, "400", (13.0827, 80.2707), Operational, 1500.0, 88.0, 42, date(2024, 1, 12)),
        substation(5, "Bangalore East 220 kV", Southern, "220", (12.9716, 77.5946), Operational, 1200.0, 95.0, 35, date(2024, 1, 8)),
        substation(6, "Hyderabad Central 400/220 kV", Southern, "400/220", (17.3850, 78.4867), Warning, 1600.0, 82.0, 40, date(2024, 1, 14)),
        substation(7, "Ahmedabad North 400 kV", Western, "400", (23.0225, 72.5714), Operational, 1400.0, 75.0, 36, date(2024, 1, 3)),
        substation(8, "Pune Industrial 220 kV", Western, "220", (18.5204, 73.8567), Operational, 1000.0, 90.0, 32, date(2024, 1, 7)),
        substation(9, "Jaipur South 400 kV", Northern, "400", (26.9124, 75.7873), Operational, 1300.0, 80.0, 34, date(2024, 1, 9)),
        substation(10, "Lucknow Central 220 kV", Northern, "220", (26.8467, 80.9462), Maintenance, 900.0, 65.0, 28, date(2024, 1, 2)),
        substation(11, "Patna Grid 400/220 kV", Eastern, "400/220", (25.5941, 85.1376), Operational, 1100.0, 88.0, 33, date(2024, 1, 11)),
        substation(12, "Bhubaneswar East 220 kV", Eastern, "220", (20.2961, 85.8245), Warning, 800.0, 92.0, 30, date(2024, 1, 6)),
    ]
});

static TRANSMISSION_LINES: Lazy<Vec<TransmissionLine>> = Lazy::new(|| {
    use SubstationStatus::*;
    vec![
        TransmissionLine::new(1, 4, "400", 1200.0, Operational),
        TransmissionLine::new(2, 3, "400", 1400.0, Operational),
        TransmissionLine::new(2, 9, "400", 250.0, Operational),
        TransmissionLine::new(3, 6, "400", 700.0, Operational),
        TransmissionLine::new(4, 5, "220", 300.0, Operational),
        TransmissionLine::new(4, 6, "400", 600.0, Operational),
        TransmissionLine::new(6, 8, "220", 500.0, Operational),
        TransmissionLine::new(7, 8, "220", 150.0, Operational),
        TransmissionLine::new(9, 10, "220", 350.0, Maintenance),
        TransmissionLine::new(1, 11, "400", 450.0, Operational),
        TransmissionLine::new(11, 12, "220", 200.0, Operational),
    ]
});

static MAINTENANCE_HISTORY: Lazy<Vec<MaintenanceEntry>> = Lazy::new(|| {
    let entry = |id, date, kind: &str, technician: &str, status, description: &str, duration_hours, cost_inr| {
        MaintenanceEntry {
            id,
            date,
            kind: kind.to_string(),
            technician: technician.to_string(),
            status,
            description: description.to_string(),
            duration_hours,
            cost_inr,
        }
    };
    vec![
        entry(
            1,
            date(2024, 1, 15),
            "Routine Inspection",
            "Rajesh Kumar",
            MaintenanceStatus::Completed,
            "Regular quarterly inspection and testing performed. All parameters checked and found within normal limits.",
            4.0,
            15_000,
        ),
        entry(
            2,
            date(2023, 10, 20),
            "Preventive Maintenance",
            "Amit Sharma",
            MaintenanceStatus::Completed,
            "Scheduled maintenance work including contact inspection and mechanism lubrication.",
            6.0,
            25_000,
        ),
        entry(
            3,
            date(2023, 7, 5),
            "Gas Top-up",
            "Suresh Patel",
            MaintenanceStatus::Completed,
            "SF6 gas pressure maintenance and leak testing performed.",
            3.0,
            12_000,
        ),
        entry(
            4,
            date(2024, 2, 20),
            "Scheduled Maintenance",
            "Pending",
            MaintenanceStatus::Scheduled,
            "Next scheduled maintenance including comprehensive testing.",
            8.0,
            30_000,
        ),
    ]
});

static EQUIPMENT: Lazy<Vec<Equipment>> = Lazy::new(|| {
    let item = |id: &str, name: &str, asset_type: &str, availability_pct, load_pct, operations, status| {
        Equipment {
            id: id.to_string(),
            name: name.to_string(),
            asset_type: asset_type.to_string(),
            availability_pct,
            load_pct,
            operations,
            status,
            health_score: None,
        }
    };
    vec![
        item("XFMR_400_1", "400/220 kV Transformer 1", "Transformer", 100.0, Some(78.0), None, EquipmentStatus::Normal),
        item("XFMR_400_2", "400/220 kV Transformer 2", "Transformer", 100.0, Some(82.0), None, EquipmentStatus::Normal),
        item("BREAKER_400_1", "400 kV Circuit Breaker 1", "Circuit Breaker", 100.0, None, Some(12), EquipmentStatus::Normal),
        item("BREAKER_400_2", "400 kV Circuit Breaker 2", "Circuit Breaker", 95.0, None, Some(8), EquipmentStatus::Maintenance),
        item("LINE_400_1", "400 kV Line 1", "Transmission Line", 100.0, Some(65.0), None, EquipmentStatus::Normal),
    ]
});

/// The eight bundled fault events, newest first.
pub fn fault_logs() -> &'static [FaultLog] {
    &FAULT_LOGS
}

pub fn substations() -> &'static [Substation] {
    &SUBSTATIONS
}

pub fn transmission_lines() -> &'static [TransmissionLine] {
    &TRANSMISSION_LINES
}

/// Maintenance history shown for any asset opened from the asset-health page.
pub fn maintenance_history() -> &'static [MaintenanceEntry] {
    &MAINTENANCE_HISTORY
}

pub fn equipment() -> &'static [Equipment] {
    &EQUIPMENT
}

pub fn fault_store() -> Result<RecordStore<FaultLog>> {
    RecordStore::new(fault_logs().to_vec())
}

pub fn substation_store() -> Result<RecordStore<Substation>> {
    RecordStore::new(substations().to_vec())
}

pub fn line_store() -> Result<RecordStore<TransmissionLine>> {
    RecordStore::new(transmission_lines().to_vec())
}

pub fn maintenance_store() -> Result<RecordStore<MaintenanceEntry>> {
    RecordStore::new(maintenance_history().to_vec())
}

pub fn equipment_store() -> Result<RecordStore<Equipment>> {
    RecordStore::new(equipment().to_vec())
}
