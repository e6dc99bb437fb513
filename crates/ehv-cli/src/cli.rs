use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use ehv_core::{MaintenanceStatus, Region, Severity, SubstationStatus};
use ehv_ui_common::DatePreset;
use std::path::PathBuf;

use crate::common::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ehv", author, version, about = "EHV substation and grid dashboard", long_about = None)]
pub struct Cli {
    /// Set the logging level (overridden by EHV_LOG or RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: tracing::Level,

    /// Configuration file (defaults to ~/.ehv/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fault log with severity counters
    Faults(FaultArgs),
    /// Substations with grid statistics and regional distribution
    Substations(SubstationArgs),
    /// Transmission lines between substations
    Lines(LineArgs),
    /// Maintenance history for an asset
    Maintenance(MaintenanceArgs),
    /// Grouped counts for any field of a table
    Stats {
        /// Table to summarize
        #[arg(value_enum)]
        table: StatsTable,
        /// Field to group by
        #[arg(long)]
        by: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Resolve a dashboard route path
    Route {
        /// Path such as /grid-map or /substation/3
        path: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FaultArgs {
    /// Only faults of this severity (Critical, High, Medium, Low)
    #[arg(long)]
    pub severity: Option<Severity>,

    /// Search asset, fault type and description
    #[arg(long, short)]
    pub query: Option<String>,

    /// Trailing window ending at the newest fault (1d, 7d, 30d, 90d)
    #[arg(long)]
    pub range: Option<DatePreset>,

    /// Page to show (clamped to the available pages)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Show the detail panel for this fault id
    #[arg(long)]
    pub select: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct SubstationArgs {
    /// Only substations in this region
    #[arg(long)]
    pub region: Option<Region>,

    /// Only this voltage class (400, 220, 400/220)
    #[arg(long)]
    pub voltage: Option<String>,

    /// Only this status (operational, maintenance, warning)
    #[arg(long)]
    pub status: Option<SubstationStatus>,

    /// Search name and region
    #[arg(long, short)]
    pub query: Option<String>,

    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct LineArgs {
    /// Only lines of this voltage (400, 220)
    #[arg(long)]
    pub voltage: Option<String>,

    /// Only lines with this status
    #[arg(long)]
    pub status: Option<SubstationStatus>,

    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct MaintenanceArgs {
    /// Asset id from the equipment registry, e.g. XFMR_400_1
    #[arg(long)]
    pub asset: Option<String>,

    /// Only entries with this status (completed, scheduled)
    #[arg(long)]
    pub status: Option<MaintenanceStatus>,

    /// Search type, technician and description
    #[arg(long, short)]
    pub query: Option<String>,

    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatsTable {
    Faults,
    Substations,
    Lines,
    Maintenance,
    Equipment,
}
