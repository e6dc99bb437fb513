pub mod cli;
pub mod common;

pub use cli::{
    Cli, Commands, FaultArgs, LineArgs, MaintenanceArgs, StatsTable, SubstationArgs,
};
pub use common::OutputFormat;
