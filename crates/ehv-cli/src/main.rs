use anyhow::{Context, Result};
use clap::Parser;
use ehv_cli::{Cli, Commands};
use ehv_ui_common::DashboardService;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, registry::Registry, EnvFilter};

mod commands;

/// Log to stderr so table and JSON output on stdout stay clean.
///
/// `EHV_LOG` takes precedence over `RUST_LOG`, which takes precedence over
/// `--log-level`.
fn init_logging(level: tracing::Level) {
    let env_filter = EnvFilter::try_from_env("EHV_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()));

    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = Registry::default()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

fn load_service(cli: &Cli) -> Result<DashboardService> {
    let mut builder = DashboardService::builder();
    if let Some(path) = &cli.config {
        builder = builder.config_path(path);
    }
    builder.build().context("loading dashboard configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let service = load_service(&cli)?;

    match &cli.command {
        Commands::Faults(args) => commands::faults::handle(&service, args),
        Commands::Substations(args) => commands::substations::handle(&service, args),
        Commands::Lines(args) => commands::lines::handle(&service, args),
        Commands::Maintenance(args) => commands::maintenance::handle(&service, args),
        Commands::Stats { table, by, format } => {
            commands::stats::handle(&service, *table, by, *format)
        }
        Commands::Route { path } => commands::route::handle(&service, path),
    }
}
