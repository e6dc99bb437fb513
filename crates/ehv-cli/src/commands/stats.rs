use std::io;

use anyhow::Result;
use ehv_cli::common::{print_summary, write_json, write_jsonl};
use ehv_cli::{OutputFormat, StatsTable};
use ehv_core::Record;
use ehv_ui_common::{DashboardService, RecordView, Summary};

pub fn handle(
    service: &DashboardService,
    table: StatsTable,
    by: &str,
    format: OutputFormat,
) -> Result<()> {
    let summary = match table {
        StatsTable::Faults => grouped(&service.fault_view()?, by)?,
        StatsTable::Substations => grouped(&service.substation_view()?, by)?,
        StatsTable::Lines => grouped(&service.line_view()?, by)?,
        StatsTable::Equipment => grouped(&service.equipment_view()?, by)?,
        StatsTable::Maintenance => grouped(&service.maintenance_view()?, by)?,
    };
    tracing::debug!(table = ?table, field = by, total = summary.total, "Summarized");

    match format {
        OutputFormat::Json => write_json(&summary, &mut io::stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(&summary.categories, &mut io::stdout())?,
        OutputFormat::Table => {
            let show_percentages = service.config().read().display.show_percentages;
            print_summary(
                &format!("{} records by {}", summary.total, summary.field),
                &summary,
                show_percentages,
            )?;
        }
    }
    Ok(())
}

/// The view's own ordered grouping when it matches, otherwise a plain one.
fn grouped<R: Record>(view: &RecordView<R>, by: &str) -> Result<Summary> {
    match view.summary() {
        Some(summary) if summary.field == by => Ok(summary),
        _ => Ok(view.summarize(by)?),
    }
}
