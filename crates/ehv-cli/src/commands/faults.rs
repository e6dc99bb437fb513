use std::io;

use anyhow::{Context, Result};
use ehv_cli::common::{
    print_pager, print_rows, print_summary, print_table, write_json, write_jsonl,
};
use ehv_cli::{FaultArgs, OutputFormat};
use ehv_core::FaultLog;
use ehv_ui_common::{DashboardService, FilterValue};
use serde_json::json;

/// Faults sharing the selected fault's asset, as in the detail panel.
const RELATED_LIMIT: usize = 2;

pub fn handle(service: &DashboardService, args: &FaultArgs) -> Result<()> {
    let display = service.config().read().display.clone();
    let mut view = service.fault_view()?;

    // Select before filtering so the selection policy sees the filter change.
    if let Some(id) = &args.select {
        view.toggle_selection(id)
            .with_context(|| format!("selecting fault {id}"))?;
    }
    if let Some(severity) = args.severity {
        view.set_filter("severity", FilterValue::category(severity))?;
    }
    if let Some(query) = &args.query {
        view.set_filter("query", FilterValue::text(query.as_str()))?;
    }
    if let Some(preset) = args.range {
        view.set_preset("period", preset, None)?;
    }
    view.go_to_page(args.page);

    let summary = view.summary().context("fault view has no grouping")?;
    let page = view.page();
    let selected = view.selected();
    let related = view.related_to_selected("asset", RELATED_LIMIT);

    match args.format {
        OutputFormat::Json => {
            let doc = json!({
                "counts": summary,
                "page": page,
                "selected": selected,
                "related": related,
            });
            write_json(&doc, &mut io::stdout(), true)?;
        }
        OutputFormat::Jsonl => write_jsonl(&page.items, &mut io::stdout())?,
        OutputFormat::Table => {
            print_summary(
                "Faults by severity (all records)",
                &summary,
                display.show_percentages,
            )?;
            println!();

            if !page.is_empty() {
                let rows: Vec<String> = page
                    .items
                    .iter()
                    .map(|f| {
                        format!(
                            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                            f.id,
                            f.timestamp.format(&display.date_format),
                            f.asset,
                            f.fault_type,
                            f.severity,
                            f.duration_label(),
                            f.status
                        )
                    })
                    .collect();
                print_table(
                    "ID\tTIMESTAMP\tASSET\tFAULT TYPE\tSEVERITY\tDURATION\tSTATUS",
                    &rows,
                )?;
            }
            print_pager(&page);

            if let Some(fault) = selected {
                println!();
                print_detail(fault, &display.date_format, &related)?;
            }
        }
    }
    Ok(())
}

fn print_detail(fault: &FaultLog, date_format: &str, related: &[&FaultLog]) -> Result<()> {
    println!("Fault {}", fault.id);
    let fields = [
        format!("  Timestamp:\t{}", fault.timestamp.format(date_format)),
        format!("  Asset:\t{} ({})", fault.asset, fault.asset_type),
        format!("  Fault type:\t{}", fault.fault_type),
        format!("  Severity:\t{}", fault.severity),
        format!("  Duration:\t{}", fault.duration_label()),
        format!("  Action:\t{}", fault.action),
        format!("  Status:\t{}", fault.status),
        format!("  Temperature:\t{}", fault.temperature_label()),
        format!("  Current:\t{}", fault.current_label()),
        format!("  Voltage:\t{}", fault.voltage_label()),
        format!("  Description:\t{}", fault.description),
    ];
    print_rows(&fields)?;

    if related.is_empty() {
        println!("Related faults: none");
    } else {
        println!("Related faults:");
        for other in related {
            println!("  {} {} {}", other.id, other.fault_type, other.severity);
        }
    }
    Ok(())
}
