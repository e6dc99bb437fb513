use std::io;

use anyhow::Result;
use ehv_cli::common::{
    print_fallback, print_pager, print_rows, print_table, write_fallback_json, write_json,
    write_jsonl,
};
use ehv_cli::{MaintenanceArgs, OutputFormat};
use ehv_ui_common::{DashboardService, DetailView, FilterValue, Navigation, Payload, Route};
use serde_json::json;

pub fn handle(service: &DashboardService, args: &MaintenanceArgs) -> Result<()> {
    let nav = match args.asset.as_deref() {
        Some(id) => match service.asset(id) {
            Some(asset) => {
                Navigation::with_state(Route::MaintenanceLog, Payload::Asset(asset.clone()))
            }
            None => {
                tracing::warn!(asset = id, "Unknown asset, opening maintenance log without one");
                Navigation::to(Route::MaintenanceLog)
            }
        },
        None => Navigation::to(Route::MaintenanceLog),
    };

    let log = match service.maintenance_log(&nav)? {
        DetailView::Ready(log) => log,
        DetailView::Fallback(fallback) => {
            match args.format {
                OutputFormat::Table => print_fallback(&fallback),
                OutputFormat::Json | OutputFormat::Jsonl => write_fallback_json(&fallback)?,
            }
            return Ok(());
        }
    };

    let asset = log.asset;
    let mut entries = log.entries;
    if let Some(status) = args.status {
        entries.set_filter("status", FilterValue::category(status))?;
    }
    if let Some(query) = &args.query {
        entries.set_filter("query", FilterValue::text(query.as_str()))?;
    }
    entries.go_to_page(args.page);
    let page = entries.page();

    match args.format {
        OutputFormat::Json => {
            let doc = json!({
                "asset": asset,
                "counts": entries.summary(),
                "page": page,
            });
            write_json(&doc, &mut io::stdout(), true)?;
        }
        OutputFormat::Jsonl => write_jsonl(&page.items, &mut io::stdout())?,
        OutputFormat::Table => {
            println!("Maintenance log: {} ({})", asset.name, asset.id);
            let health = asset
                .health_score
                .map_or_else(|| "N/A".to_string(), |s| s.to_string());
            print_rows(&[
                format!("  Type:\t{}", asset.asset_type),
                format!("  Status:\t{}", asset.status),
                format!("  Availability:\t{}%", asset.availability_pct),
                format!("  Health score:\t{health}"),
            ])?;
            println!();

            if !page.is_empty() {
                let rows: Vec<String> = page
                    .items
                    .iter()
                    .map(|e| {
                        format!(
                            "{}\t{}\t{}\t{}\t{} h\t{}",
                            e.date,
                            e.kind,
                            e.technician,
                            e.status,
                            e.duration_hours,
                            e.cost_label()
                        )
                    })
                    .collect();
                print_table("DATE\tTYPE\tTECHNICIAN\tSTATUS\tDURATION\tCOST", &rows)?;
            }
            print_pager(&page);
        }
    }
    Ok(())
}
