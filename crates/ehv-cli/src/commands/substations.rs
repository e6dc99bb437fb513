use std::io;

use anyhow::Result;
use ehv_cli::common::{print_pager, print_rows, print_summary, print_table, write_json, write_jsonl};
use ehv_cli::{OutputFormat, SubstationArgs};
use ehv_ui_common::{DashboardService, FilterValue};
use serde_json::json;

pub fn handle(service: &DashboardService, args: &SubstationArgs) -> Result<()> {
    let show_percentages = service.config().read().display.show_percentages;
    let mut view = service.substation_view()?;

    if let Some(region) = args.region {
        view.set_filter("region", FilterValue::category(region))?;
    }
    if let Some(voltage) = &args.voltage {
        view.set_filter("voltage", FilterValue::category(voltage))?;
    }
    if let Some(status) = args.status {
        view.set_filter("status", FilterValue::category(status))?;
    }
    if let Some(query) = &args.query {
        view.set_filter("query", FilterValue::text(query.as_str()))?;
    }
    view.go_to_page(args.page);

    let stats = service.grid_stats();
    let regions = service.regional_distribution();
    let page = view.page();

    match args.format {
        OutputFormat::Json => {
            let doc = json!({
                "stats": stats,
                "regions": regions,
                "page": page,
            });
            write_json(&doc, &mut io::stdout(), true)?;
        }
        OutputFormat::Jsonl => write_jsonl(&page.items, &mut io::stdout())?,
        OutputFormat::Table => {
            println!("Grid statistics");
            print_rows(&[
                format!("  Total substations:\t{}", stats.total_substations),
                format!("  Operational:\t{}", stats.operational),
                format!("  Under maintenance:\t{}", stats.under_maintenance),
                format!("  Warnings:\t{}", stats.warnings),
                format!("  Total capacity:\t{} MW", stats.total_capacity_mw),
                format!("  Average load:\t{}%", stats.avg_load_pct),
            ])?;
            println!();
            print_summary("Regional distribution", &regions, show_percentages)?;
            println!();

            println!("{} substations found", page.total_items);
            if !page.is_empty() {
                let rows: Vec<String> = page
                    .items
                    .iter()
                    .map(|s| {
                        format!(
                            "{}\t{}\t{}\t{} kV\t{}\t{} MW\t{}%\t{}",
                            s.id,
                            s.name,
                            s.region,
                            s.voltage,
                            s.status,
                            s.capacity_mw,
                            s.load_pct,
                            s.last_inspection
                        )
                    })
                    .collect();
                print_table(
                    "ID\tNAME\tREGION\tVOLTAGE\tSTATUS\tCAPACITY\tLOAD\tLAST INSPECTION",
                    &rows,
                )?;
            }
            print_pager(&page);
        }
    }
    Ok(())
}
