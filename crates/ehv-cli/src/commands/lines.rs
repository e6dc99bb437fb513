use std::io;

use anyhow::Result;
use ehv_cli::common::{print_pager, print_summary, print_table, write_json, write_jsonl};
use ehv_cli::{LineArgs, OutputFormat};
use ehv_ui_common::{DashboardService, FilterValue};
use serde_json::json;

pub fn handle(service: &DashboardService, args: &LineArgs) -> Result<()> {
    let show_percentages = service.config().read().display.show_percentages;
    let mut view = service.line_view()?;

    if let Some(voltage) = &args.voltage {
        view.set_filter("voltage", FilterValue::category(voltage))?;
    }
    if let Some(status) = args.status {
        view.set_filter("status", FilterValue::category(status))?;
    }
    view.go_to_page(args.page);

    let page = view.page();
    let endpoint = |id: u32| -> String {
        service
            .substations()
            .get(&id)
            .map_or_else(|| format!("#{id}"), |s| s.name.clone())
    };

    match args.format {
        OutputFormat::Json => {
            let doc = json!({
                "counts": view.summary(),
                "page": page,
            });
            write_json(&doc, &mut io::stdout(), true)?;
        }
        OutputFormat::Jsonl => write_jsonl(&page.items, &mut io::stdout())?,
        OutputFormat::Table => {
            if let Some(summary) = view.summary() {
                print_summary("Lines by status (all records)", &summary, show_percentages)?;
                println!();
            }
            if !page.is_empty() {
                let rows: Vec<String> = page
                    .items
                    .iter()
                    .map(|l| {
                        format!(
                            "{}\t{}\t{}\t{} kV\t{} km\t{}",
                            l.id,
                            endpoint(l.from),
                            endpoint(l.to),
                            l.voltage,
                            l.length_km,
                            l.status
                        )
                    })
                    .collect();
                print_table("ID\tFROM\tTO\tVOLTAGE\tLENGTH\tSTATUS", &rows)?;
            }
            print_pager(&page);
        }
    }
    Ok(())
}
