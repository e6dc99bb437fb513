use anyhow::Result;
use ehv_cli::common::{print_fallback, print_rows};
use ehv_ui_common::{DashboardService, DetailView, Fallback, Navigation, Route};

pub fn handle(service: &DashboardService, path: &str) -> Result<()> {
    let route = Route::parse(path);
    tracing::debug!(path, route = %route, "Resolved route");

    let layout = if route.uses_main_layout() {
        "main"
    } else {
        "standalone"
    };
    print_rows(&[
        format!("Path:\t{}", route.path()),
        format!("Page:\t{}", route.title()),
        format!("Layout:\t{layout}"),
    ])?;
    println!();

    match &route {
        Route::NotFound(requested) => print_fallback(&Fallback::page_not_found(requested)),
        Route::Substation(id) => match service.substation_detail(id) {
            DetailView::Ready(detail) => {
                let s = &detail.substation;
                print_rows(&[
                    format!("Substation:\t{}", s.name),
                    format!("Region:\t{}", s.region),
                    format!("Voltage:\t{} kV", s.voltage),
                    format!("Status:\t{}", s.status),
                    format!("Connected lines:\t{}", detail.lines.len()),
                ])?;
            }
            DetailView::Fallback(fallback) => print_fallback(&fallback),
        },
        // A bare path carries no navigation state.
        r if r.requires_payload() => {
            if let DetailView::Fallback(fallback) =
                service.asset_details(&Navigation::to(r.clone()))
            {
                print_fallback(&fallback);
            }
        }
        _ => {}
    }
    Ok(())
}
