//! Main dashboard service entry point.
//!
//! The [`DashboardService`] owns the shared record stores and the
//! configuration, and hands out freshly-initialized views for each page.

use std::path::PathBuf;
use std::sync::Arc;

use ehv_core::{
    datasets, Equipment, FaultLog, GridStats, MaintenanceEntry, MaintenanceStatus, Record,
    RecordStore, Region, Severity, Substation, SubstationStatus, TransmissionLine,
};
use parking_lot::RwLock;

use crate::config::DashConfig;
use crate::error::Result;
use crate::navigation::{require_asset, DetailView, Fallback, Navigation};
use crate::timer::{LoadingGate, RefreshClock};
use crate::view::{stats, RecordView, Summary};

/// Maintenance history opened for one asset.
pub struct MaintenanceLog {
    pub asset: Equipment,
    pub entries: RecordView<MaintenanceEntry>,
}

/// A substation together with the lines that end at it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstationDetail {
    pub substation: Substation,
    pub lines: Vec<TransmissionLine>,
}

/// Main service coordinating all dashboard data.
///
/// Stores are loaded once and shared by every view through `Arc`, so each
/// page gets its own filter, page and selection state over the same records.
///
/// # Example
///
/// ```
/// use ehv_ui_common::{DashConfig, DashboardService, FilterValue};
///
/// let service = DashboardService::with_config(DashConfig::default()).unwrap();
/// let mut faults = service.fault_view().unwrap();
/// faults.set_filter("severity", FilterValue::category("High")).unwrap();
/// assert_eq!(faults.filtered_count(), 3);
/// ```
pub struct DashboardService {
    config: Arc<RwLock<DashConfig>>,
    faults: Arc<RecordStore<FaultLog>>,
    substations: Arc<RecordStore<Substation>>,
    lines: Arc<RecordStore<TransmissionLine>>,
    maintenance: Arc<RecordStore<MaintenanceEntry>>,
    equipment: Arc<RecordStore<Equipment>>,
}

impl DashboardService {
    /// Create a service with configuration from `~/.ehv/config.toml`, or
    /// defaults if that file does not exist.
    pub fn new() -> Result<Self> {
        Self::with_config(DashConfig::load()?)
    }

    pub fn builder() -> DashboardServiceBuilder {
        DashboardServiceBuilder::new()
    }

    /// Create a service with the provided configuration.
    pub fn with_config(config: DashConfig) -> Result<Self> {
        config.validate()?;

        let service = Self {
            config: Arc::new(RwLock::new(config)),
            faults: Arc::new(datasets::fault_store()?),
            substations: Arc::new(datasets::substation_store()?),
            lines: Arc::new(datasets::line_store()?),
            maintenance: Arc::new(datasets::maintenance_store()?),
            equipment: Arc::new(datasets::equipment_store()?),
        };

        tracing::info!(
            faults = service.faults.len(),
            substations = service.substations.len(),
            lines = service.lines.len(),
            maintenance = service.maintenance.len(),
            equipment = service.equipment.len(),
            "Dashboard service started"
        );
        Ok(service)
    }

    /// Get the configuration.
    pub fn config(&self) -> &Arc<RwLock<DashConfig>> {
        &self.config
    }

    /// Save the current configuration to the default location.
    pub fn save_config(&self) -> Result<()> {
        self.config.read().save()
    }

    pub fn faults(&self) -> &Arc<RecordStore<FaultLog>> {
        &self.faults
    }

    pub fn substations(&self) -> &Arc<RecordStore<Substation>> {
        &self.substations
    }

    pub fn lines(&self) -> &Arc<RecordStore<TransmissionLine>> {
        &self.lines
    }

    pub fn maintenance(&self) -> &Arc<RecordStore<MaintenanceEntry>> {
        &self.maintenance
    }

    pub fn equipment(&self) -> &Arc<RecordStore<Equipment>> {
        &self.equipment
    }

    /// Look up an asset in the equipment registry.
    pub fn asset(&self, id: &str) -> Option<&Equipment> {
        self.equipment.get(&id.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────

    /// Fault log table: `query`, `severity` and `period` filters, counts by
    /// severity.
    pub fn fault_view(&self) -> Result<RecordView<FaultLog>> {
        let cfg = self.config.read();
        RecordView::builder("faults", Arc::clone(&self.faults))
            .search("query", &FaultLog::SEARCH_FIELDS)
            .category("severity", "severity")
            .date_range("period", "timestamp")
            .page_size(cfg.views.fault_page_size)
            .group_by_ordered("severity", &Severity::ALL.map(|s| s.as_str()))
            .selection_policy(cfg.views.selection_policy)
            .build()
    }

    /// Grid map table: `query`, `region`, `voltage` and `status` filters,
    /// counts by region.
    pub fn substation_view(&self) -> Result<RecordView<Substation>> {
        let cfg = self.config.read();
        RecordView::builder("substations", Arc::clone(&self.substations))
            .search("query", &Substation::SEARCH_FIELDS)
            .category("region", "region")
            .category("voltage", "voltage")
            .category("status", "status")
            .page_size(cfg.views.substation_page_size)
            .group_by_ordered("region", &Region::ALL.map(|r| r.as_str()))
            .selection_policy(cfg.views.selection_policy)
            .build()
    }

    /// Transmission line table: `voltage` and `status` filters.
    pub fn line_view(&self) -> Result<RecordView<TransmissionLine>> {
        let cfg = self.config.read();
        RecordView::builder("lines", Arc::clone(&self.lines))
            .category("voltage", "voltage")
            .category("status", "status")
            .page_size(cfg.views.line_page_size)
            .group_by_ordered("status", &SubstationStatus::ALL.map(|s| s.as_str()))
            .selection_policy(cfg.views.selection_policy)
            .build()
    }

    /// Asset health registry: `query` and `status` filters.
    pub fn equipment_view(&self) -> Result<RecordView<Equipment>> {
        let cfg = self.config.read();
        RecordView::builder("equipment", Arc::clone(&self.equipment))
            .search("query", &["id", "name", "asset_type"])
            .category("status", "status")
            .page_size(cfg.views.equipment_page_size)
            .group_by("status")
            .selection_policy(cfg.views.selection_policy)
            .build()
    }

    /// Maintenance history: `query`, `status` and `period` filters.
    pub fn maintenance_view(&self) -> Result<RecordView<MaintenanceEntry>> {
        let cfg = self.config.read();
        RecordView::builder("maintenance", Arc::clone(&self.maintenance))
            .search("query", &MaintenanceEntry::SEARCH_FIELDS)
            .category("status", "status")
            .date_range("period", "date")
            .page_size(cfg.views.maintenance_page_size)
            .group_by_ordered("status", &MaintenanceStatus::ALL.map(|s| s.as_str()))
            .selection_policy(cfg.views.selection_policy)
            .build()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Detail pages
    // ─────────────────────────────────────────────────────────────────────

    /// Maintenance log page. Needs an asset payload; without one the page
    /// falls back to "No Asset Data".
    pub fn maintenance_log(&self, nav: &Navigation) -> Result<DetailView<MaintenanceLog>> {
        match require_asset(nav) {
            DetailView::Ready(asset) => Ok(DetailView::Ready(MaintenanceLog {
                asset,
                entries: self.maintenance_view()?,
            })),
            DetailView::Fallback(fallback) => Ok(DetailView::Fallback(fallback)),
        }
    }

    /// Asset details page.
    pub fn asset_details(&self, nav: &Navigation) -> DetailView<Equipment> {
        require_asset(nav)
    }

    /// Substation page for the id taken from its path. Ids that are not
    /// numeric or not on the grid fall back to the grid map.
    pub fn substation_detail(&self, id: &str) -> DetailView<SubstationDetail> {
        let found = id
            .parse::<u32>()
            .ok()
            .and_then(|n| self.substations.get(&n));
        match found {
            Some(substation) => DetailView::Ready(SubstationDetail {
                substation: substation.clone(),
                lines: self
                    .lines
                    .iter()
                    .filter(|l| l.touches(substation.id))
                    .cloned()
                    .collect(),
            }),
            None => {
                tracing::warn!(id, "Unknown substation");
                DetailView::Fallback(Fallback::unknown_substation(id))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Statistics
    // ─────────────────────────────────────────────────────────────────────

    /// Headline grid figures over every substation.
    pub fn grid_stats(&self) -> GridStats {
        GridStats::compute(self.substations.iter())
    }

    /// Substation count and share per region.
    pub fn regional_distribution(&self) -> Summary {
        stats::summarize_ordered(
            self.substations.iter(),
            "region",
            &Region::ALL.map(|r| r.as_str()),
        )
    }

    /// Mean of a numeric field across a store.
    pub fn mean_of<R: Record>(store: &RecordStore<R>, field: &str) -> Option<f64> {
        stats::mean(store.iter(), field)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Timers
    // ─────────────────────────────────────────────────────────────────────

    /// Splash gate using the configured delay. Needs a tokio runtime.
    pub fn loading_gate(&self) -> Result<LoadingGate> {
        LoadingGate::start(self.config.read().timers.splash_delay())
    }

    /// Refresh clock for the reports page, auto-refreshing if configured.
    /// Needs a tokio runtime.
    pub fn refresh_clock(&self) -> Result<RefreshClock> {
        let timers = self.config.read().timers.clone();
        let mut clock = RefreshClock::new(timers.manual_refresh_delay());
        if timers.auto_refresh {
            clock.start_auto(timers.auto_refresh_period())?;
        }
        Ok(clock)
    }
}

/// Builder for configuring a [`DashboardService`].
#[derive(Debug, Default)]
pub struct DashboardServiceBuilder {
    config: Option<DashConfig>,
    config_path: Option<PathBuf>,
}

impl DashboardServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific configuration.
    pub fn config(mut self, config: DashConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from a specific path.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<DashboardService> {
        let config = if let Some(cfg) = self.config {
            cfg
        } else if let Some(path) = self.config_path {
            DashConfig::load_from(&path)?
        } else {
            DashConfig::load()?
        };

        DashboardService::with_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{Payload, Route};
    use crate::view::{FilterValue, SelectionPolicy};
    use tempfile::NamedTempFile;

    fn service() -> DashboardService {
        DashboardService::with_config(DashConfig::default()).unwrap()
    }

    #[test]
    fn test_fault_view_uses_configured_page_size() {
        let view = service().fault_view().unwrap();
        assert_eq!(view.page_size().get(), 5);
        assert_eq!(view.page().items.len(), 5);
        let counts: Vec<usize> = view.summary().unwrap().iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![1, 3, 2, 2]);
    }

    #[test]
    fn test_equipment_view_has_its_own_page_size() {
        let mut config = DashConfig::default();
        config.views.equipment_page_size = 2;
        config.views.line_page_size = 7;
        let service = DashboardService::with_config(config).unwrap();

        let equipment = service.equipment_view().unwrap();
        assert_eq!(equipment.page_size().get(), 2);
        assert_eq!(equipment.page().total_pages, 3);
        assert_eq!(service.line_view().unwrap().page_size().get(), 7);
    }

    #[test]
    fn test_views_are_independent() {
        let service = service();
        let mut a = service.fault_view().unwrap();
        let b = service.fault_view().unwrap();
        a.set_filter("severity", FilterValue::category("Low")).unwrap();
        assert_eq!(a.filtered_count(), 2);
        assert_eq!(b.filtered_count(), 8);
    }

    #[test]
    fn test_substation_filters_combine() {
        let mut view = service().substation_view().unwrap();
        view.set_filter("region", FilterValue::category(Region::Eastern))
            .unwrap();
        assert_eq!(view.filtered_count(), 3);
        view.set_filter("voltage", FilterValue::category("220")).unwrap();
        let names: Vec<&str> = view.filtered().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bhubaneswar East 220 kV"]);
    }

    #[test]
    fn test_line_view_status_filter() {
        let mut view = service().line_view().unwrap();
        view.set_filter("status", FilterValue::category("maintenance"))
            .unwrap();
        let ids: Vec<&str> = view.filtered().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["9-10"]);
    }

    #[test]
    fn test_maintenance_log_without_asset_falls_back() {
        let service = service();
        let page = service
            .maintenance_log(&Navigation::to(Route::MaintenanceLog))
            .unwrap();
        let fallback = page.fallback().unwrap();
        assert_eq!(fallback.title, "No Asset Data");
        assert_eq!(fallback.recovery, Route::AssetHealth);
    }

    #[test]
    fn test_maintenance_log_with_asset() {
        let service = service();
        let asset = service.asset("XFMR_400_1").unwrap().clone();
        let nav = Navigation::with_state(Route::MaintenanceLog, Payload::Asset(asset));
        let page = service.maintenance_log(&nav).unwrap();
        let log = page.ready().unwrap();
        assert_eq!(log.asset.id, "XFMR_400_1");
        assert_eq!(log.entries.filtered_count(), 4);
    }

    #[test]
    fn test_substation_detail() {
        let service = service();
        let detail = service.substation_detail("1");
        let ready = detail.ready().unwrap();
        assert_eq!(ready.substation.name, "Kolkata 400/220 kV");
        let ids: Vec<&str> = ready.lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1-4", "1-11"]);

        let missing = service.substation_detail("99");
        assert_eq!(missing.fallback().unwrap().recovery, Route::GridMap);

        let garbled = service.substation_detail("abc");
        let fallback = garbled.fallback().unwrap();
        assert_eq!(fallback.title, "Substation Not Found");
        assert_eq!(fallback.page, Route::Substation("abc".into()));
        assert_eq!(fallback.recovery, Route::GridMap);
    }

    #[test]
    fn test_grid_figures() {
        let service = service();
        let stats = service.grid_stats();
        assert_eq!(stats.total_substations, 12);
        assert_eq!(stats.avg_load_pct, 84);

        let regions = service.regional_distribution();
        assert_eq!(regions.total, 12);
        assert!(regions.iter().all(|c| c.count == 3 && c.percent == 25));

        let mean = DashboardService::mean_of(service.substations(), "capacity").unwrap();
        assert_eq!(mean.round(), 1425.0);
    }

    #[test]
    fn test_builder_reads_config_path() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "[views]\nfault_page_size = 3\nselection_policy = \"persist\"\n",
        )
        .unwrap();

        let service = DashboardService::builder()
            .config_path(file.path())
            .build()
            .unwrap();
        let view = service.fault_view().unwrap();
        assert_eq!(view.page_size().get(), 3);
        assert_eq!(view.selection_policy(), SelectionPolicy::Persist);
        assert_eq!(view.total_pages(), 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = DashConfig::default();
        config.views.fault_page_size = 0;
        assert!(DashboardService::builder().config(config).build().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_clock_follows_config() {
        let service = service();
        let clock = service.refresh_clock().unwrap();
        assert!(clock.is_auto());

        service.config().write().timers.auto_refresh = false;
        let clock = service.refresh_clock().unwrap();
        assert!(!clock.is_auto());
    }
}
