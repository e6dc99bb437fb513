//! # EHV UI Common
//!
//! Shared services for the EHV dashboard front ends.
//!
//! Every dashboard page is the same pattern: an immutable table of records,
//! a handful of user-chosen filters, a paginated result and some summary
//! counters over the whole table. This crate implements that pattern once,
//! generic over any [`ehv_core::Record`].
//!
//! ## Architecture
//!
//! ```text
//! ehv-cli ──► DashboardService ──► RecordView<R> ──► RecordStore<R> (ehv-core)
//!                   │
//!                   ├──► navigation (routes, detail payloads, fallbacks)
//!                   └──► timer (splash gate, refresh clock)
//! ```
//!
//! ## Core Components
//!
//! - [`DashboardService`]: stores, configuration and per-page view factories
//! - [`RecordView`]: filter, paginate, select and summarize one table
//! - [`Navigator`] / [`DetailView`]: routes and the "no data" fallback
//! - [`ScopedTimer`], [`Ticker`], [`LoadingGate`], [`RefreshClock`]: timers
//!   cancelled when their guard is dropped
//! - [`DashConfig`]: configuration in `~/.ehv/config.toml`
//!
//! ## Usage
//!
//! ```
//! use ehv_ui_common::{DashConfig, DashboardService, FilterValue};
//!
//! let service = DashboardService::with_config(DashConfig::default())?;
//! let mut faults = service.fault_view()?;
//!
//! faults.set_filter("query", FilterValue::text("xfmr"))?;
//! let page = faults.page();
//! assert_eq!(page.items.len(), 2);
//! assert_eq!(page.range_label().as_deref(), Some("Showing 1 to 2 of 2"));
//!
//! // Counters are computed over every record, not the filtered subset.
//! assert_eq!(faults.summary().unwrap().total, 8);
//! # Ok::<(), ehv_ui_common::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod navigation;
pub mod service;
pub mod timer;
pub mod view;

// Re-exports for convenience
pub use config::{DashConfig, DisplayConfig, TimerConfig, ViewConfig};
pub use error::{Error, Result};
pub use events::ViewEvent;
pub use navigation::{DetailView, Fallback, Navigation, Navigator, Payload, Route};
pub use service::{DashboardService, DashboardServiceBuilder, MaintenanceLog, SubstationDetail};
pub use timer::{LoadingGate, RefreshClock, RefreshState, ScopedTimer, Ticker};
pub use view::{
    CategoryCount, DatePreset, DateRange, FilterSchema, FilterState, FilterValue, Page,
    RecordView, SelectionPolicy, Summary,
};
