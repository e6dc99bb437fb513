//! # ehv-core: Substation Dashboard Records
//!
//! Provides the flat record types shown by the EHV dashboard together with the
//! bundled datasets and an immutable, id-indexed [`RecordStore`].
//!
//! ## Design Philosophy
//!
//! Every table in the dashboard is a sequence of flat records:
//! - **Fault logs**: protection events with severity and measurements
//! - **Substations**: grid-map markers with region, voltage class and load
//! - **Transmission lines**: corridors between substations
//! - **Maintenance history**: work orders for a single asset
//! - **Equipment**: the daily availability registry
//!
//! Each type implements [`Record`], which exposes its identifier and its fields
//! by name. Views in `ehv-ui-common` filter, group and paginate any `Record`
//! without knowing its concrete shape.
//!
//! ## Quick Start
//!
//! ```rust
//! use ehv_core::{datasets, Record, Severity};
//!
//! let store = datasets::fault_store().unwrap();
//! let high = store
//!     .iter()
//!     .filter(|f| f.severity == Severity::High)
//!     .count();
//! assert_eq!(high, 3);
//!
//! let first = &store.get_all()[0];
//! assert_eq!(first.id(), "F001");
//! ```

pub mod datasets;
pub mod equipment;
pub mod error;
pub mod fault;
pub mod grid;
pub mod maintenance;
pub mod record;
pub mod store;

pub use equipment::{Equipment, EquipmentStatus, HealthBand};
pub use error::{Error, Result};
pub use fault::{FaultLog, FaultStatus, Severity};
pub use grid::{Coordinates, GridStats, Region, Substation, SubstationStatus, TransmissionLine};
pub use maintenance::{MaintenanceEntry, MaintenanceStatus};
pub use record::{FieldValue, Record};
pub use store::RecordStore;
