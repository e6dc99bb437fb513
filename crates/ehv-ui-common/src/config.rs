//! Dashboard configuration.
//!
//! [`DashConfig`] is stored in `~/.ehv/config.toml`. Every section is
//! optional; unspecified values fall back to the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::view::SelectionPolicy;

/// Main configuration for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Page sizes and selection behaviour of the record views.
    pub views: ViewConfig,

    /// Splash and refresh timers.
    pub timers: TimerConfig,

    /// Output formatting.
    pub display: DisplayConfig,
}

/// Record view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub fault_page_size: usize,
    pub substation_page_size: usize,
    pub maintenance_page_size: usize,
    pub line_page_size: usize,
    pub equipment_page_size: usize,

    /// What happens to the selected record when a filter hides it.
    pub selection_policy: SelectionPolicy,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fault_page_size: 5,
            substation_page_size: 12,
            maintenance_page_size: 10,
            line_page_size: 10,
            equipment_page_size: 10,
            selection_policy: SelectionPolicy::default(),
        }
    }
}

/// Timer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Splash screen duration before the home page renders.
    pub splash_delay_ms: u64,

    /// Refresh the reports page automatically.
    pub auto_refresh: bool,

    /// Auto-refresh period.
    pub auto_refresh_secs: u64,

    /// Simulated latency of a manual refresh.
    pub manual_refresh_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            splash_delay_ms: 500,
            auto_refresh: true,
            auto_refresh_secs: 5,
            manual_refresh_ms: 1000,
        }
    }
}

impl TimerConfig {
    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }

    pub fn auto_refresh_period(&self) -> Duration {
        Duration::from_secs(self.auto_refresh_secs)
    }

    pub fn manual_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.manual_refresh_ms)
    }
}

/// Output formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `chrono` format string for timestamps.
    pub date_format: String,

    /// Show percentage shares next to category counts.
    pub show_percentages: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
            show_percentages: true,
        }
    }
}

impl DashConfig {
    /// Get the default config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ehv"))
    }

    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the views and timers cannot work with.
    pub fn validate(&self) -> Result<()> {
        let v = &self.views;
        for (name, size) in [
            ("views.fault_page_size", v.fault_page_size),
            ("views.substation_page_size", v.substation_page_size),
            ("views.maintenance_page_size", v.maintenance_page_size),
            ("views.line_page_size", v.line_page_size),
            ("views.equipment_page_size", v.equipment_page_size),
        ] {
            if size == 0 {
                return Err(Error::Config(format!("{name} must be greater than zero")));
            }
        }
        if self.timers.auto_refresh && self.timers.auto_refresh_secs == 0 {
            return Err(Error::Config(
                "timers.auto_refresh_secs must be greater than zero".to_string(),
            ));
        }
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "display.date_format '{}' is not a valid format string",
                self.display.date_format
            )));
        }
        Ok(())
    }
}
