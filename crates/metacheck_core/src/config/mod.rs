//! Configuration management for metacheck.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Defaults for every missing key
//!
//! # Example
//!
//! ```no_run
//! use metacheck_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/metacheck.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Probe timeout: {}s", config.settings().tools.probe_timeout_secs);
//!
//! config.settings_mut().report.parallel = false;
//! config.update_section(ConfigSection::Report).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, LoggingSettings, ReportSettings, Settings, StringsSettings, ToolSettings,
};
