//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::ToolName;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// External tool invocation settings.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Printable-strings scan settings.
    #[serde(default)]
    pub strings: StringsSettings,

    /// Report assembly settings.
    #[serde(default)]
    pub report: ReportSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Timeouts and executable locations for external tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Deadline for the availability probe.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Deadline for expensive extractions (exiftool, mediainfo, ffprobe,
    /// identify, zipinfo, strings).
    #[serde(default = "default_long_timeout")]
    pub long_timeout_secs: u64,

    /// Deadline for each quick `file` invocation.
    #[serde(default = "default_short_timeout")]
    pub short_timeout_secs: u64,

    /// Deadline for a tag write.
    #[serde(default = "default_long_timeout")]
    pub write_timeout_secs: u64,

    /// Executable overrides keyed by tool name (e.g. `exiftool = "/opt/bin/exiftool"`).
    #[serde(default)]
    pub programs: BTreeMap<String, String>,
}

fn default_probe_timeout() -> u64 {
    5
}

fn default_long_timeout() -> u64 {
    30
}

fn default_short_timeout() -> u64 {
    10
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            probe_timeout_secs: default_probe_timeout(),
            long_timeout_secs: default_long_timeout(),
            short_timeout_secs: default_short_timeout(),
            write_timeout_secs: default_long_timeout(),
            programs: BTreeMap::new(),
        }
    }
}

impl ToolSettings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn long_timeout(&self) -> Duration {
        Duration::from_secs(self.long_timeout_secs)
    }

    pub fn short_timeout(&self) -> Duration {
        Duration::from_secs(self.short_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// Executable to run for a tool, honoring overrides.
    pub fn program(&self, tool: ToolName) -> String {
        self.programs
            .get(tool.program())
            .cloned()
            .unwrap_or_else(|| tool.program().to_string())
    }
}

/// Printable-strings scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringsSettings {
    /// Minimum printable run length passed to `strings -n`.
    #[serde(default = "default_min_length")]
    pub min_length: u32,

    /// Maximum number of interesting runs kept in the record.
    #[serde(default = "default_max_interesting")]
    pub max_interesting: usize,
}

fn default_min_length() -> u32 {
    4
}

fn default_max_interesting() -> usize {
    30
}

impl Default for StringsSettings {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_interesting: default_max_interesting(),
        }
    }
}

/// Report assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Run extractors concurrently (one thread each).
    #[serde(default = "default_true")]
    pub parallel: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Tools,
    Strings,
    Report,
    Logging,
}

impl ConfigSection {
    /// Every section, in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Tools,
        ConfigSection::Strings,
        ConfigSection::Report,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "tools",
            ConfigSection::Strings => "strings",
            ConfigSection::Report => "report",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "External tool timeouts (seconds) and executable overrides",
            ConfigSection::Strings => "Printable-strings scan",
            ConfigSection::Report => "Report assembly",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[tools]"));
        assert!(toml.contains("[strings]"));
        assert!(toml.contains("probe_timeout_secs"));
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.tools.long_timeout_secs, 30);
        assert_eq!(parsed.strings.min_length, 4);
        assert!(parsed.report.parallel);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[tools]\nshort_timeout_secs = 3";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(parsed.tools.short_timeout(), Duration::from_secs(3));
        assert_eq!(parsed.tools.probe_timeout(), Duration::from_secs(5));
        assert_eq!(parsed.strings.max_interesting, 30);
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }

    #[test]
    fn program_overrides() {
        let parsed: Settings =
            toml::from_str("[tools.programs]\nidentify = \"magick-identify\"").unwrap();
        assert_eq!(parsed.tools.program(ToolName::Identify), "magick-identify");
        assert_eq!(parsed.tools.program(ToolName::File), "file");
    }
}
