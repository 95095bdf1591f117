//! metacheck core - metadata aggregation engine.
//!
//! This crate inspects a file with a fixed set of external extraction
//! utilities (exiftool, mediainfo, ffprobe, identify, file, zipinfo,
//! strings), normalizes their output and merges everything into one
//! report. It also writes a constrained set of tags back through exiftool.
//!
//! It has no transport or UI dependencies. It can be used by the CLI or
//! embedded behind any request layer.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use metacheck_core::config::Settings;
//! use metacheck_core::MetadataEngine;
//!
//! let engine = MetadataEngine::from_settings(&Settings::default());
//! let report = engine.aggregate(Path::new("photo.jpg"));
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod extraction;
pub mod fields;
pub mod inspect;
pub mod logging;
pub mod models;
pub mod tools;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::Aggregator;
pub use engine::MetadataEngine;
pub use error::{EngineError, EngineResult};
pub use models::{AggregateReport, ExtractionOutcome, FileFacts, FileInfo, Source, ToolName};
pub use writer::{ConfirmedWrite, MetadataWriter, TagWriteOutcome, TagWriteRequest};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
