//! Engine facade.
//!
//! Wires the runner, the availability registry, the aggregator and the
//! writer together from [`Settings`]. One engine is meant to live for the
//! whole process so the availability cache is shared by every request.

use std::path::Path;
use std::sync::Arc;

use crate::aggregate::Aggregator;
use crate::config::Settings;
use crate::error::EngineResult;
use crate::extraction::ToolContext;
use crate::fields::supported_fields;
use crate::inspect::ensure_readable_file;
use crate::models::AggregateReport;
use crate::tools::{tools_status, Availability, CommandRunner, SystemRunner, ToolRegistry, ToolStatus};
use crate::writer::{ConfirmedWrite, MetadataWriter, TagWriteOutcome, TagWriteRequest};

/// Entry point for aggregation and write requests.
pub struct MetadataEngine {
    aggregator: Aggregator,
    writer: MetadataWriter,
}

impl MetadataEngine {
    /// Engine that runs real processes and probes tools lazily.
    pub fn from_settings(settings: &Settings) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new());
        let registry = Arc::new(ToolRegistry::new(runner.clone(), settings.tools.clone()));
        Self::with_parts(runner, registry, settings)
    }

    /// Engine over an explicit runner and availability source.
    pub fn with_parts(
        runner: Arc<dyn CommandRunner>,
        availability: Arc<dyn Availability>,
        settings: &Settings,
    ) -> Self {
        let ctx = ToolContext::new(runner, availability, settings);
        Self {
            aggregator: Aggregator::new(ctx.clone(), settings.report.parallel),
            writer: MetadataWriter::new(ctx),
        }
    }

    /// Fail early if the path is not an existing regular file.
    pub fn check_file(&self, path: &Path) -> EngineResult<()> {
        ensure_readable_file(path)
    }

    /// Full report for a file. Tool failures are contained in the report.
    pub fn aggregate(&self, path: &Path) -> AggregateReport {
        self.aggregator.aggregate(path)
    }

    /// Write tags through exiftool.
    pub fn write(&self, path: &Path, request: &TagWriteRequest) -> TagWriteOutcome {
        self.writer.write(path, request)
    }

    /// Write tags and re-read them on success.
    pub fn write_and_confirm(&self, path: &Path, request: &TagWriteRequest) -> ConfirmedWrite {
        self.writer.write_and_confirm(path, request)
    }

    /// Availability of every known tool. Probes anything not yet cached.
    pub fn tools_status(&self) -> Vec<ToolStatus> {
        tools_status(self.aggregator.context().availability())
    }

    /// Suggested writable tags for a category name.
    pub fn supported_fields(&self, category: &str) -> &'static [&'static str] {
        supported_fields(category)
    }
}
