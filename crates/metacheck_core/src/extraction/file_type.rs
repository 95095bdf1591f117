//! File type identification via `file`.

use std::path::Path;

use serde_json::Value;

use super::{capture, Extractor, ToolContext};
use crate::models::{ExtractionOutcome, Record, Source, ToolName};

/// Two quick `file -b` runs: one for the MIME type, one for the description.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTypeExtractor;

impl Extractor for FileTypeExtractor {
    fn source(&self) -> Source {
        Source::File
    }

    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        let timeout = ctx.tool_settings().short_timeout();

        let mime = ctx
            .invocation(ToolName::File, timeout)
            .args(["-b", "--mime-type"])
            .arg(path);
        let mime_type = match capture(ctx, &mime) {
            Ok(stdout) => stdout.trim().to_string(),
            Err(outcome) => return outcome,
        };

        let describe = ctx.invocation(ToolName::File, timeout).arg("-b").arg(path);
        let description = match capture(ctx, &describe) {
            Ok(stdout) => stdout.trim().to_string(),
            Err(outcome) => return outcome,
        };

        let mut record = Record::new();
        record.insert("mime_type".to_string(), Value::String(mime_type));
        record.insert("description".to_string(), Value::String(description));
        ExtractionOutcome::Record(record)
    }
}
