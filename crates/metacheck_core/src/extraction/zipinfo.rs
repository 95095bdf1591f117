//! Archive listing via `zipinfo -l`.

use std::path::Path;

use serde_json::Value;

use super::{capture, Extractor, ToolContext};
use crate::models::{ExtractionOutcome, Record, Source, ToolName};

/// Lists archive entries.
///
/// Every non-blank output line is kept in order under `files`, including
/// zipinfo's own header and trailing totals line. `summary` is always
/// empty: the totals line's column layout is not parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipinfoExtractor;

impl Extractor for ZipinfoExtractor {
    fn source(&self) -> Source {
        Source::Zipinfo
    }

    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        let invocation = ctx
            .invocation(ToolName::Zipinfo, ctx.tool_settings().long_timeout())
            .arg("-l")
            .arg(path);

        match capture(ctx, &invocation) {
            Ok(stdout) => ExtractionOutcome::Record(listing_record(&stdout)),
            Err(outcome) => outcome,
        }
    }
}

fn listing_record(stdout: &str) -> Record {
    let files = stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Value::String(line.to_string()))
        .collect();

    let mut record = Record::new();
    record.insert("files".to_string(), Value::Array(files));
    record.insert("summary".to_string(), Value::String(String::new()));
    record
}
