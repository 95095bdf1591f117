//! Image details via `identify -verbose`.
//!
//! The verbose report is plain text: section headers end in `:` and the
//! `key: value` lines beneath them are indented. The parser rebuilds one
//! level of nesting from that flat stream with a small state machine that
//! tracks the currently open section.
//!
//! This depends on ImageMagick's text layout; a format change upstream
//! changes the record shape rather than failing.

use std::path::Path;

use serde_json::{Map, Value};

use super::{capture, Extractor, ToolContext};
use crate::models::{ExtractionOutcome, Record, Source, ToolName};

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifyExtractor;

impl Extractor for IdentifyExtractor {
    fn source(&self) -> Source {
        Source::Identify
    }

    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        let invocation = ctx
            .invocation(ToolName::Identify, ctx.tool_settings().long_timeout())
            .arg("-verbose")
            .arg(path);

        match capture(ctx, &invocation) {
            Ok(stdout) => {
                let record = parse_verbose(&stdout);
                if record.is_empty() {
                    ExtractionOutcome::Empty
                } else {
                    ExtractionOutcome::Record(record)
                }
            }
            Err(outcome) => outcome,
        }
    }
}

/// A section header and the indentation it was found at.
struct OpenSection {
    indent: usize,
    name: String,
}

/// Parse `identify -verbose` output.
///
/// Rules, applied to each trimmed non-blank line:
/// - a line ending in `:` opens a section (an empty mapping) named by the
///   text before the colon;
/// - while a section is open, a line containing `": "` is split on the
///   first `": "` and stored under that section;
/// - any other line containing `:` is split on the first `:` and stored
///   as a top-level scalar.
///
/// A line indented no deeper than the open section's header closes it and
/// returns to the enclosing section, if any.
pub fn parse_verbose(text: &str) -> Record {
    let mut record = Record::new();
    let mut open: Vec<OpenSection> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();
        while open.last().is_some_and(|section| section.indent >= indent) {
            open.pop();
        }

        if let Some(name) = line.strip_suffix(':') {
            let name = name.trim().to_string();
            record.insert(name.clone(), Value::Object(Map::new()));
            open.push(OpenSection { indent, name });
            continue;
        }

        if let Some(section) = open.last() {
            if let Some((key, value)) = line.split_once(": ") {
                insert_nested(&mut record, &section.name, key.trim(), value.trim());
                continue;
            }
        }

        if let Some((key, value)) = line.split_once(':') {
            record.insert(
                key.trim().to_string(),
                Value::String(value.trim().to_string()),
            );
        }
    }

    record
}

fn insert_nested(record: &mut Record, section: &str, key: &str, value: &str) {
    let slot = record
        .entry(section.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    // A later top-level scalar with the same name may have replaced the mapping.
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }

    if let Value::Object(map) = slot {
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
}
