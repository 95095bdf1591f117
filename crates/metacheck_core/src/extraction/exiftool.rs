//! Generic tag extraction via `exiftool -json`.

use std::path::Path;

use serde_json::Value;

use super::json::{json_kind, parse_json};
use super::{capture, Extractor, ToolContext};
use crate::models::{ExtractionOutcome, Source, ToolName};

/// Reads every tag exiftool knows about.
///
/// exiftool prints a JSON array with one object per input file; the single
/// element is unwrapped into the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExiftoolExtractor;

impl Extractor for ExiftoolExtractor {
    fn source(&self) -> Source {
        Source::Exiftool
    }

    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        let invocation = ctx
            .invocation(ToolName::Exiftool, ctx.tool_settings().long_timeout())
            .arg("-json")
            .arg(path);

        match capture(ctx, &invocation) {
            Ok(stdout) => unwrap_single(&stdout),
            Err(outcome) => outcome,
        }
    }
}

fn unwrap_single(stdout: &str) -> ExtractionOutcome {
    let value = match parse_json(ToolName::Exiftool, stdout) {
        Ok(value) => value,
        Err(outcome) => return outcome,
    };

    match value {
        Value::Array(items) => match items.into_iter().next() {
            Some(Value::Object(map)) => ExtractionOutcome::Record(map),
            Some(other) => ExtractionOutcome::failed(format!(
                "Unexpected exiftool output: expected an object, got {}",
                json_kind(&other)
            )),
            None => ExtractionOutcome::Empty,
        },
        other => ExtractionOutcome::failed(format!(
            "Unexpected exiftool output: expected an array, got {}",
            json_kind(&other)
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::extraction::test_support::context;
    use crate::testing::ScriptedRunner;
    use crate::tools::CommandOutput;

    #[test]
    fn unwraps_the_single_element() {
        let stdout = r#"[{"SourceFile": "photo.jpg", "Make": "Canon", "ImageWidth": 4000}]"#;
        let runner = Arc::new(ScriptedRunner::new().ok("exiftool", stdout));
        let ctx = context(runner.clone());

        let outcome = ExiftoolExtractor.extract(&ctx, Path::new("photo.jpg"));
        let record = outcome.record().expect("record");
        assert_eq!(record["Make"], json!("Canon"));
        assert_eq!(record["ImageWidth"], json!(4000));
        assert_eq!(runner.calls()[0].args_lossy(), vec!["-json", "photo.jpg"]);
    }

    #[test]
    fn empty_array_is_empty() {
        assert_eq!(unwrap_single("[]"), ExtractionOutcome::Empty);
    }

    #[test]
    fn unexpected_shapes_fail() {
        assert!(matches!(unwrap_single("{}"), ExtractionOutcome::ToolFailed(_)));
        assert!(matches!(unwrap_single("[1]"), ExtractionOutcome::ToolFailed(_)));
    }

    #[test]
    fn reports_stderr_on_failure() {
        let runner = Arc::new(ScriptedRunner::new().respond("exiftool", |_| {
            Ok(CommandOutput::failure(1, "Error: File not found - gone.jpg\n"))
        }));
        let ctx = context(runner);

        assert_eq!(
            ExiftoolExtractor.extract(&ctx, Path::new("gone.jpg")),
            ExtractionOutcome::failed("Error: File not found - gone.jpg")
        );
    }
}
