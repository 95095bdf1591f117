//! Adapters for tools that already emit a structured JSON document.

use std::path::Path;

use serde_json::Value;

use super::{capture, Extractor, ToolContext};
use crate::models::{ExtractionOutcome, Source, ToolName};

/// Parse stdout as JSON, mapping syntax errors to `ToolFailed`.
pub(crate) fn parse_json(tool: ToolName, stdout: &str) -> Result<Value, ExtractionOutcome> {
    serde_json::from_str(stdout).map_err(|e| {
        ExtractionOutcome::failed(format!("Failed to parse {} output: {}", tool, e))
    })
}

/// Use a JSON object as the record as-is.
pub(crate) fn document_record(tool: ToolName, stdout: &str) -> ExtractionOutcome {
    match parse_json(tool, stdout) {
        Ok(Value::Object(map)) if map.is_empty() => ExtractionOutcome::Empty,
        Ok(Value::Object(map)) => ExtractionOutcome::Record(map),
        Ok(other) => ExtractionOutcome::failed(format!(
            "Unexpected {} output: expected a JSON object, got {}",
            tool,
            json_kind(&other)
        )),
        Err(outcome) => outcome,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Container/media information via `mediainfo --Output=JSON`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediainfoExtractor;

impl Extractor for MediainfoExtractor {
    fn source(&self) -> Source {
        Source::Mediainfo
    }

    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        let invocation = ctx
            .invocation(ToolName::Mediainfo, ctx.tool_settings().long_timeout())
            .arg("--Output=JSON")
            .arg(path);

        match capture(ctx, &invocation) {
            Ok(stdout) => document_record(ToolName::Mediainfo, &stdout),
            Err(outcome) => outcome,
        }
    }
}

/// Audio/video format and stream information via ffprobe.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeExtractor;

impl Extractor for FfprobeExtractor {
    fn source(&self) -> Source {
        Source::Ffprobe
    }

    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        let invocation = ctx
            .invocation(ToolName::Ffprobe, ctx.tool_settings().long_timeout())
            .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path);

        match capture(ctx, &invocation) {
            Ok(stdout) => document_record(ToolName::Ffprobe, &stdout),
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::extraction::test_support::context;
    use crate::testing::ScriptedRunner;

    const FFPROBE_OUTPUT: &str = r#"{
        "streams": [
            {"index": 0, "codec_name": "h264", "codec_type": "video", "width": 1920},
            {"index": 1, "codec_name": "aac", "codec_type": "audio", "channels": 2}
        ],
        "format": {"filename": "clip.mp4", "format_name": "mov,mp4,m4a,3gp,3g2,mj2", "duration": "12.5"}
    }"#;

    #[test]
    fn ffprobe_document_is_used_directly() {
        let runner = Arc::new(ScriptedRunner::new().ok("ffprobe", FFPROBE_OUTPUT));
        let ctx = context(runner.clone());

        let outcome = FfprobeExtractor.extract(&ctx, Path::new("clip.mp4"));
        let record = outcome.record().expect("record");
        assert_eq!(record["format"]["duration"], json!("12.5"));
        assert_eq!(record["streams"].as_array().map(Vec::len), Some(2));

        let calls = runner.calls();
        assert_eq!(
            calls[0].args_lossy(),
            vec!["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams", "clip.mp4"]
        );
        assert_eq!(calls[0].timeout, std::time::Duration::from_secs(30));
    }

    #[test]
    fn mediainfo_nested_document() {
        let stdout = r#"{"creatingLibrary": {"name": "MediaInfoLib"}, "media": {"@ref": "a.mkv", "track": [{"@type": "General"}]}}"#;
        let runner = Arc::new(ScriptedRunner::new().ok("mediainfo", stdout));
        let ctx = context(runner.clone());

        let outcome = MediainfoExtractor.extract(&ctx, Path::new("a.mkv"));
        let record = outcome.record().expect("record");
        assert_eq!(record["media"]["track"][0]["@type"], json!("General"));
        assert_eq!(runner.calls()[0].args_lossy(), vec!["--Output=JSON", "a.mkv"]);
    }

    #[test]
    fn malformed_json_is_a_failure() {
        let runner = Arc::new(ScriptedRunner::new().ok("mediainfo", "{not json"));
        let ctx = context(runner);

        match MediainfoExtractor.extract(&ctx, Path::new("a.mkv")) {
            ExtractionOutcome::ToolFailed(message) => {
                assert!(message.starts_with("Failed to parse mediainfo output"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn non_object_document_is_a_failure() {
        assert!(matches!(
            document_record(ToolName::Ffprobe, "[1, 2]"),
            ExtractionOutcome::ToolFailed(m) if m.contains("got an array")
        ));
        assert_eq!(document_record(ToolName::Ffprobe, "{}"), ExtractionOutcome::Empty);
    }
}
