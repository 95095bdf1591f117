//! Printable-strings scan via `strings -n <min>`.
//!
//! A heuristic leak detector: runs that mention URLs, mail addresses or
//! credential-like words are surfaced. False positives and negatives are
//! expected.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::{capture, Extractor, ToolContext};
use crate::models::{ExtractionOutcome, Source, ToolName};

/// Case-insensitive markers that make a run interesting.
pub const INTERESTING_MARKERS: [&str; 17] = [
    "http", "https", "ftp", "www.", "email", "mailto:", "password", "pwd", "token", "api", "key",
    "secret", "@", "://", ".com", ".org", ".net",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StringsExtractor;

impl Extractor for StringsExtractor {
    fn source(&self) -> Source {
        Source::Strings
    }

    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        let settings = ctx.strings_settings();
        let invocation = ctx
            .invocation(ToolName::Strings, ctx.tool_settings().long_timeout())
            .arg("-n")
            .arg(settings.min_length.to_string())
            .arg(path);

        let stdout = match capture(ctx, &invocation) {
            Ok(stdout) => stdout,
            Err(outcome) => return outcome,
        };

        let summary = summarize_strings(
            stdout.lines(),
            settings.min_length as usize,
            settings.max_interesting,
        );

        match serde_json::to_value(&summary) {
            Ok(Value::Object(record)) => ExtractionOutcome::Record(record),
            Ok(_) => ExtractionOutcome::failed("strings summary did not serialize to an object"),
            Err(e) => ExtractionOutcome::failed(format!("Failed to encode strings summary: {}", e)),
        }
    }
}

/// Counted and filtered printable runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringsSummary {
    /// Number of runs the tool extracted.
    pub total_strings: usize,
    /// Leading interesting runs, in original order.
    pub interesting_strings: Vec<String>,
}

/// Count all runs and keep the first `max_interesting` that contain a marker.
///
/// Runs are trimmed before matching; runs shorter than `min_length` after
/// trimming are counted but never reported.
pub fn summarize_strings<'a, I>(runs: I, min_length: usize, max_interesting: usize) -> StringsSummary
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total_strings = 0;
    let mut interesting_strings = Vec::new();

    for run in runs {
        total_strings += 1;

        let run = run.trim();
        if interesting_strings.len() >= max_interesting || run.chars().count() < min_length {
            continue;
        }
        if is_interesting(run) {
            interesting_strings.push(run.to_string());
        }
    }

    StringsSummary {
        total_strings,
        interesting_strings,
    }
}

fn is_interesting(run: &str) -> bool {
    let lower = run.to_lowercase();
    INTERESTING_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::extraction::test_support::context;
    use crate::testing::ScriptedRunner;

    #[test]
    fn keeps_marker_runs_in_order() {
        let summary = summarize_strings(["hello", "http://x.com", "secretkey123", "ok12"], 4, 30);
        assert_eq!(summary.total_strings, 4);
        assert_eq!(summary.interesting_strings, vec!["http://x.com", "secretkey123"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let summary = summarize_strings(["PASSWORD=hunter2", "Contact: Admin@Example.ORG"], 4, 30);
        assert_eq!(summary.interesting_strings.len(), 2);
    }

    #[test]
    fn caps_interesting_runs_but_counts_everything() {
        let runs: Vec<String> = (0..50).map(|i| format!("token-{i:02}")).collect();
        let summary = summarize_strings(runs.iter().map(String::as_str), 4, 30);
        assert_eq!(summary.total_strings, 50);
        assert_eq!(summary.interesting_strings.len(), 30);
        assert_eq!(summary.interesting_strings[0], "token-00");
        assert_eq!(summary.interesting_strings[29], "token-29");
    }

    #[test]
    fn short_trimmed_runs_are_not_reported() {
        let summary = summarize_strings(["  @a  ", "api"], 4, 30);
        assert_eq!(summary.total_strings, 2);
        assert!(summary.interesting_strings.is_empty());
    }

    #[test]
    fn adapter_builds_record() {
        let runner = Arc::new(
            ScriptedRunner::new().ok("strings", "ELF\n/lib64/ld-linux.so\nhttps://example.net/api\n"),
        );
        let ctx = context(runner.clone());

        let outcome = StringsExtractor.extract(&ctx, Path::new("a.out"));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"total_strings": 3, "interesting_strings": ["https://example.net/api"]})
        );
        assert_eq!(runner.calls()[0].args_lossy(), vec!["-n", "4", "a.out"]);
    }
}
