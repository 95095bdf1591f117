//! Extractor adapters.
//!
//! One adapter per external utility. Each adapter knows how to invoke its
//! tool and how to normalize the raw output into an
//! [`ExtractionOutcome`]. Adapters are independent: a failure in one never
//! affects another.
//!
//! | source    | tool      | output handling                        |
//! |-----------|-----------|----------------------------------------|
//! | exiftool  | exiftool  | single-element JSON array, unwrapped   |
//! | mediainfo | mediainfo | JSON document used directly            |
//! | ffprobe   | ffprobe   | JSON document (format + streams)       |
//! | pdf       | exiftool  | alias of the exiftool adapter          |
//! | identify  | identify  | `-verbose` text, section state machine |
//! | file      | file      | MIME type + description                |
//! | zipinfo   | zipinfo   | one line per entry                     |
//! | strings   | strings   | run count + marker-filtered runs       |

mod exiftool;
mod file_type;
mod identify;
mod json;
mod pdf;
mod strings;
mod zipinfo;

pub use exiftool::ExiftoolExtractor;
pub use file_type::FileTypeExtractor;
pub use identify::{parse_verbose, IdentifyExtractor};
pub use json::{FfprobeExtractor, MediainfoExtractor};
pub use pdf::PdfExtractor;
pub use strings::{summarize_strings, StringsExtractor, StringsSummary, INTERESTING_MARKERS};
pub use zipinfo::ZipinfoExtractor;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Settings, StringsSettings, ToolSettings};
use crate::logging::file_label;
use crate::models::{ExtractionOutcome, Source, ToolName};
use crate::tools::{Availability, CommandOutput, CommandRunner, Invocation, RunResult};

/// Everything an adapter needs to run its tool.
///
/// Cheap to clone; the runner and availability cache are shared.
#[derive(Clone)]
pub struct ToolContext {
    runner: Arc<dyn CommandRunner>,
    availability: Arc<dyn Availability>,
    tools: ToolSettings,
    strings: StringsSettings,
}

impl ToolContext {
    /// Create a context from settings.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        availability: Arc<dyn Availability>,
        settings: &Settings,
    ) -> Self {
        Self {
            runner,
            availability,
            tools: settings.tools.clone(),
            strings: settings.strings.clone(),
        }
    }

    /// Whether a tool may be invoked.
    pub fn is_available(&self, tool: ToolName) -> bool {
        self.availability.is_available(tool)
    }

    /// The shared availability source.
    pub fn availability(&self) -> &dyn Availability {
        self.availability.as_ref()
    }

    pub fn tool_settings(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn strings_settings(&self) -> &StringsSettings {
        &self.strings
    }

    /// Start building a command line for a tool, honoring executable overrides.
    pub fn invocation(&self, tool: ToolName, timeout: Duration) -> Invocation {
        Invocation::new(self.tools.program(tool), timeout)
    }

    /// Run a command through the configured runner.
    pub fn run(&self, invocation: &Invocation) -> RunResult<CommandOutput> {
        self.runner.run(invocation)
    }
}

/// Common capability of every adapter.
pub trait Extractor: Send + Sync {
    /// Report key this adapter fills.
    fn source(&self) -> Source;

    /// Tool this adapter invokes.
    fn tool(&self) -> ToolName {
        self.source().tool()
    }

    /// Invoke the tool and normalize its output.
    ///
    /// Only called once the tool is known to be available.
    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome;

    /// Run the adapter against a file.
    ///
    /// Returns `ToolUnavailable` without invoking anything when the tool is
    /// not installed.
    fn extract(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        let source = self.source();
        let tool = self.tool();
        let file = file_label(path);

        if !ctx.is_available(tool) {
            tracing::info!(source = %source, tool = %tool, file = %file, "skipped, tool not installed");
            return ExtractionOutcome::ToolUnavailable(tool);
        }

        tracing::debug!(source = %source, tool = %tool, file = %file, "extracting");
        let outcome = self.run_tool(ctx, path);

        match &outcome {
            ExtractionOutcome::Record(record) => {
                tracing::info!(source = %source, file = %file, fields = record.len(), "extracted");
            }
            ExtractionOutcome::Empty => {
                tracing::info!(source = %source, file = %file, "no metadata found");
            }
            ExtractionOutcome::ToolFailed(message) => {
                tracing::warn!(source = %source, file = %file, error = %message, "extraction failed");
            }
            ExtractionOutcome::ToolUnavailable(_) => {}
        }

        outcome
    }
}

/// The fixed, ordered set of adapters behind every report.
pub fn standard_extractors() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(ExiftoolExtractor),
        Box::new(MediainfoExtractor),
        Box::new(FfprobeExtractor),
        Box::new(PdfExtractor),
        Box::new(IdentifyExtractor),
        Box::new(FileTypeExtractor),
        Box::new(ZipinfoExtractor),
        Box::new(StringsExtractor),
    ]
}

/// Run an invocation and return its stdout.
///
/// Failures and blank output are mapped to the outcome that ends the
/// extraction: non-zero exit, timeout or spawn errors become `ToolFailed`
/// (stderr preferred), whitespace-only stdout becomes `Empty`.
pub(crate) fn capture(ctx: &ToolContext, invocation: &Invocation) -> Result<String, ExtractionOutcome> {
    let output = ctx
        .run(invocation)
        .map_err(|e| ExtractionOutcome::failed(e.to_string()))?;

    if !output.success {
        return Err(ExtractionOutcome::failed(
            output.diagnostic(&invocation.program),
        ));
    }

    if output.stdout.trim().is_empty() {
        return Err(ExtractionOutcome::Empty);
    }

    Ok(output.stdout)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::testing::ScriptedRunner;

    /// Context over a scripted runner where every tool is installed.
    pub fn context(runner: Arc<ScriptedRunner>) -> ToolContext {
        context_with(runner, |_: ToolName| true)
    }

    pub fn context_with<A>(runner: Arc<ScriptedRunner>, availability: A) -> ToolContext
    where
        A: Availability + 'static,
    {
        ToolContext::new(runner, Arc::new(availability), &Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{context, context_with};
    use super::*;
    use crate::testing::ScriptedRunner;
    use crate::tools::RunError;

    #[test]
    fn standard_set_covers_every_source_once() {
        let sources: Vec<Source> = standard_extractors().iter().map(|e| e.source()).collect();
        assert_eq!(sources, Source::ALL.to_vec());
    }

    #[test]
    fn unavailable_tools_are_never_invoked() {
        let runner = Arc::new(ScriptedRunner::new());
        let ctx = context_with(runner.clone(), |_: ToolName| false);

        for extractor in standard_extractors() {
            let outcome = extractor.extract(&ctx, Path::new("/tmp/sample.bin"));
            assert_eq!(outcome, ExtractionOutcome::ToolUnavailable(extractor.tool()));
        }
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn one_unavailable_tool_does_not_affect_others() {
        let runner = Arc::new(ScriptedRunner::new().ok("zipinfo", "Archive:  a.zip\n"));
        let ctx = context_with(runner.clone(), |tool: ToolName| tool == ToolName::Zipinfo);

        assert!(ZipinfoExtractor.extract(&ctx, Path::new("a.zip")).is_record());
        assert_eq!(
            StringsExtractor.extract(&ctx, Path::new("a.zip")),
            ExtractionOutcome::ToolUnavailable(ToolName::Strings)
        );
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn capture_maps_failures() {
        let runner = Arc::new(
            ScriptedRunner::new()
                .respond("exiftool", |_| Ok(CommandOutput::failure(1, "Error: File not found\n")))
                .ok("file", "   \n")
                .timing_out("ffprobe"),
        );
        let ctx = context(runner);
        let timeout = Duration::from_secs(1);

        let failed = capture(&ctx, &ctx.invocation(ToolName::Exiftool, timeout));
        assert_eq!(failed, Err(ExtractionOutcome::failed("Error: File not found")));

        let empty = capture(&ctx, &ctx.invocation(ToolName::File, timeout));
        assert_eq!(empty, Err(ExtractionOutcome::Empty));

        let timed_out = capture(&ctx, &ctx.invocation(ToolName::Ffprobe, timeout));
        match timed_out {
            Err(ExtractionOutcome::ToolFailed(message)) => assert!(message.contains("timed out")),
            other => panic!("expected timeout failure, got {:?}", other),
        }
    }

    #[test]
    fn spawn_errors_become_failures() {
        let runner = Arc::new(ScriptedRunner::new().respond("strings", |inv| {
            Err(RunError::Spawn {
                program: inv.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }));
        let ctx = context(runner);
        let outcome = StringsExtractor.extract(&ctx, Path::new("a.bin"));
        assert!(matches!(outcome, ExtractionOutcome::ToolFailed(m) if m.contains("denied")));
    }
}
