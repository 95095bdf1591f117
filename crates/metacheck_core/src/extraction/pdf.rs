//! PDF metadata.
//!
//! No PDF-specific tool is used: this source re-runs the exiftool adapter
//! and reports its outcome under the `pdf` key.

use std::path::Path;

use super::{ExiftoolExtractor, Extractor, ToolContext};
use crate::logging::file_label;
use crate::models::{ExtractionOutcome, Source};

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn source(&self) -> Source {
        Source::Pdf
    }

    fn run_tool(&self, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
        tracing::debug!(file = %file_label(path), "reading PDF metadata through exiftool");
        ExiftoolExtractor.run_tool(ctx, path)
    }
}
