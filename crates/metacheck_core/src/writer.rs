//! Tag write-back through exiftool.
//!
//! Tag names are reduced to ASCII letters and digits before they reach the
//! command line, so a caller can never inject options. All surviving tags
//! go into one invocation and exiftool either applies all of them or none.

use std::collections::BTreeMap;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{EngineError, EngineResult};
use crate::extraction::{ExiftoolExtractor, Extractor, ToolContext};
use crate::logging::file_label;
use crate::models::{ExtractionOutcome, ToolName};

const NO_VALID_FIELDS: &str = "No valid metadata fields provided";

/// Strip every character that is not an ASCII letter or digit.
pub fn sanitize_tag_name(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Raw tag/value pairs as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagWriteRequest {
    tags: Vec<(String, String)>,
}

impl TagWriteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one pair (builder pattern).
    pub fn tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Sanitized tags keyed by cleaned name.
    ///
    /// Pairs whose name cleans to nothing are dropped. When two names clean
    /// to the same tag the later value wins.
    pub fn sanitize(&self) -> BTreeMap<String, String> {
        self.tags
            .iter()
            .filter_map(|(name, value)| {
                let clean = sanitize_tag_name(name);
                (!clean.is_empty()).then(|| (clean, value.clone()))
            })
            .collect()
    }
}

impl TagWriteRequest {
    /// Sanitized tags, or `InvalidInput` when none survive.
    pub fn validated(&self) -> EngineResult<BTreeMap<String, String>> {
        let tags = self.sanitize();
        if tags.is_empty() {
            return Err(EngineError::invalid_input(NO_VALID_FIELDS));
        }
        Ok(tags)
    }
}

impl<K, V> FromIterator<(K, V)> for TagWriteRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tags: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for TagWriteRequest {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Result of a write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagWriteOutcome {
    Applied { message: String },
    Rejected { error: String },
}

impl TagWriteOutcome {
    fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            error: error.into(),
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// The success message or the failure reason.
    pub fn text(&self) -> &str {
        match self {
            Self::Applied { message } => message,
            Self::Rejected { error } => error,
        }
    }
}

impl Serialize for TagWriteOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("success", &self.success())?;
        match self {
            Self::Applied { message } => map.serialize_entry("message", message)?,
            Self::Rejected { error } => map.serialize_entry("error", error)?,
        }
        map.end()
    }
}

/// A write followed by a fresh exiftool read of the same file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedWrite {
    pub outcome: TagWriteOutcome,
    /// Present only when the write was applied.
    pub metadata: Option<ExtractionOutcome>,
}

impl Serialize for ConfirmedWrite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.metadata.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("success", &self.outcome.success())?;
        match &self.outcome {
            TagWriteOutcome::Applied { message } => map.serialize_entry("message", message)?,
            TagWriteOutcome::Rejected { error } => map.serialize_entry("error", error)?,
        }
        if let Some(metadata) = &self.metadata {
            map.serialize_entry("metadata", metadata)?;
        }
        map.end()
    }
}

/// Applies tag writes with exiftool.
#[derive(Clone)]
pub struct MetadataWriter {
    ctx: ToolContext,
}

impl MetadataWriter {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Write tags in place. No backup copy is kept.
    ///
    /// The write is not verified; see [`write_and_confirm`](Self::write_and_confirm).
    pub fn write(&self, path: &Path, request: &TagWriteRequest) -> TagWriteOutcome {
        let file = file_label(path);

        if !self.ctx.is_available(ToolName::Exiftool) {
            tracing::warn!(tool = %ToolName::Exiftool, file = %file, "cannot write tags, tool not installed");
            return TagWriteOutcome::rejected(format!("{} not installed", ToolName::Exiftool.label()));
        }

        let tags = match request.validated() {
            Ok(tags) => tags,
            Err(EngineError::InvalidInput(reason)) => {
                tracing::warn!(file = %file, "no valid metadata fields provided");
                return TagWriteOutcome::rejected(reason);
            }
            Err(e) => return TagWriteOutcome::rejected(e.to_string()),
        };

        let invocation = self
            .ctx
            .invocation(ToolName::Exiftool, self.ctx.tool_settings().write_timeout())
            .arg("-overwrite_original")
            .args(tags.iter().map(|(name, value)| format!("-{}={}", name, value)))
            .arg(path);

        tracing::info!(tool = %ToolName::Exiftool, file = %file, tags = tags.len(), "writing tags");
        tracing::debug!(command = %invocation.command_line(), "write command");

        match self.ctx.run(&invocation) {
            Ok(output) if output.success => {
                tracing::info!(file = %file, "metadata added");
                TagWriteOutcome::Applied {
                    message: "Metadata added successfully".to_string(),
                }
            }
            Ok(output) => {
                let stderr = output.stderr.trim();
                let reason = if stderr.is_empty() { "Unknown error" } else { stderr };
                tracing::error!(file = %file, error = %reason, "tag write failed");
                TagWriteOutcome::rejected(format!("ExifTool error: {}", reason))
            }
            Err(e) => {
                tracing::error!(file = %file, error = %e, "tag write failed");
                TagWriteOutcome::rejected(e.to_string())
            }
        }
    }

    /// Write tags, then re-read the file through the exiftool adapter on success.
    pub fn write_and_confirm(&self, path: &Path, request: &TagWriteRequest) -> ConfirmedWrite {
        let outcome = self.write(path, request);
        let metadata = outcome
            .success()
            .then(|| ExiftoolExtractor.extract(&self.ctx, path));
        ConfirmedWrite { outcome, metadata }
    }
}
