//! Normalized result of a single extractor run.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use super::enums::ToolName;

/// A normalized key/value tree.
///
/// Values mirror the tool's own output shape: scalars, nested mappings
/// or sequences.
pub type Record = Map<String, Value>;

/// Outcome of one extractor run.
///
/// Created fresh per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The tool ran and its output was normalized.
    Record(Record),
    /// The tool is not installed or did not answer its probe.
    ToolUnavailable(ToolName),
    /// The tool ran but failed, timed out or produced unparsable output.
    ToolFailed(String),
    /// The tool ran successfully but reported nothing.
    Empty,
}

impl ExtractionOutcome {
    /// Create a failure outcome.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::ToolFailed(message.into())
    }

    /// Whether this outcome carries data.
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// The normalized record, if any.
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Message rendered under the `error` key for non-record outcomes.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Record(_) => None,
            Self::ToolUnavailable(tool) => Some(format!("{} not installed", tool.label())),
            Self::ToolFailed(message) => Some(message.clone()),
            Self::Empty => Some("No metadata found".to_string()),
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::ToolUnavailable(_) => "unavailable",
            Self::ToolFailed(_) => "failed",
            Self::Empty => "empty",
        }
    }
}

/// Records serialize as themselves; everything else as `{"error": ...}`.
impl Serialize for ExtractionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Record(record) => record.serialize(serializer),
            other => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &other.error_message().unwrap_or_default())?;
                map.end()
            }
        }
    }
}
