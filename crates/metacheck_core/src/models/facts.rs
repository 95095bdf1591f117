//! Filesystem-level facts about the inspected file.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// Facts derived purely from filesystem metadata.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct FileFacts {
    /// File name without directories.
    pub name: String,
    /// Lowercased extension including the dot, or empty.
    pub extension: String,
    /// MIME type guessed from the extension, or `unknown`.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Human-readable size (e.g. `1.50 KB`).
    pub size_formatted: String,
    /// Creation (or status change) time, ISO 8601 local time.
    pub created: String,
    /// Last modification time, ISO 8601 local time.
    pub modified: String,
    /// Last access time, ISO 8601 local time.
    pub accessed: String,
}

/// The `file_info` entry of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum FileInfo {
    Facts(FileFacts),
    /// The stat call failed; no partial facts are reported.
    Failed(String),
}

impl FileInfo {
    /// The facts, if the stat call succeeded.
    pub fn facts(&self) -> Option<&FileFacts> {
        match self {
            FileInfo::Facts(facts) => Some(facts),
            FileInfo::Failed(_) => None,
        }
    }
}

impl Serialize for FileInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FileInfo::Facts(facts) => facts.serialize(serializer),
            FileInfo::Failed(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}
