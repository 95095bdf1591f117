//! Filesystem inspection.
//!
//! Produces the `file_info` entry of a report from `stat` data and the file
//! name alone. No external tool is involved.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::{EngineError, EngineResult};
use crate::models::{FileFacts, FileInfo};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Collect filesystem facts for a path.
///
/// A failing `stat` yields [`FileInfo::Failed`] instead of partial facts.
pub fn inspect(path: &Path) -> FileInfo {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "stat failed");
            return FileInfo::Failed(e.to_string());
        }
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let modified = metadata.modified().ok();
    // Birth time is not reported on every filesystem.
    let created = metadata.created().ok().or(modified);
    let accessed = metadata.accessed().ok().or(modified);

    let size = metadata.len();

    FileInfo::Facts(FileFacts {
        name,
        extension,
        mime_type,
        size,
        size_formatted: format_size(size),
        created: format_time(created),
        modified: format_time(modified),
        accessed: format_time(accessed),
    })
}

/// Render a byte count with two decimals in the largest unit below 1024.
///
/// Units step by 1024 through B, KB, MB, GB and TB; anything larger is
/// reported in PB.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in SIZE_UNITS {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} PB", value)
}

/// Check that a path names an existing regular file.
pub fn ensure_readable_file(path: &Path) -> EngineResult<()> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(EngineError::NotAFile(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(EngineError::FileNotFound(path.to_path_buf()))
        }
        Err(source) => Err(EngineError::Inaccessible {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn format_time(time: Option<SystemTime>) -> String {
    time.map(|t| DateTime::<Local>::from(t).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}
