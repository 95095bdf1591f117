//! Closed sets of external tools and report sources.

use serde::{Deserialize, Serialize};

/// One of the external extraction utilities the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolName {
    Exiftool,
    Mediainfo,
    Ffprobe,
    Identify,
    File,
    Zipinfo,
    Strings,
}

impl ToolName {
    /// Every tool, in report order.
    pub const ALL: [ToolName; 7] = [
        ToolName::Exiftool,
        ToolName::Mediainfo,
        ToolName::Ffprobe,
        ToolName::Identify,
        ToolName::File,
        ToolName::Zipinfo,
        ToolName::Strings,
    ];

    /// Default executable name.
    pub fn program(&self) -> &'static str {
        match self {
            ToolName::Exiftool => "exiftool",
            ToolName::Mediainfo => "mediainfo",
            ToolName::Ffprobe => "ffprobe",
            ToolName::Identify => "identify",
            ToolName::File => "file",
            ToolName::Zipinfo => "zipinfo",
            ToolName::Strings => "strings",
        }
    }

    /// Name used in "not installed" messages.
    ///
    /// `file` and `strings` are ordinary words, so they are qualified.
    pub fn label(&self) -> &'static str {
        match self {
            ToolName::File => "file command",
            ToolName::Strings => "strings command",
            other => other.program(),
        }
    }

    /// Arguments of the cheap version query used as an availability probe.
    pub fn probe_args(&self) -> &'static [&'static str] {
        match self {
            ToolName::Exiftool => &["-ver"],
            ToolName::Mediainfo => &["--version"],
            ToolName::Ffprobe => &["-version"],
            ToolName::Identify => &["-version"],
            ToolName::File => &["--version"],
            ToolName::Zipinfo => &["-v"],
            ToolName::Strings => &["--version"],
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

/// A key of the aggregate report backed by an extractor.
///
/// `Pdf` has no tool of its own; it re-runs exiftool under a separate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Exiftool,
    Mediainfo,
    Ffprobe,
    Pdf,
    Identify,
    File,
    Zipinfo,
    Strings,
}

impl Source {
    /// Every extractor-backed source, in report order.
    pub const ALL: [Source; 8] = [
        Source::Exiftool,
        Source::Mediainfo,
        Source::Ffprobe,
        Source::Pdf,
        Source::Identify,
        Source::File,
        Source::Zipinfo,
        Source::Strings,
    ];

    /// Report key for this source.
    pub fn key(&self) -> &'static str {
        match self {
            Source::Exiftool => "exiftool",
            Source::Mediainfo => "mediainfo",
            Source::Ffprobe => "ffprobe",
            Source::Pdf => "pdf",
            Source::Identify => "identify",
            Source::File => "file",
            Source::Zipinfo => "zipinfo",
            Source::Strings => "strings",
        }
    }

    /// The tool that backs this source.
    pub fn tool(&self) -> ToolName {
        match self {
            Source::Exiftool | Source::Pdf => ToolName::Exiftool,
            Source::Mediainfo => ToolName::Mediainfo,
            Source::Ffprobe => ToolName::Ffprobe,
            Source::Identify => ToolName::Identify,
            Source::File => ToolName::File,
            Source::Zipinfo => ToolName::Zipinfo,
            Source::Strings => ToolName::Strings,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_program_name() {
        for tool in ToolName::ALL {
            assert_eq!(tool.to_string(), tool.program());
        }
        assert_eq!(ToolName::Identify.program(), "identify");
    }

    #[test]
    fn pdf_is_backed_by_exiftool() {
        assert_eq!(Source::Pdf.tool(), ToolName::Exiftool);
        assert_eq!(Source::Pdf.key(), "pdf");
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ToolName::Ffprobe).unwrap(), "\"ffprobe\"");
        assert_eq!(serde_json::to_string(&Source::Zipinfo).unwrap(), "\"zipinfo\"");
    }
}
