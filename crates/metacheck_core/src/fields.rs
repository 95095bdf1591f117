//! Suggested writable tags per media category.
//!
//! Purely advisory: the writer accepts any tag name that survives
//! sanitization, and exiftool decides whether the file format supports it.

use serde::{Deserialize, Serialize};

/// Media category used to pick a tag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    #[default]
    Common,
    Image,
    Video,
    Audio,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 4] = [
        FieldCategory::Common,
        FieldCategory::Image,
        FieldCategory::Video,
        FieldCategory::Audio,
    ];

    /// Parse a category name, falling back to `Common` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            _ => Self::Common,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// Tag names suggested for this category.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Common => &COMMON_FIELDS,
            Self::Image => &IMAGE_FIELDS,
            Self::Video => &VIDEO_FIELDS,
            Self::Audio => &AUDIO_FIELDS,
        }
    }
}

impl std::fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

const COMMON_FIELDS: [&str; 10] = [
    "Title",
    "Description",
    "Comment",
    "Keywords",
    "Subject",
    "Author",
    "Creator",
    "Copyright",
    "Software",
    "Rating",
];

const IMAGE_FIELDS: [&str; 10] = [
    "Artist",
    "Make",
    "Model",
    "DateTime",
    "GPSLatitude",
    "GPSLongitude",
    "Orientation",
    "XResolution",
    "YResolution",
    "ResolutionUnit",
];

const VIDEO_FIELDS: [&str; 11] = [
    "Title", "Artist", "Album", "Genre", "Year", "Track", "Composer", "Director", "Producer",
    "Show", "Episode",
];

const AUDIO_FIELDS: [&str; 10] = [
    "Title", "Artist", "Album", "Genre", "Year", "Track", "Composer", "Publisher", "BPM", "Lyrics",
];

/// Suggested tags for a category name; unknown names get the common list.
pub fn supported_fields(category: &str) -> &'static [&'static str] {
    FieldCategory::from_name(category).fields()
}
