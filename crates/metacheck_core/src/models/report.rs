//! The composite per-file report.

use serde::Serialize;

use super::enums::Source;
use super::facts::FileInfo;
use super::outcome::ExtractionOutcome;

/// Composite document for one file.
///
/// Every source has a field, so a key can never be missing. Fields
/// serialize in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub file_info: FileInfo,
    pub exiftool: ExtractionOutcome,
    pub mediainfo: ExtractionOutcome,
    pub ffprobe: ExtractionOutcome,
    pub pdf: ExtractionOutcome,
    pub identify: ExtractionOutcome,
    pub file: ExtractionOutcome,
    pub zipinfo: ExtractionOutcome,
    pub strings: ExtractionOutcome,
}

impl AggregateReport {
    /// Every top-level key, in serialization order.
    pub const KEYS: [&'static str; 9] = [
        "file_info",
        "exiftool",
        "mediainfo",
        "ffprobe",
        "pdf",
        "identify",
        "file",
        "zipinfo",
        "strings",
    ];

    /// Create a report where every source is still marked as not run.
    pub fn pending(file_info: FileInfo) -> Self {
        let pending = || ExtractionOutcome::failed("extractor did not run");
        Self {
            file_info,
            exiftool: pending(),
            mediainfo: pending(),
            ffprobe: pending(),
            pdf: pending(),
            identify: pending(),
            file: pending(),
            zipinfo: pending(),
            strings: pending(),
        }
    }

    /// Outcome recorded for a source.
    pub fn get(&self, source: Source) -> &ExtractionOutcome {
        match source {
            Source::Exiftool => &self.exiftool,
            Source::Mediainfo => &self.mediainfo,
            Source::Ffprobe => &self.ffprobe,
            Source::Pdf => &self.pdf,
            Source::Identify => &self.identify,
            Source::File => &self.file,
            Source::Zipinfo => &self.zipinfo,
            Source::Strings => &self.strings,
        }
    }

    /// Record the outcome for a source, replacing the previous one.
    pub fn set(&mut self, source: Source, outcome: ExtractionOutcome) {
        let slot = match source {
            Source::Exiftool => &mut self.exiftool,
            Source::Mediainfo => &mut self.mediainfo,
            Source::Ffprobe => &mut self.ffprobe,
            Source::Pdf => &mut self.pdf,
            Source::Identify => &mut self.identify,
            Source::File => &mut self.file,
            Source::Zipinfo => &mut self.zipinfo,
            Source::Strings => &mut self.strings,
        };
        *slot = outcome;
    }

    /// Iterate over extractor-backed outcomes in report order.
    pub fn outcomes(&self) -> impl Iterator<Item = (Source, &ExtractionOutcome)> {
        Source::ALL.into_iter().map(move |source| (source, self.get(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_exactly_the_fixed_keys_in_order() {
        let report = AggregateReport::pending(FileInfo::Failed("gone".to_string()));
        let json = serde_json::to_string(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), AggregateReport::KEYS.len());
        for key in AggregateReport::KEYS {
            assert!(object.contains_key(key), "missing key {key}");
        }

        // Declaration order is preserved in the raw text.
        let positions: Vec<usize> = AggregateReport::KEYS
            .iter()
            .map(|key| json.find(&format!("\"{key}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn set_and_get_address_the_same_slot() {
        let mut report = AggregateReport::pending(FileInfo::Failed("x".to_string()));
        report.set(Source::Pdf, ExtractionOutcome::Empty);
        assert_eq!(report.get(Source::Pdf), &ExtractionOutcome::Empty);
        assert_ne!(report.get(Source::Exiftool), &ExtractionOutcome::Empty);
        assert_eq!(report.outcomes().count(), 8);
    }
}
