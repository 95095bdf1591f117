//! Data models shared across the engine.
//!
//! - [`ToolName`] / [`Source`]: the closed sets of tools and report keys
//! - [`ExtractionOutcome`]: the normalized result of one adapter run
//! - [`FileFacts`] / [`FileInfo`]: filesystem-level facts
//! - [`AggregateReport`]: the composite document for one file

mod enums;
mod facts;
mod outcome;
mod report;

pub use enums::{Source, ToolName};
pub use facts::{FileFacts, FileInfo};
pub use outcome::{ExtractionOutcome, Record};
pub use report::AggregateReport;
