//! Report assembly.
//!
//! The aggregator runs every adapter against one file and merges the
//! outcomes into an [`AggregateReport`]. Adapters run concurrently on
//! scoped threads by default; each is bounded by its own command timeouts,
//! so the slowest adapter bounds the whole request.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::thread;
use std::time::Instant;

use crate::extraction::{standard_extractors, Extractor, ToolContext};
use crate::inspect::inspect;
use crate::logging::file_label;
use crate::models::{AggregateReport, ExtractionOutcome, Source};

/// Runs a fixed set of adapters and builds the composite report.
pub struct Aggregator {
    ctx: ToolContext,
    extractors: Vec<Box<dyn Extractor>>,
    parallel: bool,
}

impl Aggregator {
    /// Aggregator over the standard adapter set.
    pub fn new(ctx: ToolContext, parallel: bool) -> Self {
        Self {
            ctx,
            extractors: standard_extractors(),
            parallel,
        }
    }

    /// Aggregator with no adapters; every source stays pending until one is added.
    pub fn empty(ctx: ToolContext, parallel: bool) -> Self {
        Self {
            ctx,
            extractors: Vec::new(),
            parallel,
        }
    }

    /// Add an adapter. A later adapter for the same source replaces the earlier result.
    pub fn add_extractor<E: Extractor + 'static>(&mut self, extractor: E) -> &mut Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Add an adapter (builder pattern).
    pub fn with_extractor<E: Extractor + 'static>(mut self, extractor: E) -> Self {
        self.add_extractor(extractor);
        self
    }

    /// Context shared by all adapters.
    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// Build the report for one file.
    ///
    /// Never fails: filesystem errors land in `file_info`, tool errors in
    /// the matching source entry. Every report key is always present.
    pub fn aggregate(&self, path: &Path) -> AggregateReport {
        let started = Instant::now();
        let file = file_label(path);
        tracing::info!(file = %file, parallel = self.parallel, "aggregating metadata");

        let mut report = AggregateReport::pending(inspect(path));

        let results = if self.parallel {
            self.run_parallel(path)
        } else {
            self.run_sequential(path)
        };

        for (source, outcome) in results {
            tracing::debug!(source = %source, file = %file, outcome = outcome.kind(), "recorded");
            report.set(source, outcome);
        }

        let extracted = report.outcomes().filter(|(_, o)| o.is_record()).count();
        tracing::info!(
            file = %file,
            extracted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report assembled"
        );

        report
    }

    fn run_sequential(&self, path: &Path) -> Vec<(Source, ExtractionOutcome)> {
        self.extractors
            .iter()
            .map(|extractor| {
                let outcome = guarded_extract(extractor.as_ref(), &self.ctx, path);
                (extractor.source(), outcome)
            })
            .collect()
    }

    fn run_parallel(&self, path: &Path) -> Vec<(Source, ExtractionOutcome)> {
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .extractors
                .iter()
                .map(|extractor| {
                    let ctx = &self.ctx;
                    let handle = scope.spawn(move || guarded_extract(extractor.as_ref(), ctx, path));
                    (extractor.source(), handle)
                })
                .collect();

            // Joined in registration order, so results are deterministic.
            handles
                .into_iter()
                .map(|(source, handle)| {
                    let outcome = handle.join().unwrap_or_else(|panic| {
                        ExtractionOutcome::failed(format!(
                            "extractor panicked: {}",
                            panic_message(panic.as_ref())
                        ))
                    });
                    (source, outcome)
                })
                .collect()
        })
    }
}

/// Run one adapter, turning a panic into a failure outcome.
fn guarded_extract(extractor: &dyn Extractor, ctx: &ToolContext, path: &Path) -> ExtractionOutcome {
    panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(ctx, path))).unwrap_or_else(|panic| {
        let source = extractor.source();
        let message = panic_message(panic.as_ref());
        tracing::error!(source = %source, error = %message, "extractor panicked");
        ExtractionOutcome::failed(format!("extractor panicked: {}", message))
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
