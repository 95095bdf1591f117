//! Tool availability registry.
//!
//! Availability is probed lazily with the tool's version query and cached
//! for the lifetime of the registry. An entry is written once and never
//! invalidated; installing or removing a tool while the process runs is
//! not noticed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use super::runner::{CommandRunner, Invocation};
use crate::config::ToolSettings;
use crate::models::ToolName;

/// Answers whether a tool may be invoked.
pub trait Availability: Send + Sync {
    fn is_available(&self, tool: ToolName) -> bool;
}

/// Closures make convenient fixed registries.
impl<F> Availability for F
where
    F: Fn(ToolName) -> bool + Send + Sync,
{
    fn is_available(&self, tool: ToolName) -> bool {
        self(tool)
    }
}

/// Availability of one tool, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub tool: ToolName,
    pub available: bool,
}

/// Availability of every known tool, in report order.
pub fn tools_status(availability: &dyn Availability) -> Vec<ToolStatus> {
    ToolName::ALL
        .into_iter()
        .map(|tool| ToolStatus {
            tool,
            available: availability.is_available(tool),
        })
        .collect()
}

/// Process-wide availability cache backed by real probes.
pub struct ToolRegistry {
    runner: Arc<dyn CommandRunner>,
    settings: ToolSettings,
    cache: RwLock<HashMap<ToolName, bool>>,
}

impl ToolRegistry {
    /// Create a registry with an empty cache.
    pub fn new(runner: Arc<dyn CommandRunner>, settings: ToolSettings) -> Self {
        Self {
            runner,
            settings,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Cached value for a tool, without probing.
    pub fn cached(&self, tool: ToolName) -> Option<bool> {
        self.cache.read().get(&tool).copied()
    }

    /// Run the version query. Zero exit status is required.
    fn probe(&self, tool: ToolName) -> bool {
        let program = self.settings.program(tool);
        tracing::info!(tool = %tool, program = %program, "checking if tool is available");

        let invocation = Invocation::new(program.as_str(), self.settings.probe_timeout())
            .args(tool.probe_args().iter().copied());

        match self.runner.run(&invocation) {
            Ok(output) if output.success => {
                tracing::info!(tool = %tool, "tool is available");
                true
            }
            Ok(output) => {
                tracing::info!(
                    tool = %tool,
                    reason = %output.diagnostic(&program),
                    "tool not available"
                );
                false
            }
            Err(e) => {
                tracing::info!(tool = %tool, reason = %e, "tool not available");
                false
            }
        }
    }
}

impl Availability for ToolRegistry {
    fn is_available(&self, tool: ToolName) -> bool {
        if let Some(available) = self.cached(tool) {
            return available;
        }

        // Probe without holding the lock. Two racing first calls may both
        // probe; the first result stored wins.
        let probed = self.probe(tool);
        *self.cache.write().entry(tool).or_insert(probed)
    }
}
