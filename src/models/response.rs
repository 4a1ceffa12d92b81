//! Scheduling service response.
//!
//! The payload the service returns for one run: per-process outcomes,
//! the executed timeline, and aggregate metrics. Upstream payloads are
//! not always complete, so every part is optional on the wire.

use serde::{Deserialize, Serialize};

use super::{ProcessOutcome, TimelineEntry};
use crate::error::NarrativeResult;
use crate::metrics::SchedulingMetrics;

/// Result of one scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerResponse {
    /// Per-process outcomes.
    #[serde(default)]
    pub processes: Vec<ProcessOutcome>,
    /// Executed timeline.
    #[serde(default)]
    pub schedule: Vec<TimelineEntry>,
    /// Aggregate metrics computed by the service.
    #[serde(default)]
    pub metrics: Option<SchedulingMetrics>,
}

impl SchedulerResponse {
    /// Creates a response from outcomes and a timeline, without metrics.
    pub fn new(processes: Vec<ProcessOutcome>, schedule: Vec<TimelineEntry>) -> Self {
        Self {
            processes,
            schedule,
            metrics: None,
        }
    }

    /// Sets the metrics.
    pub fn with_metrics(mut self, metrics: SchedulingMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Parses a service payload.
    ///
    /// Accepts either the bare result object or the service envelope
    /// (`{"success": .., "data": {..}}`). A `null` data field yields an
    /// empty response.
    pub fn from_json(json: &str) -> NarrativeResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let body = match value.get("data") {
            Some(data) if value.get("success").is_some() => data.clone(),
            _ => value,
        };
        if body.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Service metrics when present, otherwise metrics derived from the
    /// outcomes and timeline.
    pub fn metrics_or_derived(&self) -> SchedulingMetrics {
        self.metrics
            .clone()
            .unwrap_or_else(|| SchedulingMetrics::calculate(&self.processes, &self.schedule))
    }

    /// Outcome for a given process.
    pub fn outcome_for(&self, pid: u32) -> Option<&ProcessOutcome> {
        self.processes.iter().find(|o| o.pid == pid)
    }
}
