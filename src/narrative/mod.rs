//! Schedule-to-narrative derivation.
//!
//! Reconstructs an ordered sequence of explanation steps from an executed
//! timeline. The scheduling service sends no event log, so every step is
//! inferred from the shape of the timeline.
//!
//! # Pipeline
//!
//! 1. **Synthesis**: bootstrap, arrivals, executions and their inferred
//!    consequences (completion, demotion, promotion), context switches.
//! 2. **Boost expansion**: one step per MLFQ boost period up to the
//!    timeline horizon.
//! 3. **Ordering**: stable sort on `(time, event rank)`.
//!
//! Rationale text is attached during synthesis, so each step and its
//! justification are produced together.
//!
//! # Usage
//!
//! ```
//! use u_sched_narrative::models::{
//!     AlgorithmConfig, ProcessDescriptor, ProcessOutcome, TimelineEntry,
//! };
//! use u_sched_narrative::narrative::{EventType, NarrativeEngine};
//!
//! let processes = vec![ProcessDescriptor::new(1, 5.0)];
//! let timeline = vec![TimelineEntry::execution(1, 0.0, 5.0)];
//! let outcomes = vec![ProcessOutcome::new(1, 5.0).with_turnaround(5.0)];
//!
//! let engine = NarrativeEngine::new();
//! let narrative = engine.explain(&timeline, &processes, &outcomes, &AlgorithmConfig::Fcfs);
//! let kinds: Vec<_> = narrative.steps.iter().map(|s| s.event_type).collect();
//! assert_eq!(kinds, vec![EventType::Arrival, EventType::Execution, EventType::Completion]);
//! ```

mod boosts;
mod config;
mod order;
pub mod rationale;
mod synthesizer;

pub use boosts::expand_boosts;
pub use config::ExplainConfig;
pub use order::order;
pub use synthesizer::synthesize;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cursor::NavigationCursor;
use crate::models::{
    AlgorithmConfig, ProcessDescriptor, ProcessOutcome, SchedulerResponse, TimelineEntry,
};
use crate::validation;

/// Kind of narrated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Simulation start or a process entering the ready queue.
    Arrival,
    /// A process runs on the CPU.
    Execution,
    /// Demoted to a lower MLFQ queue, or preempted under round robin.
    Demotion,
    /// Moved up to a higher MLFQ queue.
    Promotion,
    /// A process finished its burst.
    Completion,
    /// Switch overhead between two processes.
    ContextSwitch,
    /// Global MLFQ priority boost.
    Boost,
}

impl EventType {
    /// Tie-break rank for events sharing a timestamp (lower first).
    ///
    /// Order: arrival, boost, promotion, execution, demotion,
    /// completion, context switch.
    pub fn rank(self) -> u8 {
        match self {
            EventType::Arrival => 0,
            EventType::Boost => 1,
            EventType::Promotion => 2,
            EventType::Execution => 3,
            EventType::Demotion => 4,
            EventType::Completion => 5,
            EventType::ContextSwitch => 6,
        }
    }
}

/// One narrated, timestamped event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationStep {
    /// When the event happens.
    pub time: f64,
    /// Event kind.
    pub event_type: EventType,
    pub title: String,
    pub summary: String,
    /// Supporting facts, one per line.
    pub detail_lines: Vec<String>,
    pub rationale: String,
    /// Process involved, if any. Boosts have none.
    pub process_id: Option<u32>,
    /// MLFQ queue involved, if any.
    pub queue_level: Option<usize>,
}

impl ExplanationStep {
    /// Creates a step with empty text.
    pub fn new(time: f64, event_type: EventType) -> Self {
        Self {
            time,
            event_type,
            title: String::new(),
            summary: String::new(),
            detail_lines: Vec::new(),
            rationale: String::new(),
            process_id: None,
            queue_level: None,
        }
    }

    /// Sets the headline.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the one-sentence summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Appends a detail line.
    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.detail_lines.push(line.into());
        self
    }

    /// Sets the explanation of why the event happened.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Sets the process the step is about.
    pub fn with_process(mut self, process_id: u32) -> Self {
        self.process_id = Some(process_id);
        self
    }

    /// Sets the MLFQ queue level.
    pub fn with_queue(mut self, level: usize) -> Self {
        self.queue_level = Some(level);
        self
    }
}

/// The derived story of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    /// Steps in presentation order.
    pub steps: Vec<ExplanationStep>,
    /// Processes that never appear in an execution interval.
    pub never_scheduled: Vec<u32>,
}

impl Narrative {
    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps of one event type, in order.
    pub fn steps_of(&self, event_type: EventType) -> impl Iterator<Item = &ExplanationStep> {
        self.steps.iter().filter(move |s| s.event_type == event_type)
    }

    /// A fresh cursor positioned on the first step.
    pub fn cursor(&self) -> NavigationCursor {
        NavigationCursor::new(self.steps.len())
    }
}

/// Runs the derivation pipeline with a fixed set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct NarrativeEngine {
    config: ExplainConfig,
}

impl NarrativeEngine {
    /// Creates an engine with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given thresholds, rejecting invalid ones.
    pub fn with_config(config: ExplainConfig) -> crate::error::NarrativeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active thresholds.
    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    /// Derives the narrative for one run.
    pub fn explain(
        &self,
        timeline: &[TimelineEntry],
        processes: &[ProcessDescriptor],
        outcomes: &[ProcessOutcome],
        algorithm: &AlgorithmConfig,
    ) -> Narrative {
        if let Err(issues) = validation::validate_input(timeline, processes, outcomes) {
            for issue in &issues {
                tracing::warn!(kind = ?issue.kind, "{}", issue.message);
            }
        }

        let mut steps = synthesize(timeline, processes, outcomes, algorithm, &self.config);
        if let Some(mlfq) = algorithm.as_mlfq() {
            if mlfq.boosts_enabled() {
                steps.extend(expand_boosts(timeline, mlfq, &self.config));
            }
        }
        let steps = order(steps);

        let scheduled: HashSet<u32> = timeline
            .iter()
            .filter(|e| e.is_execution())
            .filter_map(|e| e.process_id)
            .collect();
        let mut never_scheduled: Vec<u32> = processes
            .iter()
            .map(|p| p.id)
            .filter(|id| !scheduled.contains(id))
            .collect();
        never_scheduled.sort_unstable();
        never_scheduled.dedup();
        for pid in &never_scheduled {
            tracing::warn!(pid, "process was never scheduled");
        }

        tracing::debug!(
            algorithm = algorithm.name(),
            entries = timeline.len(),
            steps = steps.len(),
            "narrative derived"
        );

        Narrative {
            steps,
            never_scheduled,
        }
    }

    /// Derives the narrative from a parsed service response.
    pub fn explain_response(
        &self,
        response: &SchedulerResponse,
        processes: &[ProcessDescriptor],
        algorithm: &AlgorithmConfig,
    ) -> Narrative {
        self.explain(&response.schedule, processes, &response.processes, algorithm)
    }
}

/// Derives a narrative with default thresholds.
pub fn explain(
    timeline: &[TimelineEntry],
    processes: &[ProcessDescriptor],
    outcomes: &[ProcessOutcome],
    algorithm: &AlgorithmConfig,
) -> Narrative {
    NarrativeEngine::new().explain(timeline, processes, outcomes, algorithm)
}

/// Formats a time value with at most two decimals, trimming zeros.
pub(crate) fn fmt_time(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
