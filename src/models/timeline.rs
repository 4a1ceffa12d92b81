//! Execution timeline model.
//!
//! A timeline is the list of intervals the scheduling service actually
//! executed. It is the only record of what happened: there is no event
//! log, so every narrated transition is inferred from the shape of this
//! list.
//!
//! Entries are not guaranteed to be sorted or overlap-free. Consumers
//! look at neighbours by index, never by searching on time.

use serde::{Deserialize, Serialize};

/// What the CPU was doing during an interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A process ran on the CPU.
    #[default]
    Execution,
    /// Switching overhead between two processes.
    #[serde(alias = "contextSwitch")]
    ContextSwitch,
    /// Nothing was ready to run.
    Idle,
}

/// One contiguous interval of the executed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Subject process. Absent (or 0) for non-execution intervals.
    #[serde(default, alias = "processId", alias = "pid")]
    pub process_id: Option<u32>,
    /// Interval start.
    #[serde(alias = "startTime", alias = "start")]
    pub start_time: f64,
    /// Interval end.
    #[serde(alias = "endTime", alias = "end")]
    pub end_time: f64,
    /// Interval kind. The service names this field `type`.
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: EntryKind,
    /// MLFQ queue the process was dispatched from. `None` means a single
    /// flat ready queue.
    #[serde(default, alias = "queueLevel")]
    pub queue_level: Option<usize>,
}

impl TimelineEntry {
    /// Creates an execution interval for a process.
    pub fn execution(process_id: u32, start_time: f64, end_time: f64) -> Self {
        Self {
            process_id: Some(process_id),
            start_time,
            end_time,
            kind: EntryKind::Execution,
            queue_level: None,
        }
    }

    /// Creates a context-switch interval.
    pub fn context_switch(start_time: f64, end_time: f64) -> Self {
        Self {
            process_id: None,
            start_time,
            end_time,
            kind: EntryKind::ContextSwitch,
            queue_level: None,
        }
    }

    /// Creates an idle interval.
    pub fn idle(start_time: f64, end_time: f64) -> Self {
        Self {
            process_id: None,
            start_time,
            end_time,
            kind: EntryKind::Idle,
            queue_level: None,
        }
    }

    /// Sets the MLFQ queue level.
    pub fn with_queue(mut self, level: usize) -> Self {
        self.queue_level = Some(level);
        self
    }

    /// Interval length (`end - start`). Not clamped: inverted intervals
    /// yield a negative value.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether a process ran during this interval.
    #[inline]
    pub fn is_execution(&self) -> bool {
        self.kind == EntryKind::Execution
    }

    /// Whether this entry and `other` name different subject processes.
    ///
    /// Entries without a process id never match anything.
    pub fn differs_from(&self, other: &TimelineEntry) -> bool {
        match (self.process_id, other.process_id) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }
}

/// Latest end time across all entries. `None` for an empty timeline.
pub fn horizon(timeline: &[TimelineEntry]) -> Option<f64> {
    timeline
        .iter()
        .map(|e| e.end_time)
        .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |m| m.max(t))))
}

/// Execution entries for one process, in timeline order.
pub fn executions_for_process(
    timeline: &[TimelineEntry],
    process_id: u32,
) -> impl Iterator<Item = &TimelineEntry> {
    timeline
        .iter()
        .filter(move |e| e.is_execution() && e.process_id == Some(process_id))
}

/// Total execution time across all execution entries.
pub fn busy_time(timeline: &[TimelineEntry]) -> f64 {
    timeline
        .iter()
        .filter(|e| e.is_execution())
        .map(|e| e.duration())
        .sum()
}
