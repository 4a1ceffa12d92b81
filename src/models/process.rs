//! Process models.
//!
//! A [`ProcessDescriptor`] is what the user configured before the run;
//! a [`ProcessOutcome`] is what the scheduling service reports back for
//! the same process once the run is over.
//!
//! # Time Representation
//! All times are abstract simulation time units relative to t=0. The
//! service works in reals, so every time field is `f64`.

use serde::{Deserialize, Serialize};

/// A process submitted to the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Unique process identifier.
    #[serde(alias = "pid")]
    pub id: u32,
    /// Time at which the process enters the ready queue.
    #[serde(default, alias = "arrivalTime")]
    pub arrival_time: f64,
    /// Total CPU time the process needs.
    #[serde(alias = "burstTime")]
    pub burst_time: f64,
    /// Scheduling priority (lower number = more urgent). `None` when the
    /// algorithm ignores priorities.
    #[serde(default)]
    pub priority: Option<i32>,
}

impl ProcessDescriptor {
    /// Creates a process arriving at t=0 with the given burst time.
    pub fn new(id: u32, burst_time: f64) -> Self {
        Self {
            id,
            arrival_time: 0.0,
            burst_time,
            priority: None,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_time: f64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the process arrives after the run starts.
    #[inline]
    pub fn arrives_late(&self) -> bool {
        self.arrival_time > 0.0
    }
}

/// Per-process result reported by the scheduling service.
///
/// `completion_time` is the ground truth for detecting the interval in
/// which a process finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Process identifier.
    #[serde(alias = "processId")]
    pub pid: u32,
    #[serde(default, alias = "burstTime")]
    pub burst_time: f64,
    #[serde(default, alias = "waitingTime")]
    pub waiting_time: f64,
    #[serde(default, alias = "turnaroundTime")]
    pub turnaround_time: f64,
    #[serde(alias = "completionTime")]
    pub completion_time: f64,
}

impl ProcessOutcome {
    /// Creates an outcome; turnaround and waiting time default to zero.
    pub fn new(pid: u32, completion_time: f64) -> Self {
        Self {
            pid,
            burst_time: 0.0,
            waiting_time: 0.0,
            turnaround_time: 0.0,
            completion_time,
        }
    }

    /// Sets the burst time.
    pub fn with_burst(mut self, burst_time: f64) -> Self {
        self.burst_time = burst_time;
        self
    }

    /// Sets the waiting time.
    pub fn with_waiting(mut self, waiting_time: f64) -> Self {
        self.waiting_time = waiting_time;
        self
    }

    /// Sets the turnaround time.
    pub fn with_turnaround(mut self, turnaround_time: f64) -> Self {
        self.turnaround_time = turnaround_time;
        self
    }

    /// Whether `time` matches the completion time within `tolerance`.
    #[inline]
    pub fn completes_at(&self, time: f64, tolerance: f64) -> bool {
        (time - self.completion_time).abs() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let p = ProcessDescriptor::new(3, 6.0)
            .with_arrival(2.0)
            .with_priority(1);

        assert_eq!(p.id, 3);
        assert_eq!(p.burst_time, 6.0);
        assert_eq!(p.arrival_time, 2.0);
        assert_eq!(p.priority, Some(1));
        assert!(p.arrives_late());
        assert!(!ProcessDescriptor::new(1, 1.0).arrives_late());
    }

    #[test]
    fn test_outcome_completes_at() {
        let o = ProcessOutcome::new(1, 5.0);
        assert!(o.completes_at(5.0, 0.1));
        assert!(o.completes_at(5.05, 0.1));
        // 5.1 - 5.0 drifts just below 0.1 in f64.
        assert!(o.completes_at(5.1, 0.1));
        assert!(!o.completes_at(5.2, 0.1));
        assert!(!o.completes_at(4.85, 0.1));
        assert!(!o.completes_at(2.0, 0.1));
    }

    #[test]
    fn test_descriptor_accepts_both_casings() {
        let snake: ProcessDescriptor =
            serde_json::from_str(r#"{"pid": 2, "arrival_time": 1.0, "burst_time": 4}"#).unwrap();
        let camel: ProcessDescriptor =
            serde_json::from_str(r#"{"id": 2, "arrivalTime": 1.0, "burstTime": 4}"#).unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.priority, None);
    }

    #[test]
    fn test_outcome_defaults_missing_fields() {
        let o: ProcessOutcome =
            serde_json::from_str(r#"{"pid": 1, "completion_time": 8.5}"#).unwrap();
        assert_eq!(o.completion_time, 8.5);
        assert_eq!(o.waiting_time, 0.0);
    }
}
