//! Aggregate run metrics.
//!
//! The scheduling service reports these alongside each run. When a
//! payload arrives without them they can be derived from the outcomes
//! and the timeline.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting Time | mean(waiting_time) over outcomes |
//! | Avg Turnaround Time | mean(turnaround_time) over outcomes |
//! | CPU Utilization | busy execution time / horizon × 100 |
//! | Throughput | completed processes / horizon |

use serde::{Deserialize, Serialize};

use crate::models::{timeline, ProcessOutcome, TimelineEntry};

/// Aggregate performance of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulingMetrics {
    #[serde(default, alias = "averageWaitingTime")]
    pub average_waiting_time: f64,
    #[serde(default, alias = "averageTurnaroundTime")]
    pub average_turnaround_time: f64,
    /// Percentage (0..=100).
    #[serde(default, alias = "cpuUtilization")]
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    #[serde(default)]
    pub throughput: Option<f64>,
}

impl SchedulingMetrics {
    /// Derives metrics from outcomes and the executed timeline.
    pub fn calculate(outcomes: &[ProcessOutcome], schedule: &[TimelineEntry]) -> Self {
        let count = outcomes.len();
        let (average_waiting_time, average_turnaround_time) = if count == 0 {
            (0.0, 0.0)
        } else {
            let waiting: f64 = outcomes.iter().map(|o| o.waiting_time).sum();
            let turnaround: f64 = outcomes.iter().map(|o| o.turnaround_time).sum();
            (waiting / count as f64, turnaround / count as f64)
        };

        let horizon = timeline::horizon(schedule).unwrap_or(0.0);
        let (cpu_utilization, throughput) = if horizon > 0.0 {
            (
                timeline::busy_time(schedule) / horizon * 100.0,
                Some(count as f64 / horizon),
            )
        } else {
            (0.0, Some(0.0))
        };

        Self {
            average_waiting_time,
            average_turnaround_time,
            cpu_utilization,
            throughput,
        }
    }
}
