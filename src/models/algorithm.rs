//! Algorithm configuration.
//!
//! One variant per scheduling family. Everything downstream that depends
//! on the algorithm (inference rules, rationale text) matches on this
//! enum, so adding an algorithm means adding one arm in each match.

use serde::{Deserialize, Serialize};

/// Multi-level feedback queue parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlfqConfig {
    /// Number of queues (queue 0 has the highest priority).
    #[serde(alias = "numQueues")]
    pub num_queues: usize,
    /// Time quantum per queue, indexed by level.
    #[serde(alias = "timeQuantums")]
    pub time_quantums: Vec<f64>,
    /// Period of the global priority boost. `0` disables boosting.
    #[serde(default, alias = "boostInterval")]
    pub boost_interval: f64,
}

impl MlfqConfig {
    /// Creates an MLFQ configuration; the queue count follows the
    /// number of quantums.
    pub fn new(time_quantums: Vec<f64>) -> Self {
        Self {
            num_queues: time_quantums.len(),
            time_quantums,
            boost_interval: 0.0,
        }
    }

    /// Sets the boost interval.
    pub fn with_boost_interval(mut self, boost_interval: f64) -> Self {
        self.boost_interval = boost_interval;
        self
    }

    /// Quantum of the given queue, if configured.
    #[inline]
    pub fn quantum(&self, level: usize) -> Option<f64> {
        self.time_quantums.get(level).copied()
    }

    /// Queue a process lands in after being demoted from `level`.
    #[inline]
    pub fn demoted_level(&self, level: usize) -> usize {
        (level + 1).min(self.num_queues.saturating_sub(1))
    }

    /// Whether periodic boosting is enabled.
    #[inline]
    pub fn boosts_enabled(&self) -> bool {
        self.boost_interval > 0.0
    }
}

impl Default for MlfqConfig {
    fn default() -> Self {
        Self::new(vec![2.0, 4.0, 8.0]).with_boost_interval(100.0)
    }
}

/// The scheduling algorithm that produced a timeline, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum AlgorithmConfig {
    /// First come, first served.
    Fcfs,
    /// Shortest job first.
    Sjf,
    /// Priority scheduling.
    Priority,
    /// Round robin with a fixed time slice.
    #[serde(alias = "roundRobin", alias = "rr")]
    RoundRobin {
        #[serde(alias = "timeQuantum")]
        time_quantum: f64,
    },
    /// Multi-level feedback queue.
    Mlfq(MlfqConfig),
    /// Any tag this crate does not know.
    #[serde(other)]
    Unknown,
}

impl AlgorithmConfig {
    /// Round robin with the given quantum.
    pub fn round_robin(time_quantum: f64) -> Self {
        Self::RoundRobin { time_quantum }
    }

    /// MLFQ with the given configuration.
    pub fn mlfq(config: MlfqConfig) -> Self {
        Self::Mlfq(config)
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "Priority",
            Self::RoundRobin { .. } => "Round Robin",
            Self::Mlfq(_) => "MLFQ",
            Self::Unknown => "Unknown",
        }
    }

    /// MLFQ parameters, if this is an MLFQ run.
    pub fn as_mlfq(&self) -> Option<&MlfqConfig> {
        match self {
            Self::Mlfq(cfg) => Some(cfg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demoted_level_saturates() {
        let cfg = MlfqConfig::new(vec![2.0, 4.0, 8.0]);
        assert_eq!(cfg.num_queues, 3);
        assert_eq!(cfg.demoted_level(0), 1);
        assert_eq!(cfg.demoted_level(1), 2);
        assert_eq!(cfg.demoted_level(2), 2);
    }

    #[test]
    fn test_quantum_lookup() {
        let cfg = MlfqConfig::new(vec![2.0, 4.0]);
        assert_eq!(cfg.quantum(1), Some(4.0));
        assert_eq!(cfg.quantum(5), None);
        assert!(!cfg.boosts_enabled());
        assert!(cfg.with_boost_interval(10.0).boosts_enabled());
    }

    #[test]
    fn test_tagged_wire_shape() {
        let rr: AlgorithmConfig =
            serde_json::from_str(r#"{"algorithm": "round_robin", "timeQuantum": 2}"#).unwrap();
        assert_eq!(rr, AlgorithmConfig::round_robin(2.0));

        let mlfq: AlgorithmConfig = serde_json::from_str(
            r#"{"algorithm": "mlfq", "num_queues": 3, "time_quantums": [2, 4, 8], "boost_interval": 20}"#,
        )
        .unwrap();
        let cfg = mlfq.as_mlfq().unwrap();
        assert_eq!(cfg.time_quantums, vec![2.0, 4.0, 8.0]);
        assert_eq!(cfg.boost_interval, 20.0);

        let fcfs: AlgorithmConfig = serde_json::from_str(r#"{"algorithm": "fcfs"}"#).unwrap();
        assert_eq!(fcfs, AlgorithmConfig::Fcfs);
    }

    #[test]
    fn test_unknown_tag_does_not_fail() {
        let alg: AlgorithmConfig = serde_json::from_str(r#"{"algorithm": "lottery"}"#).unwrap();
        assert_eq!(alg, AlgorithmConfig::Unknown);
        assert_eq!(alg.name(), "Unknown");
        assert!(alg.as_mlfq().is_none());
    }
}
