//! Thresholds for narrative derivation.
//!
//! These are empirical constants tuned against the precision of the
//! scheduling service's output, not values derived from the data.

use serde::{Deserialize, Serialize};

use crate::error::{NarrativeError, NarrativeResult};

/// Tunable thresholds used while deriving a narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// Absolute tolerance when matching an interval end against a
    /// process's reported completion time.
    pub completion_tolerance: f64,
    /// Slack when testing whether an MLFQ slice used its whole quantum.
    pub quantum_epsilon: f64,
    /// A boost at `t` is emitted only while `t < horizon - margin`.
    pub boost_horizon_margin: f64,
    /// Upper bound on expanded boost steps.
    pub max_boost_steps: usize,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            completion_tolerance: 0.1,
            quantum_epsilon: 1e-9,
            boost_horizon_margin: 0.0,
            max_boost_steps: 10_000,
        }
    }
}

impl ExplainConfig {
    /// Creates the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion tolerance.
    pub fn with_completion_tolerance(mut self, tolerance: f64) -> Self {
        self.completion_tolerance = tolerance;
        self
    }

    /// Sets the quantum epsilon.
    pub fn with_quantum_epsilon(mut self, epsilon: f64) -> Self {
        self.quantum_epsilon = epsilon;
        self
    }

    /// Sets the boost horizon margin.
    pub fn with_boost_horizon_margin(mut self, margin: f64) -> Self {
        self.boost_horizon_margin = margin;
        self
    }

    /// Sets the maximum number of boost steps.
    pub fn with_max_boost_steps(mut self, max: usize) -> Self {
        self.max_boost_steps = max;
        self
    }

    /// Parses thresholds from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> NarrativeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects negative or non-finite thresholds.
    pub fn validate(&self) -> NarrativeResult<()> {
        let checks = [
            ("completion_tolerance", self.completion_tolerance),
            ("quantum_epsilon", self.quantum_epsilon),
            ("boost_horizon_margin", self.boost_horizon_margin),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(NarrativeError::InvalidConfig(format!(
                    "{name} must be a finite value >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
