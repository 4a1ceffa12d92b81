//! Periodic MLFQ priority boosts.
//!
//! Boosts are global and periodic, so they are expanded from the boost
//! interval and the timeline horizon alone. Individual processes are
//! never inspected.

use super::{fmt_time, rationale, EventType, ExplainConfig, ExplanationStep};
use crate::models::timeline::horizon;
use crate::models::{AlgorithmConfig, MlfqConfig, TimelineEntry};

/// One boost step at every multiple of the interval strictly before the
/// horizon. Empty when boosting is disabled or the timeline is empty.
pub fn expand_boosts(
    timeline: &[TimelineEntry],
    mlfq: &MlfqConfig,
    config: &ExplainConfig,
) -> Vec<ExplanationStep> {
    if !mlfq.boosts_enabled() {
        return Vec::new();
    }
    let Some(horizon) = horizon(timeline) else {
        return Vec::new();
    };
    let limit = horizon - config.boost_horizon_margin;
    if !limit.is_finite() {
        tracing::warn!(horizon, "non-finite timeline horizon, no boosts expanded");
        return Vec::new();
    }
    let interval = mlfq.boost_interval;
    let algorithm = AlgorithmConfig::Mlfq(mlfq.clone());
    let rationale = rationale::describe_event(&algorithm, EventType::Boost);

    let mut steps = Vec::new();
    for k in 1u64.. {
        // k * interval, never a running sum.
        let t = k as f64 * interval;
        if t >= limit {
            break;
        }
        if steps.len() >= config.max_boost_steps {
            tracing::warn!(
                interval,
                horizon,
                max = config.max_boost_steps,
                "boost expansion truncated"
            );
            break;
        }
        steps.push(
            ExplanationStep::new(t, EventType::Boost)
                .with_title("Priority boost")
                .with_summary(format!("At t={}, every process returns to Q0.", fmt_time(t)))
                .with_detail(format!("Boost interval: {}", fmt_time(interval)))
                .with_detail("All processes move to Q0")
                .with_detail("Aging counters reset")
                .with_rationale(rationale.clone())
                .with_queue(0),
        );
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline_to(end: f64) -> Vec<TimelineEntry> {
        vec![TimelineEntry::execution(1, 0.0, end).with_queue(0)]
    }

    #[test]
    fn test_boost_times() {
        let cfg = MlfqConfig::new(vec![2.0, 4.0]).with_boost_interval(10.0);
        let steps = expand_boosts(&timeline_to(35.0), &cfg, &ExplainConfig::default());
        let times: Vec<f64> = steps.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![10.0, 20.0, 30.0]);
        assert!(steps.iter().all(|s| s.process_id.is_none()));
        assert!(steps.iter().all(|s| s.event_type == EventType::Boost));
    }

    #[test]
    fn test_boost_count_formula() {
        let cfg = MlfqConfig::new(vec![2.0]).with_boost_interval(3.0);
        for horizon in [1.0, 3.0, 3.5, 9.0, 10.0, 29.9] {
            let steps = expand_boosts(&timeline_to(horizon), &cfg, &ExplainConfig::default());
            let expected = ((horizon - 1e-9) / 3.0).floor() as usize;
            assert_eq!(steps.len(), expected, "horizon {horizon}");
        }
    }

    #[test]
    fn test_disabled_or_empty() {
        let disabled = MlfqConfig::new(vec![2.0]);
        assert!(expand_boosts(&timeline_to(50.0), &disabled, &ExplainConfig::default()).is_empty());

        let enabled = MlfqConfig::new(vec![2.0]).with_boost_interval(5.0);
        assert!(expand_boosts(&[], &enabled, &ExplainConfig::default()).is_empty());
    }

    #[test]
    fn test_horizon_uses_latest_end() {
        let cfg = MlfqConfig::new(vec![2.0]).with_boost_interval(5.0);
        let t = vec![
            TimelineEntry::execution(1, 10.0, 12.0),
            TimelineEntry::execution(2, 0.0, 4.0),
        ];
        assert_eq!(expand_boosts(&t, &cfg, &ExplainConfig::default()).len(), 2);
    }

    #[test]
    fn test_non_finite_horizon_expands_nothing() {
        let cfg = MlfqConfig::new(vec![2.0]).with_boost_interval(1.0);
        for end in [f64::NAN, f64::INFINITY] {
            assert!(expand_boosts(&timeline_to(end), &cfg, &ExplainConfig::default()).is_empty());
        }
    }

    #[test]
    fn test_margin_and_cap() {
        let cfg = MlfqConfig::new(vec![2.0]).with_boost_interval(10.0);
        let margin = ExplainConfig::default().with_boost_horizon_margin(5.0);
        // limit 25 → boosts at 10, 20
        assert_eq!(expand_boosts(&timeline_to(30.0), &cfg, &margin).len(), 2);

        let capped = ExplainConfig::default().with_max_boost_steps(3);
        let tiny = MlfqConfig::new(vec![2.0]).with_boost_interval(0.5);
        assert_eq!(expand_boosts(&timeline_to(1000.0), &tiny, &capped).len(), 3);
    }
}
