//! Deterministic step ordering.

use super::ExplanationStep;

/// Sorts steps by time, then by event rank.
///
/// The sort is stable: steps with equal time and event type keep the
/// order in which they were synthesized.
pub fn order(mut steps: Vec<ExplanationStep>) -> Vec<ExplanationStep> {
    steps.sort_by(|a, b| {
        a.time
            .total_cmp(&b.time)
            .then_with(|| a.event_type.rank().cmp(&b.event_type.rank()))
    });
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::EventType;

    fn step(time: f64, event: EventType, title: &str) -> ExplanationStep {
        ExplanationStep::new(time, event).with_title(title)
    }

    #[test]
    fn test_time_then_rank() {
        let steps = vec![
            step(2.0, EventType::ContextSwitch, "cs"),
            step(2.0, EventType::Completion, "done"),
            step(0.0, EventType::Execution, "run"),
            step(2.0, EventType::Arrival, "arrive"),
            step(0.0, EventType::Arrival, "start"),
            step(2.0, EventType::Boost, "boost"),
        ];
        let titles: Vec<_> = order(steps).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["start", "run", "arrive", "boost", "done", "cs"]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let steps = vec![
            step(1.0, EventType::Arrival, "first"),
            step(1.0, EventType::Arrival, "second"),
            step(1.0, EventType::Arrival, "third"),
        ];
        let titles: Vec<_> = order(steps).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty() {
        assert!(order(Vec::new()).is_empty());
    }
}
