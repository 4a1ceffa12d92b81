//! Natural-language justifications for narrated steps.
//!
//! All text is a fixed lookup on the algorithm variant. The resolver
//! describes; it never validates, so unknown algorithms get a generic
//! fallback instead of an error.

use super::EventType;
use crate::models::{AlgorithmConfig, TimelineEntry};

const FCFS_DISPATCH: &str = "selected because it arrived earliest among waiting processes.";
const SJF_DISPATCH: &str = "selected because it has the shortest remaining burst time.";
const PRIORITY_DISPATCH: &str =
    "selected because it has the highest priority among waiting processes.";
const RR_DISPATCH: &str =
    "selected by round-robin rotation; each process receives an equal time slice.";
const UNKNOWN_DISPATCH: &str = "dispatched by the scheduler; the selection policy is not known.";

/// Overall description of an algorithm. Used for the opening step.
pub fn describe(algorithm: &AlgorithmConfig) -> String {
    match algorithm {
        AlgorithmConfig::Fcfs => {
            "FCFS runs processes in arrival order; a running process keeps the CPU until it finishes."
                .to_string()
        }
        AlgorithmConfig::Sjf => {
            "SJF always picks the waiting process with the shortest burst time.".to_string()
        }
        AlgorithmConfig::Priority => {
            "Priority scheduling always picks the waiting process with the highest priority (lowest number)."
                .to_string()
        }
        AlgorithmConfig::RoundRobin { time_quantum } => format!(
            "Round Robin rotates through ready processes, giving each a slice of at most {} time units.",
            super::fmt_time(*time_quantum)
        ),
        AlgorithmConfig::Mlfq(cfg) => format!(
            "MLFQ keeps {} queues, always serves the highest non-empty queue, and demotes a process that uses its whole quantum.",
            cfg.num_queues
        ),
        AlgorithmConfig::Unknown => {
            "The scheduling policy is not known; steps follow the recorded timeline.".to_string()
        }
    }
}

/// Why the process of `timeline[index]` was put on the CPU.
pub fn describe_dispatch(
    algorithm: &AlgorithmConfig,
    entry: &TimelineEntry,
    index: usize,
    timeline: &[TimelineEntry],
) -> String {
    let resumed = timeline[..index.min(timeline.len())]
        .iter()
        .any(|e| e.is_execution() && e.process_id.is_some() && e.process_id == entry.process_id);
    dispatch_reason(algorithm, entry, resumed)
}

/// Dispatch text when the caller already knows whether the process ran
/// before. Avoids rescanning the timeline prefix on every slice.
pub(crate) fn dispatch_reason(
    algorithm: &AlgorithmConfig,
    entry: &TimelineEntry,
    resumed: bool,
) -> String {
    let subject = match entry.process_id {
        Some(pid) => format!("P{pid}"),
        None => "The process".to_string(),
    };
    let subject = if resumed {
        format!("{subject} (resuming)")
    } else {
        subject
    };

    let reason = match algorithm {
        AlgorithmConfig::Fcfs => FCFS_DISPATCH.to_string(),
        AlgorithmConfig::Sjf => SJF_DISPATCH.to_string(),
        AlgorithmConfig::Priority => PRIORITY_DISPATCH.to_string(),
        AlgorithmConfig::RoundRobin { .. } => RR_DISPATCH.to_string(),
        AlgorithmConfig::Mlfq(_) => format!(
            "selected from queue {}, the highest-priority queue with a waiting process.",
            entry.queue_level.unwrap_or(0)
        ),
        AlgorithmConfig::Unknown => UNKNOWN_DISPATCH.to_string(),
    };

    format!("{subject} was {reason}")
}

/// Why a non-execution event happened.
pub fn describe_event(algorithm: &AlgorithmConfig, event: EventType) -> String {
    let text = match (event, algorithm) {
        (EventType::Execution, _) => return describe(algorithm),

        (EventType::Arrival, AlgorithmConfig::Fcfs) => {
            "New arrivals join the tail of the ready queue and wait their turn."
        }
        (EventType::Arrival, AlgorithmConfig::Sjf) => {
            "The new arrival competes on burst time at the next scheduling decision."
        }
        (EventType::Arrival, AlgorithmConfig::Priority) => {
            "The new arrival competes on priority at the next scheduling decision."
        }
        (EventType::Arrival, AlgorithmConfig::RoundRobin { .. }) => {
            "New arrivals join the tail of the rotation."
        }
        (EventType::Arrival, AlgorithmConfig::Mlfq(_)) => {
            "New arrivals always enter Q0, the highest-priority queue."
        }
        (EventType::Arrival, AlgorithmConfig::Unknown) => "The process becomes ready to run.",

        (EventType::Demotion, AlgorithmConfig::Mlfq(_)) => {
            "It used its entire quantum, which MLFQ treats as CPU-bound behaviour, so its priority drops."
        }
        (EventType::Demotion, AlgorithmConfig::RoundRobin { .. }) => {
            "Its time slice expired, so it goes to the back of the ready queue."
        }
        (EventType::Demotion, _) => "The process was preempted.",

        (EventType::Promotion, AlgorithmConfig::Mlfq(_)) => {
            "It was moved to a higher-priority queue so that it cannot starve."
        }
        (EventType::Promotion, _) => "The process gained priority.",

        (EventType::Completion, _) => {
            "The process has received all of its burst time and leaves the system."
        }
        (EventType::ContextSwitch, _) => {
            "The CPU saves the outgoing process state and loads the next one; no process runs during the switch."
        }
        (EventType::Boost, _) => {
            "Periodic boosting stops long-running processes from starving in the lower queues."
        }
    };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MlfqConfig;

    #[test]
    fn test_dispatch_lookup() {
        let e = TimelineEntry::execution(1, 0.0, 2.0);
        let t = vec![e.clone()];

        assert_eq!(
            describe_dispatch(&AlgorithmConfig::Fcfs, &e, 0, &t),
            "P1 was selected because it arrived earliest among waiting processes."
        );
        assert!(describe_dispatch(&AlgorithmConfig::Sjf, &e, 0, &t)
            .ends_with("shortest remaining burst time."));
        assert!(describe_dispatch(&AlgorithmConfig::Priority, &e, 0, &t)
            .ends_with("highest priority among waiting processes."));
        assert!(describe_dispatch(&AlgorithmConfig::round_robin(2.0), &e, 0, &t)
            .contains("round-robin rotation"));
    }

    #[test]
    fn test_mlfq_dispatch_names_queue() {
        let e = TimelineEntry::execution(4, 0.0, 2.0).with_queue(2);
        let alg = AlgorithmConfig::mlfq(MlfqConfig::default());
        assert_eq!(
            describe_dispatch(&alg, &e, 0, std::slice::from_ref(&e)),
            "P4 was selected from queue 2, the highest-priority queue with a waiting process."
        );
    }

    #[test]
    fn test_dispatch_marks_resumption() {
        let t = vec![
            TimelineEntry::execution(1, 0.0, 2.0),
            TimelineEntry::execution(2, 2.0, 4.0),
            TimelineEntry::execution(1, 4.0, 6.0),
        ];
        let alg = AlgorithmConfig::round_robin(2.0);
        assert!(describe_dispatch(&alg, &t[2], 2, &t).starts_with("P1 (resuming) was"));
        assert!(describe_dispatch(&alg, &t[1], 1, &t).starts_with("P2 was"));
        assert_eq!(
            dispatch_reason(&alg, &t[2], true),
            describe_dispatch(&alg, &t[2], 2, &t)
        );
        assert_eq!(
            dispatch_reason(&alg, &t[0], false),
            describe_dispatch(&alg, &t[0], 0, &t)
        );
    }

    #[test]
    fn test_unknown_algorithm_falls_back() {
        let e = TimelineEntry::execution(1, 0.0, 1.0);
        let text = describe_dispatch(&AlgorithmConfig::Unknown, &e, 0, &[e.clone()]);
        assert!(text.contains("not known"));
        assert!(!describe(&AlgorithmConfig::Unknown).is_empty());
        assert!(!describe_event(&AlgorithmConfig::Unknown, EventType::Arrival).is_empty());
    }

    #[test]
    fn test_event_text_varies_by_algorithm() {
        let rr = describe_event(&AlgorithmConfig::round_robin(2.0), EventType::Demotion);
        let mlfq = describe_event(
            &AlgorithmConfig::mlfq(MlfqConfig::default()),
            EventType::Demotion,
        );
        assert_ne!(rr, mlfq);
        assert!(describe(&AlgorithmConfig::round_robin(2.0)).contains("2 time units"));
    }
}
