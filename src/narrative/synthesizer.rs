//! Event synthesis.
//!
//! Walks the timeline by index and emits one step per observable fact,
//! plus the transitions that can be inferred from adjacent intervals.
//!
//! # Inference over adjacent intervals
//!
//! The service reports intervals, not events. A slice that does not end
//! in completion and is directly followed (by index) by an interval of
//! another process is read as a preemption:
//!
//! | Algorithm | Condition | Step |
//! |-----------|-----------|------|
//! | MLFQ | slice used the full quantum of its queue | demotion to next queue |
//! | Round Robin | always | preempted |
//! | FCFS / SJF / Priority | never | none |
//!
//! A matching completion time always wins over preemption.

use std::collections::{HashMap, HashSet};

use super::{fmt_time, rationale, EventType, ExplainConfig, ExplanationStep};
use crate::models::{
    AlgorithmConfig, EntryKind, ProcessDescriptor, ProcessOutcome, TimelineEntry,
};

/// Produces the unordered step multiset for one run.
pub fn synthesize(
    timeline: &[TimelineEntry],
    processes: &[ProcessDescriptor],
    outcomes: &[ProcessOutcome],
    algorithm: &AlgorithmConfig,
    config: &ExplainConfig,
) -> Vec<ExplanationStep> {
    let mut steps = vec![bootstrap_step(processes, algorithm)];

    for p in processes.iter().filter(|p| p.arrives_late()) {
        steps.push(arrival_step(p, algorithm));
    }

    let descriptors: HashMap<u32, &ProcessDescriptor> =
        processes.iter().map(|p| (p.id, p)).collect();
    let mut state = RunState::default();

    for (index, entry) in timeline.iter().enumerate() {
        match entry.kind {
            EntryKind::Execution => {
                let Some(pid) = entry.process_id else {
                    tracing::trace!(index, "execution entry without a process id skipped");
                    continue;
                };
                synthesize_execution(
                    &mut steps,
                    &mut state,
                    ExecutionContext {
                        pid,
                        index,
                        entry,
                        timeline,
                        descriptor: descriptors.get(&pid).copied(),
                        outcome: outcomes.iter().find(|o| o.pid == pid),
                        algorithm,
                        config,
                    },
                );
            }
            EntryKind::ContextSwitch => {
                steps.push(context_switch_step(index, entry, timeline, algorithm));
            }
            EntryKind::Idle => {
                tracing::trace!(index, "idle interval skipped");
            }
        }
    }

    for step in &steps {
        tracing::trace!(time = step.time, event = ?step.event_type, "{}", step.title);
    }
    steps
}

/// Per-process bookkeeping carried across the timeline walk.
#[derive(Default)]
struct RunState {
    executed: HashMap<u32, f64>,
    last_level: HashMap<u32, usize>,
    dispatched: HashSet<u32>,
}

struct ExecutionContext<'a> {
    pid: u32,
    index: usize,
    entry: &'a TimelineEntry,
    timeline: &'a [TimelineEntry],
    descriptor: Option<&'a ProcessDescriptor>,
    outcome: Option<&'a ProcessOutcome>,
    algorithm: &'a AlgorithmConfig,
    config: &'a ExplainConfig,
}

fn synthesize_execution(
    steps: &mut Vec<ExplanationStep>,
    state: &mut RunState,
    ctx: ExecutionContext<'_>,
) {
    let ExecutionContext {
        pid,
        index,
        entry,
        timeline,
        descriptor,
        outcome,
        algorithm,
        config,
    } = ctx;
    let duration = entry.duration();

    if let (AlgorithmConfig::Mlfq(_), Some(level)) = (algorithm, entry.queue_level) {
        if let Some(&previous) = state.last_level.get(&pid) {
            if level < previous {
                steps.push(
                    ExplanationStep::new(entry.start_time, EventType::Promotion)
                        .with_title(format!("P{pid} promoted to Q{level}"))
                        .with_summary(format!("P{pid} moves up from Q{previous} to Q{level}."))
                        .with_detail(format!("Previous queue: Q{previous}"))
                        .with_detail(format!("New queue: Q{level}"))
                        .with_rationale(rationale::describe_event(algorithm, EventType::Promotion))
                        .with_process(pid)
                        .with_queue(level),
                );
            }
        }
        state.last_level.insert(pid, level);
    }

    let executed = {
        let total = state.executed.entry(pid).or_insert(0.0);
        *total += duration;
        *total
    };
    let remaining = descriptor.map(|d| (d.burst_time - executed).max(0.0));
    let remaining_label = remaining.map_or_else(|| "Unknown".to_string(), fmt_time);
    let queue_label = queue_label(entry.queue_level);
    let first_dispatch = state.dispatched.insert(pid);

    let mut exec = ExplanationStep::new(entry.start_time, EventType::Execution)
        .with_title(format!("P{pid} runs"))
        .with_summary(format!(
            "P{pid} runs on the CPU from t={} to t={}.",
            fmt_time(entry.start_time),
            fmt_time(entry.end_time)
        ))
        .with_detail(format!("Duration: {}", fmt_time(duration)))
        .with_detail(format!("Queue: {queue_label}"))
        .with_detail(format!("Remaining after this slice: {remaining_label}"))
        .with_rationale(rationale::dispatch_reason(algorithm, entry, !first_dispatch))
        .with_process(pid);
    if let Some(level) = entry.queue_level {
        exec = exec.with_queue(level);
    }
    if first_dispatch {
        if let Some(d) = descriptor {
            exec = exec.with_detail(format!(
                "Response time: {}",
                fmt_time(entry.start_time - d.arrival_time)
            ));
        }
    }
    steps.push(exec);

    let completed = outcome.filter(|o| o.completes_at(entry.end_time, config.completion_tolerance));
    if let Some(o) = completed {
        steps.push(
            ExplanationStep::new(entry.end_time, EventType::Completion)
                .with_title(format!("P{pid} completes"))
                .with_summary(format!("P{pid} finishes at t={}.", fmt_time(entry.end_time)))
                .with_detail(format!("Completion time: {}", fmt_time(o.completion_time)))
                .with_detail(format!("Turnaround time: {}", fmt_time(o.turnaround_time)))
                .with_detail(format!("Waiting time: {}", fmt_time(o.waiting_time)))
                .with_rationale(rationale::describe_event(algorithm, EventType::Completion))
                .with_process(pid),
        );
        return;
    }

    let Some(next) = timeline.get(index + 1) else {
        return;
    };
    if !entry.differs_from(next) {
        return;
    }

    match algorithm {
        AlgorithmConfig::Mlfq(mlfq) => {
            let level = entry.queue_level.unwrap_or(0);
            let Some(quantum) = mlfq.quantum(level) else {
                return;
            };
            if duration + config.quantum_epsilon < quantum {
                return;
            }
            let new_level = mlfq.demoted_level(level);
            let movement = if new_level == level {
                format!("Stays in Q{level}, the lowest queue")
            } else {
                format!("Moves from Q{level} to Q{new_level}")
            };
            steps.push(
                ExplanationStep::new(entry.end_time, EventType::Demotion)
                    .with_title(format!("P{pid} demoted to Q{new_level}"))
                    .with_summary(format!(
                        "P{pid} used its full Q{level} quantum and drops to Q{new_level}."
                    ))
                    .with_detail(format!("Quantum used: {}", fmt_time(quantum)))
                    .with_detail(movement)
                    .with_detail(format!("Remaining: {remaining_label}"))
                    .with_rationale(rationale::describe_event(algorithm, EventType::Demotion))
                    .with_process(pid)
                    .with_queue(new_level),
            );
        }
        AlgorithmConfig::RoundRobin { time_quantum } => {
            steps.push(
                ExplanationStep::new(entry.end_time, EventType::Demotion)
                    .with_title(format!("P{pid} preempted"))
                    .with_summary(format!(
                        "P{pid} is preempted at t={} and rejoins the ready queue.",
                        fmt_time(entry.end_time)
                    ))
                    .with_detail(format!("Time quantum: {}", fmt_time(*time_quantum)))
                    .with_detail(format!("Ran for: {}", fmt_time(duration)))
                    .with_detail(format!("Remaining: {remaining_label}"))
                    .with_rationale(rationale::describe_event(algorithm, EventType::Demotion))
                    .with_process(pid),
            );
        }
        AlgorithmConfig::Fcfs
        | AlgorithmConfig::Sjf
        | AlgorithmConfig::Priority
        | AlgorithmConfig::Unknown => {}
    }
}

fn bootstrap_step(processes: &[ProcessDescriptor], algorithm: &AlgorithmConfig) -> ExplanationStep {
    let mut step = ExplanationStep::new(0.0, EventType::Arrival)
        .with_title("Simulation starts")
        .with_summary(match processes.len() {
            1 => format!("1 process is scheduled with {}.", algorithm.name()),
            n => format!("{n} processes are scheduled with {}.", algorithm.name()),
        })
        .with_detail(format!("Algorithm: {}", algorithm.name()))
        .with_rationale(rationale::describe(algorithm));

    match algorithm {
        AlgorithmConfig::RoundRobin { time_quantum } => {
            step = step.with_detail(format!("Time quantum: {}", fmt_time(*time_quantum)));
        }
        AlgorithmConfig::Mlfq(mlfq) => {
            let quantums: Vec<String> = mlfq
                .time_quantums
                .iter()
                .enumerate()
                .map(|(i, q)| format!("Q{i}={}", fmt_time(*q)))
                .collect();
            step = step
                .with_detail(format!("Queues: {}", mlfq.num_queues))
                .with_detail(format!("Quantums: {}", quantums.join(", ")));
            step = if mlfq.boosts_enabled() {
                step.with_detail(format!("Boost interval: {}", fmt_time(mlfq.boost_interval)))
            } else {
                step.with_detail("Priority boost: disabled")
            };
        }
        AlgorithmConfig::Fcfs
        | AlgorithmConfig::Sjf
        | AlgorithmConfig::Priority
        | AlgorithmConfig::Unknown => {}
    }

    let ready: Vec<String> = processes
        .iter()
        .filter(|p| !p.arrives_late())
        .map(|p| format!("P{}", p.id))
        .collect();
    if !ready.is_empty() {
        step = step.with_detail(format!("Ready at t=0: {}", ready.join(", ")));
    }
    step
}

fn arrival_step(process: &ProcessDescriptor, algorithm: &AlgorithmConfig) -> ExplanationStep {
    let pid = process.id;
    let mut step = ExplanationStep::new(process.arrival_time, EventType::Arrival)
        .with_title(format!("P{pid} arrives"))
        .with_summary(format!(
            "P{pid} enters the ready queue at t={}.",
            fmt_time(process.arrival_time)
        ))
        .with_detail(format!("Arrival time: {}", fmt_time(process.arrival_time)))
        .with_detail(format!("Burst time: {}", fmt_time(process.burst_time)))
        .with_rationale(rationale::describe_event(algorithm, EventType::Arrival))
        .with_process(pid);
    if let Some(priority) = process.priority {
        step = step.with_detail(format!("Priority: {priority}"));
    }
    if algorithm.as_mlfq().is_some() {
        step = step
            .with_detail("New arrivals always enter Q0")
            .with_queue(0);
    }
    step
}

fn context_switch_step(
    index: usize,
    entry: &TimelineEntry,
    timeline: &[TimelineEntry],
    algorithm: &AlgorithmConfig,
) -> ExplanationStep {
    let neighbour = |i: Option<usize>| {
        i.and_then(|i| timeline.get(i))
            .filter(|e| e.is_execution())
            .and_then(|e| e.process_id)
    };
    let from = neighbour(index.checked_sub(1));
    let to = neighbour(Some(index + 1));

    let mut step = ExplanationStep::new(entry.start_time, EventType::ContextSwitch)
        .with_title("Context switch")
        .with_summary(format!(
            "The CPU switches processes, costing {} time units.",
            fmt_time(entry.duration())
        ))
        .with_detail(format!("Overhead: {}", fmt_time(entry.duration())))
        .with_rationale(rationale::describe_event(algorithm, EventType::ContextSwitch));
    if let Some(pid) = from {
        step = step.with_detail(format!("From: P{pid}"));
    }
    if let Some(pid) = to {
        step = step.with_detail(format!("To: P{pid}"));
    }
    if let Some(pid) = entry.process_id {
        step = step.with_process(pid);
    }
    step
}

fn queue_label(level: Option<usize>) -> String {
    match level {
        Some(level) => format!("Q{level}"),
        None => "ready queue".to_string(),
    }
}
