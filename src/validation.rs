//! Advisory input diagnostics.
//!
//! The narrative engine never rejects or repairs its input: well-formed
//! intervals are the scheduling service's contract. These checks exist
//! so that inconsistencies are visible in logs instead of silently
//! producing an odd story. Detects:
//! - Duplicate process IDs
//! - Inverted intervals (`end_time < start_time`)
//! - Negative timestamps
//! - Non-finite timestamps (NaN or infinite)
//! - Execution intervals for processes that were never submitted
//! - Submitted processes without an outcome

use crate::models::{ProcessDescriptor, ProcessOutcome, TimelineEntry};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// An interval ends before it starts.
    InvertedInterval,
    /// An interval starts or ends before t=0.
    NegativeTime,
    /// An interval has a NaN or infinite timestamp.
    NonFiniteTime,
    /// An execution interval references an unknown process.
    UnknownProcessReference,
    /// A submitted process has no reported outcome.
    MissingOutcome,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks the inputs of one narrative run.
///
/// Outcome checks are skipped when no outcomes were supplied at all,
/// since a payload without outcomes is a degraded but legal input.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(findings)` with all detected issues.
pub fn validate_input(
    timeline: &[TimelineEntry],
    processes: &[ProcessDescriptor],
    outcomes: &[ProcessOutcome],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut process_ids = HashSet::new();
    for p in processes {
        if !process_ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
    }

    for (index, entry) in timeline.iter().enumerate() {
        if !entry.start_time.is_finite() || !entry.end_time.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteTime,
                format!("Entry {index} has a non-finite timestamp"),
            ));
        }
        if entry.end_time < entry.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedInterval,
                format!(
                    "Entry {index} ends at {} before it starts at {}",
                    entry.end_time, entry.start_time
                ),
            ));
        }
        if entry.start_time < 0.0 || entry.end_time < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeTime,
                format!("Entry {index} has a negative timestamp"),
            ));
        }
        if entry.is_execution() && !processes.is_empty() {
            if let Some(pid) = entry.process_id {
                if !process_ids.contains(&pid) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownProcessReference,
                        format!("Entry {index} executes unknown process {pid}"),
                    ));
                }
            }
        }
    }

    if !outcomes.is_empty() {
        let outcome_ids: HashSet<u32> = outcomes.iter().map(|o| o.pid).collect();
        for p in processes {
            if !outcome_ids.contains(&p.id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingOutcome,
                    format!("Process {} has no reported outcome", p.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<ProcessDescriptor> {
        vec![
            ProcessDescriptor::new(1, 3.0),
            ProcessDescriptor::new(2, 2.0).with_arrival(1.0),
        ]
    }

    fn sample_timeline() -> Vec<TimelineEntry> {
        vec![
            TimelineEntry::execution(1, 0.0, 3.0),
            TimelineEntry::context_switch(3.0, 3.5),
            TimelineEntry::execution(2, 3.5, 5.5),
        ]
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        let outcomes = vec![ProcessOutcome::new(1, 3.0), ProcessOutcome::new(2, 5.5)];
        assert!(validate_input(&sample_timeline(), &sample_processes(), &outcomes).is_ok());
        assert!(validate_input(&[], &[], &[]).is_ok());
    }

    #[test]
    fn test_duplicate_process_id() {
        let mut processes = sample_processes();
        processes.push(ProcessDescriptor::new(1, 9.0));
        let k = kinds(validate_input(&sample_timeline(), &processes, &[]));
        assert_eq!(k, vec![ValidationErrorKind::DuplicateId]);
    }

    #[test]
    fn test_inverted_and_negative_interval() {
        let timeline = vec![
            TimelineEntry::execution(1, 4.0, 2.0),
            TimelineEntry::execution(2, -1.0, 0.5),
        ];
        let k = kinds(validate_input(&timeline, &sample_processes(), &[]));
        assert!(k.contains(&ValidationErrorKind::InvertedInterval));
        assert!(k.contains(&ValidationErrorKind::NegativeTime));
    }

    #[test]
    fn test_non_finite_timestamp() {
        let timeline = vec![
            TimelineEntry::execution(1, 0.0, f64::NAN),
            TimelineEntry::execution(2, f64::INFINITY, f64::INFINITY),
        ];
        let k = kinds(validate_input(&timeline, &sample_processes(), &[]));
        assert_eq!(
            k,
            vec![ValidationErrorKind::NonFiniteTime, ValidationErrorKind::NonFiniteTime]
        );
    }

    #[test]
    fn test_unknown_process_reference() {
        let timeline = vec![TimelineEntry::execution(7, 0.0, 1.0)];
        let k = kinds(validate_input(&timeline, &sample_processes(), &[]));
        assert_eq!(k, vec![ValidationErrorKind::UnknownProcessReference]);

        // Without descriptors there is nothing to cross-check.
        assert!(validate_input(&timeline, &[], &[]).is_ok());
    }

    #[test]
    fn test_missing_outcome() {
        let outcomes = vec![ProcessOutcome::new(1, 3.0)];
        let errs = validate_input(&sample_timeline(), &sample_processes(), &outcomes).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ValidationErrorKind::MissingOutcome);
        assert!(errs[0].message.contains("Process 2"));
    }
}
