//! Schedule-to-narrative derivation for CPU scheduling visualizers.
//!
//! The scheduling algorithms (FCFS, SJF, Priority, Round Robin, MLFQ) run
//! on a remote service that returns only an executed timeline and
//! per-process outcomes. This crate turns that result into an ordered
//! sequence of explained steps: arrivals, dispatches, preemptions and
//! demotions, promotions, completions, context switches, and periodic
//! priority boosts.
//!
//! # Modules
//!
//! - **`models`**: Input types — `TimelineEntry`, `ProcessDescriptor`,
//!   `ProcessOutcome`, `AlgorithmConfig`, `SchedulerResponse`
//! - **`narrative`**: The derivation pipeline and `ExplanationStep`
//! - **`cursor`**: Index-and-autoplay navigation over derived steps
//! - **`metrics`**: Aggregate run metrics, derivable when the service omits them
//! - **`validation`**: Advisory input checks (duplicate IDs, inverted intervals)
//!
//! # Architecture
//!
//! Derivation is a pure function of its input. It does no I/O, holds no
//! state between runs, and cannot fail; only payload decoding and
//! threshold validation return errors.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

pub mod cursor;
pub mod error;
pub mod metrics;
pub mod models;
pub mod narrative;
pub mod validation;

pub use cursor::NavigationCursor;
pub use error::{NarrativeError, NarrativeResult};
pub use narrative::{explain, EventType, ExplainConfig, ExplanationStep, Narrative, NarrativeEngine};
