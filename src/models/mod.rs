//! Narrative domain models.
//!
//! Input shapes exchanged with the scheduling service and the
//! configuration form. All types are plain serde data with builder
//! methods; none of them carry behaviour beyond simple accessors.
//!
//! # Wire Mapping
//!
//! | Model | Service field | Form field |
//! |-------|---------------|------------|
//! | ProcessDescriptor | `processes[]` (request) | process table row |
//! | ProcessOutcome | `processes[]` (response) | - |
//! | TimelineEntry | `schedule[]` | - |
//! | AlgorithmConfig | `algo` + `config` | algorithm selector |

mod algorithm;
mod process;
mod response;
pub mod timeline;

pub use algorithm::{AlgorithmConfig, MlfqConfig};
pub use process::{ProcessDescriptor, ProcessOutcome};
pub use response::SchedulerResponse;
pub use timeline::{EntryKind, TimelineEntry};
