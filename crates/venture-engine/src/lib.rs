//! # venture-engine
//!
//! The consultation phase orchestrator and the pieces it coordinates:
//!
//! - [`tracker`]: component and questionnaire progress
//! - [`gate`]: component answer validation with leniency escalation
//! - [`screen`]: genuine-answer screening for the questionnaire
//! - [`enrich`]: best-effort questionnaire-to-component enrichment
//! - [`comparisons`]: candidate generation and selection
//! - [`report`]: report compilation and scoring-document parsing
//! - [`orchestrator`]: the state machine tying them together
//!
//! Every judge call goes through [`BoundedJudge`], which bounds it with a
//! timeout so a hung judge takes the same fallback path as a failed one.

mod bounded;
pub mod comparisons;
pub mod enrich;
pub mod error;
pub mod gate;
pub mod heuristics;
pub mod orchestrator;
pub mod report;
pub mod screen;
pub mod tracker;

#[cfg(test)]
mod testing;

pub use bounded::BoundedJudge;
pub use error::EngineError;
pub use orchestrator::PhaseOrchestrator;
