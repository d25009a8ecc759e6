//! Entity structs for the consultation domain.
//!
//! A `Session` owns every other record. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` so the store can persist a session as a
//! single JSON snapshot and tests can validate it against its schema.

mod comparison;
mod component;
mod event;
mod questionnaire;
mod report;
mod session;
mod transcript;

pub use comparison::ComparisonCandidate;
pub use component::ComponentRecord;
pub use event::SessionEvent;
pub use questionnaire::{AnswerRecord, QuestionnaireRecord};
pub use report::{CATEGORY_MAX_SCORE, CategoryScore, Report};
pub use session::Session;
pub use transcript::TranscriptEntry;
