//! Phase, status, and label enums for Venture.
//!
//! All enums use `snake_case` serialization unless the label set is an
//! external contract (e.g. `Recommendation` is `UPPERCASE`). Enums with a
//! state machine provide `allowed_next_states()` so the engine can refuse
//! illegal transitions before mutating anything.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Phase of a consultation session. Exactly one is active at a time.
///
/// ```text
/// collecting → selecting_comparisons → questionnaire → report_ready
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Collecting,
    SelectingComparisons,
    Questionnaire,
    ReportReady,
}

impl Phase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Collecting => &[Self::SelectingComparisons],
            Self::SelectingComparisons => &[Self::Questionnaire],
            Self::Questionnaire => &[Self::ReportReady],
            Self::ReportReady => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::SelectingComparisons => "selecting_comparisons",
            Self::Questionnaire => "questionnaire",
            Self::ReportReady => "report_ready",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ComponentKey
// ---------------------------------------------------------------------------

/// One of the seven structured business attributes, in collection order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKey {
    Vision,
    BusinessOverview,
    MarketSize,
    TargetCustomers,
    ValueProposition,
    Usp,
    BusinessModel,
}

impl ComponentKey {
    /// All components in fixed collection order.
    pub const ALL: [Self; 7] = [
        Self::Vision,
        Self::BusinessOverview,
        Self::MarketSize,
        Self::TargetCustomers,
        Self::ValueProposition,
        Self::Usp,
        Self::BusinessModel,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::BusinessOverview => "business_overview",
            Self::MarketSize => "market_size",
            Self::TargetCustomers => "target_customers",
            Self::ValueProposition => "value_proposition",
            Self::Usp => "usp",
            Self::BusinessModel => "business_model",
        }
    }

    /// Position in the fixed collection order.
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// The component collected after this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.position() + 1).copied()
    }

    /// Parse a free-form label produced by a judge.
    ///
    /// Case, whitespace, hyphens and underscores are ignored, so `"marketSize"`,
    /// `"market-size"` and `"Market Size"` all resolve to [`Self::MarketSize`].
    #[must_use]
    pub fn parse_label(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.')
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "vision" => Some(Self::Vision),
            "businessoverview" | "overview" => Some(Self::BusinessOverview),
            "marketsize" | "market" => Some(Self::MarketSize),
            "targetcustomers" | "customers" => Some(Self::TargetCustomers),
            "valueproposition" | "valueprop" => Some(Self::ValueProposition),
            "usp" | "uniquesellingproposition" => Some(Self::Usp),
            "businessmodel" | "revenuemodel" => Some(Self::BusinessModel),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ComponentStatus
// ---------------------------------------------------------------------------

/// Status of a component record. Monotonic.
///
/// ```text
/// pending → confirmed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Pending,
    Confirmed,
}

impl ComponentStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed],
            Self::Confirmed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QuestionCategory
// ---------------------------------------------------------------------------

/// Category of a deep-dive question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Vision,
    Market,
    Usp,
    ValueProp,
    Sustainability,
    Execution,
}

impl QuestionCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::Market => "market",
            Self::Usp => "usp",
            Self::ValueProp => "value_prop",
            Self::Sustainability => "sustainability",
            Self::Execution => "execution",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckpointState / CheckpointChoice
// ---------------------------------------------------------------------------

/// Where the questionnaire stands relative to the early-exit checkpoint.
///
/// ```text
/// not_reached → pending → continued
///                     ↘ stopped
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointState {
    #[default]
    NotReached,
    Pending,
    Continued,
    Stopped,
}

impl CheckpointState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotReached => &[Self::Pending],
            Self::Pending => &[Self::Continued, Self::Stopped],
            Self::Continued | Self::Stopped => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotReached => "not_reached",
            Self::Pending => "pending",
            Self::Continued => "continued",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for CheckpointState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's answer at the checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointChoice {
    Continue,
    Stop,
}

impl CheckpointChoice {
    /// Interpret free text typed at the checkpoint. Returns `None` when the
    /// text is neither a continue nor a stop keyword.
    #[must_use]
    pub fn parse_text(raw: &str) -> Option<Self> {
        let normalized = raw
            .trim()
            .trim_end_matches(['.', '!'])
            .to_ascii_lowercase();
        match normalized.as_str() {
            "continue" | "keep going" | "more" | "next" | "yes, continue" => Some(Self::Continue),
            "end" | "stop" | "exit" | "finish" | "done" | "quit" => Some(Self::Stop),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for CheckpointChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SelectionOp
// ---------------------------------------------------------------------------

/// Add or remove an entity from the selected comparison set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOp {
    Add,
    Remove,
}

impl SelectionOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for SelectionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Categorical investment recommendation produced by scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Yes,
    Maybe,
    Neutral,
    No,
}

impl Recommendation {
    /// Parse a recommendation label, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "YES" => Some(Self::Yes),
            "MAYBE" => Some(Self::Maybe),
            "NEUTRAL" => Some(Self::Neutral),
            "NO" => Some(Self::No),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::Maybe => "MAYBE",
            Self::Neutral => "NEUTRAL",
            Self::No => "NO",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReportCategory
// ---------------------------------------------------------------------------

/// The five scored categories of an evaluation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    ValueProposition,
    UspCompetitiveAdvantage,
    MarketOpportunity,
    ExecutionFeasibility,
    Sustainability,
}

impl ReportCategory {
    pub const ALL: [Self; 5] = [
        Self::ValueProposition,
        Self::UspCompetitiveAdvantage,
        Self::MarketOpportunity,
        Self::ExecutionFeasibility,
        Self::Sustainability,
    ];

    /// Heading used in the scoring document.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::ValueProposition => "Value Proposition",
            Self::UspCompetitiveAdvantage => "USP & Competitive Advantage",
            Self::MarketOpportunity => "Market Opportunity & Growth",
            Self::ExecutionFeasibility => "Execution Feasibility",
            Self::Sustainability => "Sustainability",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValueProposition => "value_proposition",
            Self::UspCompetitiveAdvantage => "usp_competitive_advantage",
            Self::MarketOpportunity => "market_opportunity",
            Self::ExecutionFeasibility => "execution_feasibility",
            Self::Sustainability => "sustainability",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// User-visible error classification carried by `OutputAction::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationRejected,
    JudgeUnavailable,
    PreconditionFailed,
    MalformedJudgeOutput,
    InvalidTransition,
    UnknownCandidate,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationRejected => "validation_rejected",
            Self::JudgeUnavailable => "judge_unavailable",
            Self::PreconditionFailed => "precondition_failed",
            Self::MalformedJudgeOutput => "malformed_judge_output",
            Self::InvalidTransition => "invalid_transition",
            Self::UnknownCandidate => "unknown_candidate",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Kind of an entry in a session's append-only event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Created,
    Text,
    Selection,
    Checkpoint,
    Report,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Text => "text",
            Self::Selection => "selection",
            Self::Checkpoint => "checkpoint",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
