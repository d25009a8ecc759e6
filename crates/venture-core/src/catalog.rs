//! Fixed catalogs: the seven components, the deep-dive questionnaire, and the
//! counting constants that drive phase transitions.

use crate::enums::{ComponentKey, QuestionCategory};

/// Number of answered questions that opens the early-exit checkpoint and
/// unlocks report generation.
pub const CHECKPOINT_AT: usize = 10;

/// Hard cap on questionnaire answers. Reaching it ends the questionnaire.
pub const MAX_QUESTIONS: usize = 20;

/// Exactly this many comparison entities must be selected to proceed.
pub const MAX_SELECTED_COMPARISONS: usize = 3;

/// Bounds on the generated comparison candidate list.
pub const COMPARISON_MIN: usize = 5;
pub const COMPARISON_MAX: usize = 6;

/// Number of structured components collected in the first phase.
pub const COMPONENT_COUNT: usize = ComponentKey::ALL.len();

const _: () = assert!(CHECKPOINT_AT < MAX_QUESTIONS);
const _: () = assert!(MAX_SELECTED_COMPARISONS <= COMPARISON_MIN);
const _: () = assert!(COMPARISON_MIN <= COMPARISON_MAX);

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

impl ComponentKey {
    /// Human-facing title of the component.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Vision => "Vision & Long-term Goals",
            Self::BusinessOverview => "Business Overview & Core Offering",
            Self::MarketSize => "Market Size",
            Self::TargetCustomers => "Target Customers & Market Segments",
            Self::ValueProposition => "Value Proposition & Customer Benefits",
            Self::Usp => "Unique Selling Proposition & Differentiation",
            Self::BusinessModel => "Business Model & Revenue Strategy",
        }
    }

    /// The question asked when this component becomes active.
    #[must_use]
    pub const fn guiding_question(self) -> &'static str {
        match self {
            Self::Vision => "What do you hope to achieve with this business in 5-10 years?",
            Self::BusinessOverview => {
                "What exactly does your business do? What's your core offering?"
            }
            Self::MarketSize => "How big is your target market? Any estimates?",
            Self::TargetCustomers => "Who exactly are your customers? What segments?",
            Self::ValueProposition => "What key benefits do you provide customers?",
            Self::Usp => "What makes you different from competitors? What's unique?",
            Self::BusinessModel => "How do you make money? What's your revenue model?",
        }
    }

    /// Short description of what belongs in this component. Used when asking
    /// the judge to map free text onto a component.
    #[must_use]
    pub const fn scope_hint(self) -> &'static str {
        match self {
            Self::Vision => "long-term goals, purpose, what the business aims to achieve",
            Self::BusinessOverview => "core offering, what the business does, technologies needed",
            Self::MarketSize => "market size, growth trends, timing, market conditions",
            Self::TargetCustomers => "who the customers are, segments, how to reach them",
            Self::ValueProposition => "benefits to customers, problems solved, customer value",
            Self::Usp => "unique advantages, differentiation, competitive advantages",
            Self::BusinessModel => "revenue model, cost structure, sustainability, funding",
        }
    }
}

// ---------------------------------------------------------------------------
// Questionnaire
// ---------------------------------------------------------------------------

/// One entry of the deep-dive questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub text: &'static str,
    pub category: QuestionCategory,
}

const fn q(text: &'static str, category: QuestionCategory) -> Question {
    Question { text, category }
}

/// The deep-dive questions in asking order.
pub static QUESTIONS: [Question; MAX_QUESTIONS] = [
    q(
        "What specific value does this business idea aim to bring to the world?",
        QuestionCategory::Vision,
    ),
    q(
        "Why is now the right time to pursue this business opportunity?",
        QuestionCategory::Vision,
    ),
    q(
        "What is your personal motivation or passion behind this business venture?",
        QuestionCategory::Vision,
    ),
    q(
        "What is the estimated size of your target market? Can you define TAM/SAM/SOM if possible?",
        QuestionCategory::Market,
    ),
    q(
        "How much growth is expected in this market over the next 5-10 years?",
        QuestionCategory::Market,
    ),
    q(
        "What specific trends or forces are driving growth in your market?",
        QuestionCategory::Market,
    ),
    q(
        "What revenue model are you planning (subscription, licensing, D2C, etc.)?",
        QuestionCategory::Market,
    ),
    q(
        "Through which channels will you primarily earn revenue?",
        QuestionCategory::Market,
    ),
    q(
        "What is your cost structure and how will it lead to profitability?",
        QuestionCategory::Market,
    ),
    q(
        "Is the timing right for market entry based on current conditions?",
        QuestionCategory::Market,
    ),
    q(
        "How competitive is your market and what barriers to entry exist?",
        QuestionCategory::Usp,
    ),
    q(
        "What makes you different - why would customers choose you over competitors?",
        QuestionCategory::Usp,
    ),
    q(
        "What makes your competitive advantage defensible long-term?",
        QuestionCategory::Usp,
    ),
    q(
        "What specific frustrations or unmet needs do your customers face today?",
        QuestionCategory::ValueProp,
    ),
    q(
        "Who exactly needs your product and what triggers them to pay for solutions?",
        QuestionCategory::ValueProp,
    ),
    q(
        "Beyond solving problems, what exciting future do you offer users?",
        QuestionCategory::ValueProp,
    ),
    q(
        "How is your business model sustainable from environmental, social, and economic perspectives?",
        QuestionCategory::Sustainability,
    ),
    q(
        "What core technologies are required and do they already exist?",
        QuestionCategory::Execution,
    ),
    q(
        "What funding would be needed to build and launch this business?",
        QuestionCategory::Execution,
    ),
    q(
        "What is the biggest challenge or risk to successful implementation?",
        QuestionCategory::Execution,
    ),
];

/// Look up a question by 0-based index.
#[must_use]
pub fn question(index: usize) -> Option<&'static Question> {
    QUESTIONS.get(index)
}
