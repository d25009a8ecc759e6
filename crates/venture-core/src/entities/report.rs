use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Recommendation, ReportCategory};

/// Highest score a single category can receive.
pub const CATEGORY_MAX_SCORE: f64 = 5.0;

/// Score for one evaluation category, 0 to 5.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CategoryScore {
    pub category: ReportCategory,
    pub score: f64,
    pub rationale: String,
}

/// Scored evaluation of a consultation. Computed once and cached on the
/// session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Report {
    /// One entry per `ReportCategory`, in `ReportCategory::ALL` order.
    pub categories: Vec<CategoryScore>,
    /// Sum of the category scores, 0 to 25.
    pub total: f64,
    pub recommendation: Recommendation,
    pub rationale: String,
    pub overall_feedback: String,
    /// Benchmark entities the evaluation was compared against.
    pub comparisons: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    #[must_use]
    pub fn score_for(&self, category: ReportCategory) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.score)
    }

    /// Maximum reachable total.
    #[must_use]
    pub fn max_total() -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let categories = ReportCategory::ALL.len() as f64;
        categories * CATEGORY_MAX_SCORE
    }
}
