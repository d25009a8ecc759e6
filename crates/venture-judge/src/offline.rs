//! A judge that never answers.

use async_trait::async_trait;
use venture_core::entities::ComparisonCandidate;

use crate::{Classification, ComponentBrief, Judge, JudgeError, Rubric, ScoringRequest};

/// Stand-in used when no endpoint is configured. Every call fails with
/// [`JudgeError::NotConfigured`], so callers run on their deterministic
/// fallbacks and report generation surfaces as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineJudge;

#[async_trait]
impl Judge for OfflineJudge {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn classify(&self, _text: &str, _rubric: &Rubric) -> Result<Classification, JudgeError> {
        Err(JudgeError::NotConfigured)
    }

    async fn summarize(&self, _context: &str, _new_text: &str) -> Result<String, JudgeError> {
        Err(JudgeError::NotConfigured)
    }

    async fn suggest_comparisons(
        &self,
        _components: &[ComponentBrief],
        _industry: Option<&str>,
    ) -> Result<Vec<ComparisonCandidate>, JudgeError> {
        Err(JudgeError::NotConfigured)
    }

    async fn score(&self, _request: &ScoringRequest) -> Result<String, JudgeError> {
        Err(JudgeError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venture_core::enums::ComponentKey;

    #[tokio::test]
    async fn every_call_reports_not_configured() {
        let judge = OfflineJudge;
        let rubric = Rubric::Completeness {
            component: ComponentKey::Vision,
        };
        assert!(matches!(
            judge.classify("text", &rubric).await,
            Err(JudgeError::NotConfigured)
        ));
        assert!(matches!(
            judge.summarize("", "text").await,
            Err(JudgeError::NotConfigured)
        ));
        assert!(!JudgeError::NotConfigured.is_transient());
    }
}
