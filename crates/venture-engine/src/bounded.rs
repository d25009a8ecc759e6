//! Judge calls with a deadline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use venture_core::entities::ComparisonCandidate;
use venture_judge::{Classification, ComponentBrief, Judge, JudgeError, Rubric, ScoringRequest};

/// A judge whose every call is bounded by `tokio::time::timeout`.
///
/// An elapsed deadline surfaces as [`JudgeError::Timeout`], so callers take
/// the same fallback path they take for any other judge failure.
#[derive(Clone)]
pub struct BoundedJudge {
    inner: Arc<dyn Judge>,
    timeout: Duration,
}

impl BoundedJudge {
    #[must_use]
    pub fn new(inner: Arc<dyn Judge>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn guarded<T>(
        &self,
        call: impl Future<Output = Result<T, JudgeError>>,
    ) -> Result<T, JudgeError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(JudgeError::Timeout {
                secs: self.timeout.as_secs().max(1),
            }),
        }
    }

    pub async fn classify(&self, text: &str, rubric: &Rubric) -> Result<Classification, JudgeError> {
        self.guarded(self.inner.classify(text, rubric)).await
    }

    pub async fn summarize(&self, context: &str, new_text: &str) -> Result<String, JudgeError> {
        self.guarded(self.inner.summarize(context, new_text)).await
    }

    pub async fn suggest_comparisons(
        &self,
        components: &[ComponentBrief],
        industry: Option<&str>,
    ) -> Result<Vec<ComparisonCandidate>, JudgeError> {
        self.guarded(self.inner.suggest_comparisons(components, industry))
            .await
    }

    pub async fn score(&self, request: &ScoringRequest) -> Result<String, JudgeError> {
        self.guarded(self.inner.score(request)).await
    }
}

impl std::fmt::Debug for BoundedJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedJudge")
            .field("judge", &self.inner.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}
