//! Shared judge double and session drivers for the flow tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use venture_core::actions::{OutputAction, TurnInput};
use venture_core::entities::{ComparisonCandidate, Session};
use venture_engine::PhaseOrchestrator;
use venture_engine::gate::GatePolicy;
use venture_engine::screen::ScreenPolicy;
use venture_judge::{Classification, ComponentBrief, Judge, JudgeError, Rubric, ScoringRequest};

pub const ANSWER: &str = "A thorough answer describing the business in concrete detail";

/// What the stub answers. Swappable mid-test through [`StubJudge::set`].
#[derive(Debug, Clone)]
pub struct Behaviour {
    pub completeness: Option<&'static str>,
    pub genuine: Option<&'static str>,
    pub relevance: Option<&'static str>,
    pub summaries: bool,
    pub candidates: Option<Vec<ComparisonCandidate>>,
    pub score_doc: Option<String>,
}

impl Behaviour {
    pub fn cooperative() -> Self {
        Self {
            completeness: Some(Rubric::COMPLETE),
            genuine: Some(Rubric::GENUINE),
            relevance: Some("usp"),
            summaries: true,
            candidates: Some(candidates()),
            score_doc: Some(report_doc()),
        }
    }
}

pub struct StubJudge {
    behaviour: Mutex<Behaviour>,
    pub classify_calls: AtomicUsize,
    pub score_calls: AtomicUsize,
}

impl StubJudge {
    pub fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour: Mutex::new(behaviour),
            classify_calls: AtomicUsize::new(0),
            score_calls: AtomicUsize::new(0),
        })
    }

    pub fn set(&self, update: impl FnOnce(&mut Behaviour)) {
        update(&mut self.behaviour.lock().unwrap());
    }

    pub fn classify_count(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn score_count(&self) -> usize {
        self.score_calls.load(Ordering::SeqCst)
    }

    fn current(&self) -> Behaviour {
        self.behaviour.lock().unwrap().clone()
    }
}

fn outage() -> JudgeError {
    JudgeError::Api {
        status: 502,
        message: "stub outage".into(),
    }
}

#[async_trait]
impl Judge for StubJudge {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn classify(&self, _text: &str, rubric: &Rubric) -> Result<Classification, JudgeError> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        let behaviour = self.current();
        let label = match rubric {
            Rubric::Completeness { .. } => behaviour.completeness,
            Rubric::GenuineAnswer { .. } => behaviour.genuine,
            Rubric::ComponentRelevance { .. } => behaviour.relevance,
        };
        label
            .map(|label| Classification {
                label: label.to_string(),
                confidence: Some(0.9),
                reason: None,
            })
            .ok_or_else(outage)
    }

    async fn summarize(&self, _context: &str, new_text: &str) -> Result<String, JudgeError> {
        if self.current().summaries {
            Ok(format!("Summary of: {}", new_text.trim()))
        } else {
            Err(outage())
        }
    }

    async fn suggest_comparisons(
        &self,
        _components: &[ComponentBrief],
        _industry: Option<&str>,
    ) -> Result<Vec<ComparisonCandidate>, JudgeError> {
        self.current().candidates.ok_or_else(outage)
    }

    async fn score(&self, _request: &ScoringRequest) -> Result<String, JudgeError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        self.current().score_doc.ok_or_else(outage)
    }
}

pub fn candidates() -> Vec<ComparisonCandidate> {
    ["Acme", "Globex", "Initech", "Umbrella", "Hooli", "Stark"]
        .into_iter()
        .map(|name| ComparisonCandidate {
            name: name.to_string(),
            description: format!("{name} is a benchmark"),
            relevance: "adjacent market".to_string(),
        })
        .collect()
}

pub fn report_doc() -> String {
    serde_json::json!({
        "evaluation_feedback": {
            "Value Proposition": {"score": "5/5", "rationale": "Strong."},
            "USP & Competitive Advantage": {"score": "4/5", "rationale": "Good."},
            "Market Opportunity & Growth": {"score": "4/5", "rationale": "Large."},
            "Execution Feasibility": {"score": "3/5", "rationale": "Hard."},
            "Sustainability": {"score": "4/5", "rationale": "Fine."},
            "overall": {"score": "20/25", "feedback": "Invest-worthy."}
        },
        "ai_investment_recommendation": "YES",
        "investment_rationale": "Solid fundamentals."
    })
    .to_string()
}

pub fn orchestrator(judge: &Arc<StubJudge>) -> PhaseOrchestrator {
    PhaseOrchestrator::with_policies(
        judge.clone(),
        GatePolicy::default(),
        ScreenPolicy::default(),
        Duration::from_secs(5),
    )
}

pub fn new_session() -> Session {
    Session::new(
        "ses-0000f10a".into(),
        "Solar kiosks".into(),
        Some("Energy".into()),
        chrono::Utc::now(),
    )
}

/// Run one turn and return the action.
pub async fn turn(
    orchestrator: &PhaseOrchestrator,
    session: &mut Session,
    input: TurnInput,
) -> OutputAction {
    let (next, action) = orchestrator.handle_turn(session.clone(), input).await;
    *session = next;
    action
}

/// Confirm all seven components with a cooperative judge.
pub async fn collect_all(orchestrator: &PhaseOrchestrator, session: &mut Session) -> OutputAction {
    let mut action = None;
    for _ in 0..7 {
        action = Some(turn(orchestrator, session, TurnInput::text(ANSWER)).await);
    }
    action.unwrap()
}

/// Select the first three candidates.
pub async fn select_three(orchestrator: &PhaseOrchestrator, session: &mut Session) -> OutputAction {
    let mut action = None;
    for name in ["Acme", "Globex", "Initech"] {
        action = Some(turn(orchestrator, session, TurnInput::select(name)).await);
    }
    action.unwrap()
}

/// Answer `count` questionnaire questions.
pub async fn answer(
    orchestrator: &PhaseOrchestrator,
    session: &mut Session,
    count: usize,
) -> OutputAction {
    let mut action = None;
    for _ in 0..count {
        action = Some(turn(orchestrator, session, TurnInput::text(ANSWER)).await);
    }
    action.unwrap()
}
