//! Comparison candidates and the selection of exactly three of them.

use venture_core::catalog::{COMPARISON_MAX, COMPARISON_MIN, COMPONENT_COUNT, MAX_SELECTED_COMPARISONS};
use venture_core::entities::{ComparisonCandidate, Session};
use venture_core::enums::{Phase, SelectionOp};

use crate::bounded::BoundedJudge;
use crate::error::EngineError;
use crate::tracker;

pub struct ComparisonSetGenerator;

impl ComparisonSetGenerator {
    /// Ask the judge for benchmark entities for a fully collected session.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` if a component is still pending,
    /// `JudgeUnavailable` if the judge call fails, and
    /// `MalformedJudgeOutput` if fewer than the minimum usable candidates
    /// come back.
    pub async fn generate(
        judge: &BoundedJudge,
        session: &Session,
    ) -> Result<Vec<ComparisonCandidate>, EngineError> {
        let briefs = tracker::briefs(session);
        if briefs.len() < COMPONENT_COUNT {
            return Err(EngineError::PreconditionFailed(format!(
                "{} of {COMPONENT_COUNT} components confirmed",
                briefs.len()
            )));
        }
        let raw = judge
            .suggest_comparisons(&briefs, session.industry.as_deref())
            .await?;
        normalize_candidates(raw)
    }
}

/// Trim, drop nameless entries, de-duplicate by name and cap the list.
///
/// # Errors
///
/// Returns `MalformedJudgeOutput` when fewer than `COMPARISON_MIN` remain.
pub fn normalize_candidates(
    raw: Vec<ComparisonCandidate>,
) -> Result<Vec<ComparisonCandidate>, EngineError> {
    let mut out: Vec<ComparisonCandidate> = Vec::with_capacity(COMPARISON_MAX);
    for candidate in raw {
        let name = candidate.name.trim();
        if name.is_empty() || out.iter().any(|c| c.matches_name(name)) {
            continue;
        }
        out.push(ComparisonCandidate {
            name: name.to_string(),
            description: candidate.description.trim().to_string(),
            relevance: candidate.relevance.trim().to_string(),
        });
        if out.len() == COMPARISON_MAX {
            break;
        }
    }
    if out.len() < COMPARISON_MIN {
        return Err(EngineError::MalformedJudgeOutput(format!(
            "{} usable comparison candidates, need at least {COMPARISON_MIN}",
            out.len()
        )));
    }
    Ok(out)
}

/// Result of one selection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Still short of the required count.
    Pending { selected: Vec<String>, remaining: usize },
    /// Exactly `MAX_SELECTED_COMPARISONS` are selected.
    Complete,
}

/// Add or remove `entity` from the selected set.
///
/// Adding an already selected entity and removing an unselected one are
/// no-ops. The stored name is the candidate's canonical spelling.
///
/// # Errors
///
/// `InvalidTransition` outside the selection phase or when the set is full,
/// `UnknownCandidate` when `entity` is not a candidate. The session is not
/// modified in either case.
pub fn apply_selection(
    session: &mut Session,
    entity: &str,
    op: SelectionOp,
) -> Result<SelectionOutcome, EngineError> {
    if session.phase != Phase::SelectingComparisons {
        return Err(EngineError::InvalidTransition(format!(
            "selection is not accepted in phase {}",
            session.phase
        )));
    }
    let canonical = session
        .comparison_candidates
        .iter()
        .find(|c| c.matches_name(entity))
        .map(|c| c.name.clone())
        .ok_or_else(|| EngineError::UnknownCandidate(entity.trim().to_string()))?;

    match op {
        SelectionOp::Add if session.is_selected(&canonical) => {}
        SelectionOp::Add => {
            if session.selected_comparisons.len() >= MAX_SELECTED_COMPARISONS {
                return Err(EngineError::InvalidTransition(format!(
                    "at most {MAX_SELECTED_COMPARISONS} comparisons can be selected"
                )));
            }
            session.selected_comparisons.push(canonical);
        }
        SelectionOp::Remove => {
            session
                .selected_comparisons
                .retain(|name| !name.trim().eq_ignore_ascii_case(&canonical));
        }
    }

    if session.selected_comparisons.len() == MAX_SELECTED_COMPARISONS {
        Ok(SelectionOutcome::Complete)
    } else {
        Ok(SelectionOutcome::Pending {
            selected: session.selected_comparisons.clone(),
            remaining: MAX_SELECTED_COMPARISONS - session.selected_comparisons.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::candidates;

    fn selecting_session() -> Session {
        let mut session = Session::new("ses-00000003".into(), "Kiosk".into(), None, Utc::now());
        session.phase = Phase::SelectingComparisons;
        session.comparison_candidates = candidates(6);
        session
    }

    #[test]
    fn normalize_dedupes_and_caps() {
        let mut raw = candidates(8);
        raw.insert(1, ComparisonCandidate {
            name: "  company 1 ".into(),
            description: "dup".into(),
            relevance: String::new(),
        });
        raw.insert(2, ComparisonCandidate {
            name: "   ".into(),
            description: "blank".into(),
            relevance: String::new(),
        });
        let out = normalize_candidates(raw).unwrap();
        assert_eq!(out.len(), COMPARISON_MAX);
        assert_eq!(out[0].name, "Company 1");
        assert_eq!(out[1].name, "Company 2");
    }

    #[test]
    fn normalize_rejects_short_lists() {
        let err = normalize_candidates(candidates(4)).unwrap_err();
        assert!(matches!(err, EngineError::MalformedJudgeOutput(_)));
    }

    #[test]
    fn duplicate_select_does_not_consume_a_slot() {
        let mut session = selecting_session();
        apply_selection(&mut session, "Company 1", SelectionOp::Add).unwrap();
        let outcome = apply_selection(&mut session, "company 1", SelectionOp::Add).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Pending {
                selected: vec!["Company 1".into()],
                remaining: 2
            }
        );
    }

    #[test]
    fn deselect_is_idempotent() {
        let mut session = selecting_session();
        apply_selection(&mut session, "Company 2", SelectionOp::Add).unwrap();
        apply_selection(&mut session, "Company 2", SelectionOp::Remove).unwrap();
        let outcome = apply_selection(&mut session, "Company 2", SelectionOp::Remove).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Pending {
                selected: vec![],
                remaining: 3
            }
        );
    }

    #[test]
    fn third_selection_completes() {
        let mut session = selecting_session();
        apply_selection(&mut session, "Company 1", SelectionOp::Add).unwrap();
        apply_selection(&mut session, "Company 2", SelectionOp::Add).unwrap();
        let outcome = apply_selection(&mut session, "Company 3", SelectionOp::Add).unwrap();
        assert_eq!(outcome, SelectionOutcome::Complete);
    }

    #[test]
    fn fourth_selection_is_refused_without_change() {
        let mut session = selecting_session();
        for name in ["Company 1", "Company 2", "Company 3"] {
            apply_selection(&mut session, name, SelectionOp::Add).unwrap();
        }
        let err = apply_selection(&mut session, "Company 4", SelectionOp::Add).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition(_)));
        assert_eq!(session.selected_comparisons.len(), 3);
    }

    #[test]
    fn unknown_candidate_is_rejected() {
        let mut session = selecting_session();
        let err = apply_selection(&mut session, "Globex", SelectionOp::Add).unwrap_err();
        assert!(matches!(err, EngineError::UnknownCandidate(name) if name == "Globex"));
        assert!(session.selected_comparisons.is_empty());
    }

    #[test]
    fn selection_outside_phase_is_invalid() {
        let mut session = selecting_session();
        session.phase = Phase::Collecting;
        let err = apply_selection(&mut session, "Company 1", SelectionOp::Add).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition(_)));
    }
}
