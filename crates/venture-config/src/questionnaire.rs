//! Genuine-answer classification settings for the deep-dive questionnaire.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_answer_min_chars() -> usize {
    15
}

const fn default_ambiguity_confidence() -> f32 {
    0.6
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuestionnaireConfig {
    /// Specificity floor. Shorter answers are sent back for clarification
    /// without consulting the judge.
    #[serde(default = "default_answer_min_chars")]
    pub answer_min_chars: usize,

    /// A META or GIBBERISH verdict below this confidence counts as ambiguous.
    #[serde(default = "default_ambiguity_confidence")]
    pub ambiguity_confidence: f32,
}

impl Default for QuestionnaireConfig {
    fn default() -> Self {
        Self {
            answer_min_chars: default_answer_min_chars(),
            ambiguity_confidence: default_ambiguity_confidence(),
        }
    }
}

impl QuestionnaireConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.ambiguity_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "questionnaire.ambiguity_confidence".into(),
                reason: format!("{} is outside 0.0..=1.0", self.ambiguity_confidence),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = QuestionnaireConfig::default();
        assert_eq!(config.answer_min_chars, 15);
        assert!((config.ambiguity_confidence - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn confidence_out_of_range_is_invalid() {
        let config = QuestionnaireConfig {
            ambiguity_confidence: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
