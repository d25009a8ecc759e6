//! Answer validation thresholds for component collection.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Minimum trimmed answer length before the judge is consulted.
const fn default_min_answer_chars() -> usize {
    20
}

/// Consecutive rejections after which the relaxed heuristic applies.
const fn default_leniency_threshold() -> u32 {
    2
}

/// Word count the relaxed heuristic requires.
const fn default_relaxed_min_words() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
    #[serde(default = "default_min_answer_chars")]
    pub min_answer_chars: usize,

    #[serde(default = "default_leniency_threshold")]
    pub leniency_threshold: u32,

    #[serde(default = "default_relaxed_min_words")]
    pub relaxed_min_words: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_answer_chars: default_min_answer_chars(),
            leniency_threshold: default_leniency_threshold(),
            relaxed_min_words: default_relaxed_min_words(),
        }
    }
}

impl GateConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.leniency_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gate.leniency_threshold".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.relaxed_min_words == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gate.relaxed_min_words".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
