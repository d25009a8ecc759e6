use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Extraction from the layered providers failed.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error(
        "[{section}] is not configured: set VENTURE_{}__* or add it to .venture/config.toml",
        .section.to_uppercase()
    )]
    NotConfigured { section: String },

    /// A value parsed but is out of range.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_names_the_env_prefix() {
        let err = ConfigError::NotConfigured {
            section: "judge".into(),
        };
        assert_eq!(
            err.to_string(),
            "[judge] is not configured: set VENTURE_JUDGE__* or add it to .venture/config.toml"
        );
    }
}
