use venture_config::VentureConfig;

/// Warn when env vars look like they were meant to configure a section that
/// still holds defaults.
pub fn warn_unconfigured(config: &VentureConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &VentureConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.judge.is_configured() && has_env_prefix(&env_keys, "VENTURE_JUDGE") {
        warnings.push(
            "Judge config appears default while VENTURE_JUDGE* env vars exist. Use double underscores (example: VENTURE_JUDGE__API_KEY)."
                .to_string(),
        );
    }

    if has_env_prefix(&env_keys, "VENTURE_STORAGE_") && !has_env_prefix(&env_keys, "VENTURE_STORAGE__") {
        warnings.push(
            "VENTURE_STORAGE_* env vars are ignored. Use double underscores (example: VENTURE_STORAGE__DB_PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use venture_config::VentureConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_judge_key() {
        let config = VentureConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("VENTURE_JUDGE_API_KEY".to_string(), "sk-test".to_string()),
                ("VENTURE_STORAGE_DB_PATH".to_string(), "/tmp/v.db".to_string()),
            ],
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("VENTURE_JUDGE__API_KEY"));
        assert!(warnings[1].contains("VENTURE_STORAGE__DB_PATH"));
    }

    #[test]
    fn configured_sections_do_not_warn() {
        let mut config = VentureConfig::default();
        config.judge.api_key = "sk-test".to_string();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("VENTURE_JUDGE__API_KEY".to_string(), "sk-test".to_string()),
                ("VENTURE_STORAGE__DB_PATH".to_string(), "/tmp/v.db".to_string()),
            ],
        );
        assert!(warnings.is_empty());
    }
}
