use figment::Jail;
use venture_config::VentureConfig;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("VENTURE_JUDGE__API_KEY", "sk-from-env");
        jail.set_env("VENTURE_GATE__RELAXED_MIN_WORDS", "7");
        jail.set_env("VENTURE_SERVER__BIND", "0.0.0.0:9000");

        let config = VentureConfig::load().expect("config loads");
        assert_eq!(config.judge.api_key, "sk-from-env");
        assert!(config.judge.is_configured());
        assert_eq!(config.gate.relaxed_min_words, 7);
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".venture")?;
        jail.create_file(
            ".venture/config.toml",
            r#"
[judge]
model = "from-file"
"#,
        )?;
        jail.set_env("VENTURE_JUDGE__MODEL", "from-env");

        let config = VentureConfig::load().expect("config loads");
        assert_eq!(config.judge.model, "from-env");
        Ok(())
    });
}
