use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use venture_config::VentureConfig;
use venture_db::VentureDb;
use venture_engine::PhaseOrchestrator;
use venture_judge::{Judge, OfflineJudge, OpenAiJudge};

use crate::service::ConsultationService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: Arc<ConsultationService>,
    pub config: VentureConfig,
}

impl AppContext {
    /// Open the session store and wire the orchestrator to the configured
    /// judge. `db_override` replaces `storage.db_path`.
    pub async fn init(config: VentureConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        let db_path = db_override.map_or_else(|| config.storage.db_path.clone(), str::to_string);
        ensure_parent_dir(&db_path)?;

        let db = VentureDb::open_local(&db_path)
            .await
            .with_context(|| format!("failed to open session store at {db_path}"))?;
        let orchestrator = PhaseOrchestrator::new(build_judge(&config), &config);

        Ok(Self {
            service: Arc::new(ConsultationService::new(db, orchestrator)),
            config,
        })
    }
}

fn build_judge(config: &VentureConfig) -> Arc<dyn Judge> {
    let Ok(judge_config) = config.require_judge() else {
        tracing::warn!(
            "judge is not configured (set VENTURE_JUDGE__API_KEY); answers are checked locally and reports are unavailable"
        );
        return Arc::new(OfflineJudge);
    };

    match OpenAiJudge::new(judge_config) {
        Ok(judge) => {
            tracing::debug!(model = %judge_config.model, "judge ready");
            Arc::new(judge)
        }
        Err(error) => {
            tracing::warn!(%error, "failed to initialize judge client; continuing offline");
            Arc::new(OfflineJudge)
        }
    }
}

fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    if db_path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_judge_falls_back_offline() {
        let judge = build_judge(&VentureConfig::default());
        assert_eq!(judge.name(), "offline");
    }

    #[test]
    fn parent_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("venture.db");
        ensure_parent_dir(&path.to_string_lossy()).unwrap();
        assert!(dir.path().join("nested").is_dir());
        ensure_parent_dir(":memory:").unwrap();
    }

    #[tokio::test]
    async fn init_opens_override_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store").join("venture.db");
        let ctx = AppContext::init(VentureConfig::default(), Some(&path.to_string_lossy()))
            .await
            .unwrap();
        let created = ctx.service.create_session("Pedal Co", None).await.unwrap();
        assert!(created.session_id.starts_with("ses-"));
        assert!(path.exists());
    }
}
