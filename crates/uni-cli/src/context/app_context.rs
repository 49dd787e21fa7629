use std::path::Path;

use anyhow::Context;
use uni_config::UniConfig;
use uni_db::service::UniService;
use uni_distill::MergeSettings;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: UniService,
    pub config: UniConfig,
}

impl AppContext {
    /// Open the project database named by the configuration.
    pub async fn init(project_root: &Path, config: UniConfig) -> anyhow::Result<Self> {
        let db_path = config.database.resolve(project_root);
        let db_path_str = db_path.to_string_lossy();
        tracing::debug!(db = %db_path_str, root = %project_root.display(), "opening database");

        let service = UniService::new_local(&db_path_str)
            .await
            .with_context(|| format!("failed to open unison database at {db_path_str}"))?;

        Ok(Self { service, config })
    }

    /// Naming rules for `uni merge`, from the `[distill]` section.
    #[must_use]
    pub fn merge_settings(&self) -> MergeSettings {
        MergeSettings {
            clone_prefix: self.config.distill.clone_prefix.clone(),
            max_name_len: self.config.distill.max_name_len,
        }
    }
}
