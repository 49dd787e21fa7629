use std::path::{Path, PathBuf};

use anyhow::Context;
use uni_config::UniConfig;

use crate::cli::GlobalFlags;

/// Load `.env` for the target project, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<UniConfig> {
    let root = config_root(flags)?;
    load_project_dotenv(&root)?;
    UniConfig::load(&root).context("failed to load unison configuration")
}

/// The directory whose `.env` and `.unison/config.toml` apply: `--project`,
/// else the enclosing project, else the current directory.
fn config_root(flags: &GlobalFlags) -> anyhow::Result<PathBuf> {
    if let Some(project) = &flags.project {
        return Ok(crate::context::strip_unison_dir(PathBuf::from(project)));
    }
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    Ok(crate::context::find_project_root(&cwd).unwrap_or(cwd))
}

fn load_project_dotenv(root: &Path) -> anyhow::Result<()> {
    let env_path = root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }
    dotenvy::dotenv().ok();
    Ok(())
}
