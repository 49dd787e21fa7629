//! libSQL database location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Database file name inside the project `.unison` directory.
pub const DEFAULT_DB_FILE: &str = "unison.db";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Explicit database path. Empty means `<project>/.unison/unison.db`.
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    /// Whether an explicit path overrides the project default.
    pub fn is_configured(&self) -> bool {
        !self.path.is_empty()
    }

    /// Resolve the database path for a project rooted at `project_root`.
    ///
    /// Relative explicit paths are resolved against the project root;
    /// `:memory:` is passed through untouched.
    pub fn resolve(&self, project_root: &Path) -> PathBuf {
        if !self.is_configured() {
            return project_root.join(".unison").join(DEFAULT_DB_FILE);
        }
        let explicit = PathBuf::from(&self.path);
        if self.path == ":memory:" || explicit.is_absolute() {
            explicit
        } else {
            project_root.join(explicit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolves_inside_dot_unison() {
        let config = DatabaseConfig::default();
        assert!(!config.is_configured());
        assert_eq!(
            config.resolve(Path::new("/work/acme")),
            PathBuf::from("/work/acme/.unison/unison.db")
        );
    }

    #[test]
    fn relative_path_joins_project_root() {
        let config = DatabaseConfig {
            path: "data/schemes.db".into(),
        };
        assert_eq!(
            config.resolve(Path::new("/work/acme")),
            PathBuf::from("/work/acme/data/schemes.db")
        );
    }

    #[test]
    fn absolute_and_memory_paths_pass_through() {
        let absolute = DatabaseConfig {
            path: "/var/lib/unison.db".into(),
        };
        assert_eq!(
            absolute.resolve(Path::new("/work/acme")),
            PathBuf::from("/var/lib/unison.db")
        );

        let memory = DatabaseConfig {
            path: ":memory:".into(),
        };
        assert_eq!(memory.resolve(Path::new("/work/acme")), PathBuf::from(":memory:"));
    }
}
