use std::path::{Path, PathBuf};

/// Per-project state directory holding the database, config and write lock.
pub const UNISON_DIR: &str = ".unison";

/// Walk upwards from `start` until a `.unison` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(UNISON_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Accept a path to the `.unison` directory itself as its project root.
#[must_use]
pub fn strip_unison_dir(path: PathBuf) -> PathBuf {
    let is_state_dir = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == UNISON_DIR);
    if is_state_dir {
        path.parent().map_or(path.clone(), Path::to_path_buf)
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::{find_project_root, strip_unison_dir};

    #[test]
    fn finds_project_root_in_current_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".unison")).expect(".unison should create");

        let found = find_project_root(temp.path());
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn finds_project_root_in_parent_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".unison")).expect(".unison should create");
        std::fs::create_dir_all(temp.path().join("a/b/c")).expect("nested dirs should create");

        let found = find_project_root(&temp.path().join("a/b/c"));
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn returns_none_when_not_found() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir_all(temp.path().join("a/b/c")).expect("nested dirs should create");

        assert!(find_project_root(&temp.path().join("a/b/c")).is_none());
    }

    #[test]
    fn state_dir_path_maps_to_its_parent() {
        assert_eq!(
            strip_unison_dir(PathBuf::from("/work/acme/.unison")),
            PathBuf::from("/work/acme")
        );
        assert_eq!(
            strip_unison_dir(PathBuf::from("/work/acme")),
            PathBuf::from("/work/acme")
        );
    }
}
