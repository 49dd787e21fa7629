mod app_context;
mod project_root;

pub use app_context::AppContext;
pub use project_root::{UNISON_DIR, find_project_root, strip_unison_dir};
