//! Environment variable precedence tests.

use figment::Jail;
use uni_config::UniConfig;
use uni_core::enums::{SchemeCategory, SchemeFilter};

#[test]
fn env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("UNISON_GENERAL__DEFAULT_CATEGORY", "notification");
        jail.set_env("UNISON_DISTILL__CLONE_PREFIX", "Copy of");

        let config = UniConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config.general.default_category, SchemeCategory::Notification);
        assert_eq!(config.distill.clone_prefix, "Copy of");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".unison")?;
        jail.create_file(
            ".unison/config.toml",
            r#"
[general]
default_filter = "unassociated"
default_limit = 5
"#,
        )?;
        jail.set_env("UNISON_GENERAL__DEFAULT_FILTER", "all");

        let config = UniConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config.general.default_filter, SchemeFilter::All);
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}

#[test]
fn env_database_path_marks_configured() {
    Jail::expect_with(|jail| {
        jail.set_env("UNISON_DATABASE__PATH", ":memory:");

        let config = UniConfig::load(jail.directory()).expect("config loads");
        assert!(config.database.is_configured());
        assert_eq!(config.database.path, ":memory:");
        Ok(())
    });
}

#[test]
fn numeric_env_values_are_parsed() {
    Jail::expect_with(|jail| {
        jail.set_env("UNISON_DISTILL__MAX_NAME_LEN", "32");

        let config = UniConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config.distill.max_name_len, 32);
        Ok(())
    });
}
