//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use uni_config::{ConfigError, UniConfig};
use uni_core::enums::{SchemeCategory, SchemeFilter};

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_category = "notification"
default_filter = "all"
default_limit = 50
"#,
        )?;

        let config: UniConfig = Figment::from(Serialized::defaults(UniConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.default_category, SchemeCategory::Notification);
        assert_eq!(config.general.default_filter, SchemeFilter::All);
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn loads_database_and_distill_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/unison/schemes.db"

[distill]
clone_prefix = "Merged from"
max_name_len = 80
"#,
        )?;

        let config: UniConfig = Figment::from(Serialized::defaults(UniConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.database.is_configured());
        assert_eq!(config.database.path, "/var/lib/unison/schemes.db");
        assert_eq!(config.distill.clone_prefix, "Merged from");
        assert_eq!(config.distill.max_name_len, 80);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[distill]
max_name_len = 64
"#,
        )?;

        let config: UniConfig = Figment::from(Serialized::defaults(UniConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.distill.max_name_len, 64);
        assert_eq!(config.distill.clone_prefix, "Clone of");
        assert_eq!(config.general.default_limit, 20);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".unison")?;
        jail.create_file(
            ".unison/config.toml",
            r#"
[general]
default_filter = "unassociated"
"#,
        )?;

        let config = UniConfig::load(jail.directory()).expect("config loads");
        assert_eq!(config.general.default_filter, SchemeFilter::Unassociated);
        Ok(())
    });
}

#[test]
fn project_config_is_read_from_the_given_root() {
    Jail::expect_with(|jail| {
        jail.create_dir("elsewhere/.unison")?;
        jail.create_file(
            "elsewhere/.unison/config.toml",
            r#"
[distill]
clone_prefix = "Merged from"
"#,
        )?;

        let here = UniConfig::load(jail.directory()).expect("config loads");
        assert_eq!(here.distill.clone_prefix, "Clone of");

        let there = UniConfig::load(&jail.directory().join("elsewhere")).expect("config loads");
        assert_eq!(there.distill.clone_prefix, "Merged from");
        Ok(())
    });
}

#[test]
fn invalid_distill_settings_fail_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".unison")?;
        jail.create_file(
            ".unison/config.toml",
            r#"
[distill]
clone_prefix = ""
"#,
        )?;

        let err = UniConfig::load(jail.directory()).expect_err("blank prefix must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn unknown_category_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_category = "workflow"
"#,
        )?;

        let result: Result<UniConfig, _> =
            Figment::from(Serialized::defaults(UniConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
