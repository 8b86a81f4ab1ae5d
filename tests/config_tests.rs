//! Integration tests for configuration management

use netsite::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.sites_dir.is_empty(),
        "Default sites_dir should not be empty"
    );
    assert!(
        !config.paths.templates_dir.is_empty(),
        "Default templates_dir should not be empty"
    );
    assert_eq!(config.viewer.scale, 400);
    assert_eq!(
        config.viewer.assets,
        vec!["index.html", "matrix.js", "matrix.css", "d3.v3.min.js"]
    );
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
sites_dir = "./figure"
templates_dir = "./templates"

[viewer]
scale = 600
assets = ["index.html", "viewer.js"]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.sites_dir, "./figure");
    assert_eq!(config.paths.templates_dir, "./templates");
    assert_eq!(config.viewer.scale, 600);
    assert_eq!(config.viewer.assets, vec!["index.html", "viewer.js"]);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.sites_dir, "");
    assert_eq!(config.viewer.scale, 0);
    assert!(config.viewer.assets.is_empty());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$NETSITE/netsite.log"

[paths]
templates_dir = "$NETSITE/templates"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("netsite"));
    assert!(!config.logging.file.contains("$NETSITE"));
    assert!(config.paths.templates_dir.ends_with("templates"));
    assert!(!config.paths.templates_dir.contains("$NETSITE"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("sites-dir", "/srv/sites").expect("Failed to set sites_dir");
    assert_eq!(config.get("sites_dir").unwrap(), "/srv/sites");

    config.set("scale", "720").expect("Failed to set scale");
    assert_eq!(config.viewer.scale, 720);

    config
        .set("assets", "index.html, app.js ,")
        .expect("Failed to set assets");
    assert_eq!(config.viewer.assets, vec!["index.html", "app.js"]);
    assert_eq!(config.get("assets").unwrap(), "index.html,app.js");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("scale", "big").is_err());
    assert!(config.set("scale", "0").is_err());
    assert!(config.set("assets", " , ").is_err());
    assert_eq!(config.viewer.scale, 400);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("scale", "999").unwrap();
    config.set("templates_dir", "/elsewhere").unwrap();

    config.unset("scale", &defaults).unwrap();
    config.unset("templates-dir", &defaults).unwrap();
    assert_eq!(config.viewer.scale, defaults.viewer.scale);
    assert_eq!(config.paths.templates_dir, defaults.paths.templates_dir);

    assert!(config.unset("bogus", &defaults).is_err());
}

#[test]
fn test_config_toml_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").unwrap();
    config.set("scale", "512").unwrap();

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.viewer.scale, 512);
    assert_eq!(loaded.viewer.assets, config.viewer.assets);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        sites_dir: Some("./custom_sites".to_string()),
        templates_dir: Some("./custom_templates".to_string()),
        scale: Some(256),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.sites_dir, "./custom_sites");
    assert_eq!(config.paths.templates_dir, "./custom_templates");
    assert_eq!(config.scale(), 256);
    assert_eq!(config.asset_source().dir, PathBuf::from("./custom_templates"));
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.sites_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..Default::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.sites_dir, before);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[viewer]"));
    assert!(display_str.contains("templates_dir"));
    assert!(display_str.contains("scale = 400"));
}

#[test]
fn test_merge_defaults_fills_empty_fields() {
    let toml_str = r#"
[logging]
level = "error"

[paths]
sites_dir = "/mine"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));

    // Existing values are preserved, missing ones filled in
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.paths.sites_dir, "/mine");
    assert_eq!(config.paths.templates_dir, defaults.paths.templates_dir);
    assert_eq!(config.viewer.scale, defaults.viewer.scale);
    assert_eq!(config.viewer.assets, defaults.viewer.assets);

    // A second merge has nothing left to add
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_get_netsite_dir() {
    let dir = Config::get_netsite_dir();

    assert!(dir.to_string_lossy().contains("netsite"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
