//! Configuration module for `netsite`

use crate::core::site::{AssetSource, DEFAULT_SCALE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the netsite config directory in path values
const DIR_VARIABLE: &str = "$NETSITE";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Existing directory new sites are written under
    #[serde(default)]
    pub sites_dir: String,
    /// Directory holding the viewer asset files
    #[serde(default)]
    pub templates_dir: String,
}

/// Viewer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Pixel size hint written into every document
    #[serde(default)]
    pub scale: u32,
    /// Asset file names copied from the template directory into each site
    #[serde(default)]
    pub assets: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Viewer settings
    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override sites output directory
    pub sites_dir: Option<String>,
    /// Override template directory
    pub templates_dir: Option<String>,
    /// Override viewer scale
    pub scale: Option<u32>,
}

impl Config {
    /// Get the `$NETSITE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/netsite`
    /// - macOS: `~/Library/Application Support/netsite`
    /// - Windows: `%APPDATA%\netsite`
    #[must_use]
    pub fn get_netsite_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("netsite")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or zero) here and set in `defaults` are
    /// filled in, so upgrading picks up new settings without touching the
    /// user's own values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.sites_dir.is_empty() && !defaults.paths.sites_dir.is_empty() {
            self.paths.sites_dir.clone_from(&defaults.paths.sites_dir);
            changed = true;
        }
        if self.paths.templates_dir.is_empty() && !defaults.paths.templates_dir.is_empty() {
            self.paths
                .templates_dir
                .clone_from(&defaults.paths.templates_dir);
            changed = true;
        }

        if self.viewer.scale == 0 && defaults.viewer.scale != 0 {
            self.viewer.scale = defaults.viewer.scale;
            changed = true;
        }
        if self.viewer.assets.is_empty() && !defaults.viewer.assets.is_empty() {
            self.viewer.assets.clone_from(&defaults.viewer.assets);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only last for the current run; nothing is written back to
    /// the config file. `None` values leave the config untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(sites_dir) = &overrides.sites_dir {
            self.paths.sites_dir.clone_from(sites_dir);
        }
        if let Some(templates_dir) = &overrides.templates_dir {
            self.paths.templates_dir.clone_from(templates_dir);
        }
        if let Some(scale) = overrides.scale {
            self.viewer.scale = scale;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_netsite_dir`](Self::get_netsite_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_netsite_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$NETSITE` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let netsite_dir = Self::get_netsite_dir();
            value.replace(DIR_VARIABLE, netsite_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$NETSITE` in path values. Missing fields use their serde
    /// defaults (empty strings, `false`, `0`).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.sites_dir = Self::expand_variables(&config.paths.sites_dir);
        config.paths.templates_dir = Self::expand_variables(&config.paths.templates_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in defaults are not valid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file has missing fields merged in from defaults (and is saved
    /// back when that changes anything). On first run the defaults are written
    /// out. Any read or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `sites_dir`,
    /// `templates_dir`, `scale`, `assets` (comma-separated). Dashed spellings
    /// such as `sites-dir` are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "sites_dir" | "sites-dir" => Some(self.paths.sites_dir.clone()),
            "templates_dir" | "templates-dir" => Some(self.paths.templates_dir.clone()),
            "scale" => Some(self.viewer.scale.to_string()),
            "assets" => Some(self.viewer.assets.join(",")),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "sites_dir" | "sites-dir" => self.paths.sites_dir = value.to_string(),
            "templates_dir" | "templates-dir" => self.paths.templates_dir = value.to_string(),
            "scale" => {
                self.viewer.scale = value
                    .parse::<u32>()
                    .ok()
                    .filter(|scale| *scale > 0)
                    .ok_or_else(|| format!("Invalid scale: '{value}' (expected a positive integer)"))?;
            }
            "assets" => {
                let assets: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string)
                    .collect();
                if assets.is_empty() {
                    return Err("Asset list cannot be empty".to_string());
                }
                self.viewer.assets = assets;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "sites_dir" | "sites-dir" => self.paths.sites_dir.clone_from(&defaults.paths.sites_dir),
            "templates_dir" | "templates-dir" => self
                .paths
                .templates_dir
                .clone_from(&defaults.paths.templates_dir),
            "scale" => self.viewer.scale = defaults.viewer.scale,
            "assets" => self.viewer.assets.clone_from(&defaults.viewer.assets),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Viewer scale, falling back to the built-in default when unset
    #[must_use]
    pub const fn scale(&self) -> u32 {
        if self.viewer.scale == 0 {
            DEFAULT_SCALE
        } else {
            self.viewer.scale
        }
    }

    /// Asset source described by `paths.templates_dir` and `viewer.assets`
    #[must_use]
    pub fn asset_source(&self) -> AssetSource {
        AssetSource::new(&self.paths.templates_dir, self.viewer.assets.clone())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  sites_dir = \"{}\"", self.paths.sites_dir)?;
        writeln!(f, "  templates_dir = \"{}\"", self.paths.templates_dir)?;

        writeln!(f, "\n[viewer]")?;
        writeln!(f, "  scale = {}", self.viewer.scale)?;
        writeln!(f, "  assets = [{}]", self.viewer.assets.join(", "))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_viewer_settings() {
        let config = Config::from_defaults();
        assert_eq!(config.viewer.scale, DEFAULT_SCALE);
        assert!(config.viewer.assets.contains(&"index.html".to_string()));
        assert!(!config.paths.templates_dir.contains(DIR_VARIABLE));
    }

    #[test]
    fn test_scale_falls_back_when_zero() {
        let mut config = Config::default();
        assert_eq!(config.scale(), DEFAULT_SCALE);
        config.viewer.scale = 640;
        assert_eq!(config.scale(), 640);
    }

    #[test]
    fn test_asset_source_uses_config_paths() {
        let mut config = Config::from_defaults();
        config.paths.templates_dir = "/tpl".to_string();
        let source = config.asset_source();
        assert_eq!(source.dir, PathBuf::from("/tpl"));
        assert_eq!(source.files, config.viewer.assets);
    }
}
