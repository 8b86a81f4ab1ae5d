//! CLI argument definitions for `netsite`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use logger::Level;
use netsite::config::ConfigOverrides;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `sites_dir`, `scale`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum TemplatesSubcommand {
    /// Install the bundled viewer files into the template directory.
    ///
    /// The d3 v3 bundle is not shipped and must be added by hand.
    Init {
        /// Target directory (defaults to config `templates_dir`)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },
    /// Show which configured assets are present in the template directory.
    Check,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Build a visualization site from a graph file.
    ///
    /// Reads a node-link JSON or edge-list CSV graph, writes `network.json`
    /// plus the viewer assets into a new directory under `sites_dir`, and
    /// prints the path of its `index.html`.
    Build {
        /// Graph file (.json node-link or .csv edge list)
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Site title (defaults to the graph file name)
        #[arg(short, long)]
        title: Option<String>,

        /// Site description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Viewer scale hint in pixels (defaults to config `scale`)
        #[arg(long, value_name = "PIXELS")]
        scale: Option<u32>,
    },
    /// Print the `network.json` document for a graph file without building a site.
    Serialize {
        /// Graph file (.json node-link or .csv edge list)
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Document title (defaults to the graph file name)
        #[arg(short, long)]
        title: Option<String>,

        /// Document description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Viewer scale hint in pixels (defaults to config `scale`)
        #[arg(long, value_name = "PIXELS")]
        scale: Option<u32>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Manage the viewer template directory.
    Templates {
        #[command(subcommand)]
        subcommand: TemplatesSubcommand,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "netsite",
    about = "Turn graphs into browser visualization sites",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config viewer scale (per-command `--scale` still wins)
    #[arg(long = "config-scale", value_name = "PIXELS")]
    pub config_scale: Option<u32>,

    /// Override the directory sites are written under (must exist)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Override the viewer template directory
    #[arg(long = "templates-dir", value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override. Per-command `--scale` is applied later by
    /// the command handlers and takes precedence over `--config-scale`.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            sites_dir: self
                .out_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            templates_dir: self
                .templates_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            scale: self.config_scale,
        }
    }
}
