use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::dom::document::DEFAULT_HOST_ID;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "pick-bot",
    version,
    about = "Teach-by-example element picker and action replayer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Id of the element whose first child is the picking surface
    #[arg(long, global = true)]
    pub host_id: Option<String>,

    /// Append a JSONL trace of picker transitions to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: pick-bot.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay session scripts against a document snapshot
    Run {
        /// Document snapshot (YAML or JSON)
        #[arg(long)]
        document: String,

        /// Session script YAML file or directory of YAML files
        #[arg(long)]
        script: String,

        /// Output format: console or json
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print a document with locators and shape fingerprints
    Inspect {
        #[arg(long)]
        document: String,
    },

    /// Check whether two elements are structurally equal
    Match {
        #[arg(long)]
        document: String,

        /// First element locator (`#id` or `/0/1`)
        #[arg(long)]
        a: String,

        /// Second element locator
        #[arg(long)]
        b: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `pick-bot.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_host_id")]
    pub host_id: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            host_id: default_host_id(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            output: None,
        }
    }
}

// Serde default helpers
fn default_host_id() -> String { DEFAULT_HOST_ID.to_string() }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("pick-bot.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings (merge CLI args with config file)
// ============================================================================

/// Values shared by every subcommand after CLI flags override the config.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host_id: String,
    pub trace_path: Option<String>,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &AppConfig) -> Self {
        Self {
            host_id: cli
                .host_id
                .clone()
                .unwrap_or_else(|| config.surface.host_id.clone()),
            trace_path: cli.trace.clone().or_else(|| config.trace.path.clone()),
        }
    }
}
