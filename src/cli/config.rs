use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::OrderFormError;
use crate::trace::logger::TraceLogger;
use crate::validation::gate::{OnValidSubmission, SubmissionGate};
use crate::validation::rules::RuleOptions;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "order-form",
    version,
    about = "Drive the ice-cream order form: fill, persist, validate, submit"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: order-form.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding persisted form snapshots
    #[arg(long, global = true)]
    pub store_dir: Option<String>,

    /// What a valid submission does: allow or log-only
    #[arg(long, global = true)]
    pub policy: Option<String>,

    /// Append JSONL trace events to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interact with the form; every change is persisted to the store
    Fill {
        /// Form markup (YAML or JSON)
        #[arg(long)]
        form: String,

        /// Type or select a value: id=value (repeatable)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Check a radio or checkbox by id (repeatable)
        #[arg(long = "check")]
        check: Vec<String>,
    },

    /// Restore the form from the store, apply inputs, and submit it
    Submit {
        #[arg(long)]
        form: String,

        #[arg(long = "set")]
        set: Vec<String>,

        #[arg(long = "check")]
        check: Vec<String>,

        /// Output format: console or json
        #[arg(long, default_value = "console")]
        format: String,
    },

    /// Show the form as restored from the store
    Restore {
        #[arg(long)]
        form: String,
    },

    /// Delete the stored snapshot of a form
    Clear {
        #[arg(long)]
        form: String,
    },

    /// Run YAML scenarios against the form
    Run {
        #[arg(long)]
        form: String,

        /// Scenario YAML file or directory of YAML files
        #[arg(long)]
        scenario: String,

        /// Output format: console or junit
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `order-form.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: default_store_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SubmissionConfig {
    #[serde(default)]
    pub policy: OnValidSubmission,

    /// Opt in to rejecting an empty card number under an unset card type
    #[serde(default)]
    pub strict_card_number: bool,
}


#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_store_dir() -> String { ".order-form".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("order-form.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings (CLI > config file > defaults)
// ============================================================================

#[derive(Debug, Clone)]
pub struct Settings {
    pub store_dir: String,
    pub gate: SubmissionGate,
    pub trace_path: Option<String>,
    pub verbose: u8,
}

impl Settings {
    pub fn tracer(&self) -> TraceLogger {
        match &self.trace_path {
            Some(path) => TraceLogger::new(path),
            None => TraceLogger::disabled(),
        }
    }
}

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Result<Settings, OrderFormError> {
    let policy = match cli.policy.as_deref() {
        Some(name) => name.parse()?,
        None => config.submission.policy,
    };

    Ok(Settings {
        store_dir: cli
            .store_dir
            .clone()
            .unwrap_or_else(|| config.storage.dir.clone()),
        gate: SubmissionGate::new(
            policy,
            RuleOptions {
                strict_card_number: config.submission.strict_card_number,
            },
        ),
        trace_path: cli.trace.clone().or_else(|| config.trace.path.clone()),
        verbose: cli.verbose,
    })
}
