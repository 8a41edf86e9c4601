//! Command-line configuration.
//!
//! Every option can also be set through a `LEVEL3_*` environment variable.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use level3_serde::Format;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration of the `level3` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "level3")]
#[command(about = "Convert Level3 hypermedia documents between HAL+JSON and HAL+XML")]
pub struct CliConfig {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "LEVEL3_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Indent the output.
    #[arg(long, env = "LEVEL3_PRETTY", default_value = "false", global = true)]
    pub pretty: bool,

    /// Output format of `encode` and input format of `decode`
    /// (xml, json, or a media type).
    #[arg(short, long, env = "LEVEL3_FORMAT", default_value = "xml", global = true)]
    pub format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Read a HAL+JSON document and write it in the configured format.
    Encode {
        /// Input file; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Read a request body in the configured format and print its data as JSON.
    Decode {
        /// Input file; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Print the MIME type of the configured format.
    ContentType,
}

impl CliConfig {
    /// Validates the configuration, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log level '{}': expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if Format::parse(&self.format).is_none() {
            errors.push(format!(
                "Unsupported format '{}': expected xml, json or a HAL media type",
                self.format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The configured format. Call [`validate`](Self::validate) first.
    pub fn format(&self) -> anyhow::Result<Format> {
        Format::parse(&self.format)
            .ok_or_else(|| anyhow::anyhow!("Unsupported format '{}'", self.format))
    }
}
