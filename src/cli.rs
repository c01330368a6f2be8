//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **preview**: Load files into a viewer session and print the selected preview
//! - **favicon**: Convert one image into `favicons.zip`
//! - **sizes**: List the favicon sizes that get generated
//! - **config**: Read and change settings
//!
//! # Examples
//!
//! ```bash
//! allview preview report.docx data.csv --select 2
//! allview favicon logo.psd -o dist/
//! allview config set output_dir=dist
//! ```

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "allview")]
#[command(about = "Preview any file and generate favicon sets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase diagnostic logging (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Preview one or more files
    #[command(visible_alias = "p")]
    Preview {
        /// Files to load, in order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Number of the file to preview (as shown in the file list)
        #[arg(short = 's', long = "select", value_name = "N")]
        select: Option<u64>,

        /// Print the session snapshot as JSON instead of the preview
        #[arg(long = "json")]
        json: bool,
    },

    /// Generate favicon16.png … favicon1000.png packed as favicons.zip
    #[command(visible_alias = "f")]
    Favicon {
        /// Source image (PNG, JPEG or PSD)
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Directory to save favicons.zip in (overrides config)
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output: Option<PathBuf>,

        /// Open the archive once it is saved
        #[arg(long = "open")]
        open: bool,
    },

    /// List the generated favicon sizes
    Sizes,

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., output_dir)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Split a `key=value` setting, trimming both sides
#[must_use]
pub fn parse_setting(setting: &str) -> Option<(&str, &str)> {
    let (key, value) = setting.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
