//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Versa CLI - parse, compare and sort version numbers and structured values
#[derive(Parser, Debug)]
#[command(
    name = "versa",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "VERSA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (overrides the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse version numbers and show their components
    Parse(ParseArgs),

    /// Compare two version numbers
    Compare(CompareArgs),

    /// Sort version numbers
    Sort(SortArgs),

    /// Compare two structured values (JSON or YAML files, or inline JSON)
    Values(ValuesArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Version texts such as 1.2 or 1.2.3.4
    #[arg(value_name = "VERSION", required = true)]
    pub versions: Vec<String>,

    /// Reject segments that are not plain decimal numbers
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the compare command
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Left version
    #[arg(value_name = "LEFT")]
    pub left: String,

    /// Right version
    #[arg(value_name = "RIGHT")]
    pub right: String,

    /// Reject segments that are not plain decimal numbers
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the sort command
#[derive(Parser, Debug)]
pub struct SortArgs {
    /// Version texts to sort
    #[arg(value_name = "VERSION", required = true)]
    pub versions: Vec<String>,

    /// Sort in descending order
    #[arg(short, long)]
    pub reverse: bool,

    /// Reject segments that are not plain decimal numbers
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the values command
#[derive(Parser, Debug)]
pub struct ValuesArgs {
    /// Left operand: a .json/.yaml/.yml file or inline JSON
    #[arg(value_name = "LEFT")]
    pub left: String,

    /// Right operand: a .json/.yaml/.yml file or inline JSON
    #[arg(value_name = "RIGHT")]
    pub right: String,

    /// Exit with an error when the values are incomparable
    #[arg(long)]
    pub fail_incomparable: bool,

    /// Maximum nesting depth followed (overrides the configured depth)
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Target file (defaults to .versa.toml in the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Initialize the user config instead of the project config
    #[arg(long, conflicts_with = "path")]
    pub user: bool,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,

    /// Parse versions strictly by default
    #[arg(long)]
    pub strict: bool,

    /// Default comparator nesting limit
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Default output format
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Default log level
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
