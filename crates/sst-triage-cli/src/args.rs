use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sst-triage")]
#[command(about = "Rule-based triage for SST imagery requests")]
#[command(version)]
pub struct Cli {
    /// Base directory (default: ~/.sst-triage)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify request text into a ticket category
    Classify {
        /// Request text (reads stdin when omitted)
        text: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect ticket categories and their trigger rules
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Look up language names and locale codes
    Language {
        #[command(subcommand)]
        action: LanguageAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List all categories
    List,

    /// Show a category's trigger rule
    Show {
        /// Category slug or label (e.g., "make-new-package")
        name: String,
    },
}

#[derive(Subcommand)]
pub enum LanguageAction {
    /// Look up the locale code for a language name
    Lookup {
        /// Language name (e.g., "Croatian")
        name: String,
    },

    /// Reverse look up the language name for a locale code
    Code {
        /// Locale code (e.g., "hr-HR")
        code: String,
    },

    /// List all language entries
    List,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// List configured rule and language overrides
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
