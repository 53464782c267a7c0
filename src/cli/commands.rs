//! CLI subcommand definitions

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Summarize the last 7 days into the weekly note (default)
    Generate(GenerateArgs),
    /// Show which daily notes fall inside the window
    Window,
    /// List documents modified during the window
    Updated,
    /// Show or edit the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct GenerateArgs {
    /// Replace the weekly note if it already exists
    #[arg(short, long)]
    pub(crate) force: bool,

    /// Show what would be sent without calling the service or writing
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Leave out the "Updated files" section
    #[arg(long)]
    pub(crate) no_updated: bool,

    /// Insert the summary into this existing document instead
    #[arg(long, value_name = "PATH")]
    pub(crate) insert: Option<String>,

    /// 1-based line to insert before (default: end of document)
    #[arg(long, value_name = "N", requires = "insert")]
    pub(crate) line: Option<usize>,
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommand {
    /// Print the effective config (API key masked)
    Show,
    /// Print the config file path
    Path,
    /// Store the API key
    SetKey { key: String },
    /// Remove the API key
    ClearKey,
    /// Add a glob to the ignore list (`*` within a folder, `**` across folders)
    AddIgnore { pattern: String },
    /// Remove a glob from the ignore list
    RemoveIgnore { pattern: String },
}
