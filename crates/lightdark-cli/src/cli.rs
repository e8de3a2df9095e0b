//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lightdark::{Mode, ModeSelection, Variant};

#[derive(Debug, Parser)]
#[command(
    name = "lightdark",
    version,
    about = "Resolve, tabulate and replay light/dark/auto toggle behavior"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve one combination of inputs.
    Resolve(ResolveArgs),

    /// Print every resolver combination.
    Table(TableArgs),

    /// Replay a scenario file against a toggle.
    Play(PlayArgs),

    /// Follow the OS color-scheme preference and print change events.
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// The user's selection.
    #[arg(long, default_value = "auto")]
    pub user: ModeSelection,

    /// The `mode` attribute.
    #[arg(long, default_value = "auto")]
    pub attr: ModeSelection,

    /// The system preference.
    #[arg(long, default_value = "light")]
    pub pref: Mode,

    /// Whether the user has interacted.
    #[arg(long)]
    pub dirty: bool,

    /// Print JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Print JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Scenario file (YAML).
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Print JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Exit after this many change events.
    #[arg(long)]
    pub count: Option<usize>,

    /// Toggle variant, which decides the event name.
    #[arg(long, value_parser = parse_variant, default_value = "dark-mode")]
    pub variant: Variant,
}

fn parse_variant(value: &str) -> Result<Variant, String> {
    Variant::ALL
        .into_iter()
        .find(|v| v.as_str() == value)
        .ok_or_else(|| format!("unknown variant \"{value}\" (valid: dark-mode, light-dark)"))
}
