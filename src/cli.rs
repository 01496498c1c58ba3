use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Directory holding one folder per show (default: $SHOWSHELF_ROOT or `shows`).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Player program used by `play` (default: $SHOWSHELF_PLAYER or `vlc`).
    #[arg(long, global = true)]
    pub player: Option<PathBuf>,

    /// Timeout for fetching listing pages.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl GlobalArgs {
    pub fn config(&self) -> Config {
        Config::resolve(self.root.clone(), self.player.clone(), self.timeout_secs)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Ingest(IngestArgs),
    List,
    Show(ShowArgs),
    Mark(MarkArgs),
    Play(PlayArgs),
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Listing page URL (must be http/https).
    #[arg(long)]
    pub url: String,

    /// Scheme and host used for relative links instead of the page's own
    /// (e.g. `http://172.16.50.10`).
    #[arg(long)]
    pub base: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Show name as printed by `list`.
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct MarkArgs {
    #[arg(long)]
    pub name: String,

    /// Zero-based episode index.
    #[arg(long)]
    pub index: usize,

    /// Mark as unwatched instead of watched.
    #[arg(long)]
    pub unwatched: bool,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    #[arg(long)]
    pub name: String,

    /// Zero-based episode index.
    #[arg(long)]
    pub index: usize,
}
