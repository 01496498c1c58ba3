use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    showshelf::logging::init(showshelf::logging::CLI_FILTER).context("init logging")?;

    let cli = showshelf::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = cli.global.config();
    match cli.command {
        showshelf::cli::Command::Ingest(args) => {
            showshelf::commands::ingest(&config, args).context("ingest")?;
        }
        showshelf::cli::Command::List => {
            showshelf::commands::list(&config).context("list")?;
        }
        showshelf::cli::Command::Show(args) => {
            showshelf::commands::show(&config, args).context("show")?;
        }
        showshelf::cli::Command::Mark(args) => {
            showshelf::commands::mark(&config, args).context("mark")?;
        }
        showshelf::cli::Command::Play(args) => {
            showshelf::commands::play(&config, args).context("play")?;
        }
    }

    Ok(())
}
