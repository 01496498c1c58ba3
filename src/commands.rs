use std::io::Write as _;

use anyhow::Context as _;

use crate::app::model::ShowView;
use crate::cli::{IngestArgs, MarkArgs, PlayArgs, ShowArgs};
use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::player::{CommandPlayer, Player as _};
use crate::store::CollectionRepository;

pub fn ingest(config: &Config, args: IngestArgs) -> anyhow::Result<()> {
    let repository = CollectionRepository::new(&config.root_dir);
    let fetcher = HttpFetcher::new(config.fetch_timeout);
    let collection = repository
        .ingest(&fetcher, &args.url, args.base.as_deref())
        .with_context(|| format!("ingest {}", args.url))?;

    println!(
        "ingested {}: {} links",
        collection.name,
        collection.links.len()
    );
    Ok(())
}

pub fn list(config: &Config) -> anyhow::Result<()> {
    let repository = CollectionRepository::new(&config.root_dir);
    let names = repository.list_collections().context("list shows")?;

    let mut stdout = std::io::stdout().lock();
    for name in names {
        writeln!(stdout, "{name}").context("write stdout")?;
    }
    Ok(())
}

pub fn show(config: &Config, args: ShowArgs) -> anyhow::Result<()> {
    let repository = CollectionRepository::new(&config.root_dir);
    let collection = repository
        .load(&args.name)
        .with_context(|| format!("load {}", args.name))?;

    let view = ShowView::from(collection);
    let text = serde_json::to_string_pretty(&view).context("serialize show")?;
    println!("{text}");
    Ok(())
}

pub fn mark(config: &Config, args: MarkArgs) -> anyhow::Result<()> {
    let repository = CollectionRepository::new(&config.root_dir);
    let mut collection = repository
        .load(&args.name)
        .with_context(|| format!("load {}", args.name))?;

    if args.index >= collection.links.len() {
        anyhow::bail!(
            "episode index {} out of range ({} links)",
            args.index,
            collection.links.len()
        );
    }
    collection
        .progress
        .insert(args.index.to_string(), !args.unwatched);
    repository
        .save_progress(&args.name, &collection.progress)
        .with_context(|| format!("save progress for {}", args.name))?;

    tracing::info!(show = %args.name, index = args.index, watched = !args.unwatched, "marked episode");
    Ok(())
}

pub fn play(config: &Config, args: PlayArgs) -> anyhow::Result<()> {
    let repository = CollectionRepository::new(&config.root_dir);
    let collection = repository
        .load(&args.name)
        .with_context(|| format!("load {}", args.name))?;

    let link = collection.links.get(args.index).ok_or_else(|| {
        anyhow::anyhow!(
            "episode index {} out of range ({} links)",
            args.index,
            collection.links.len()
        )
    })?;

    CommandPlayer::new(&config.player)
        .launch(link)
        .with_context(|| format!("play {link}"))?;
    println!("playing {link}");
    Ok(())
}
