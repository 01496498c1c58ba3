use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::response::Html;
use clap::Parser;
use tower_http::services::{ServeDir, ServeFile};

use showshelf::app::{AppState, router};
use showshelf::config::Config;
use showshelf::fetch::HttpFetcher;
use showshelf::player::CommandPlayer;
use showshelf::store::CollectionRepository;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:5000")]
    addr: SocketAddr,

    /// Directory holding one folder per show (default: $SHOWSHELF_ROOT or `shows`).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Player program (default: $SHOWSHELF_PLAYER or `vlc`).
    #[arg(long)]
    player: Option<PathBuf>,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Static web assets directory (serve if exists).
    #[arg(long, default_value = "web")]
    web_dir: PathBuf,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    showshelf::logging::init(showshelf::logging::APP_FILTER)?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting showshelf-app");

    let config = Config::resolve(args.root, args.player, args.timeout_secs);
    tracing::info!(root = %config.root_dir.display(), player = %config.player.display(), "resolved config");

    let state = AppState::new(
        CollectionRepository::new(&config.root_dir),
        Arc::new(HttpFetcher::new(config.fetch_timeout)),
        Arc::new(CommandPlayer::new(&config.player)),
    );

    let mut app = router(state);

    let web_index = args.web_dir.join("index.html");
    if web_index.exists() {
        let static_files = ServeDir::new(args.web_dir).not_found_service(ServeFile::new(web_index));
        app = app.fallback_service(static_files);
    } else {
        app = app.fallback(|| async {
            Html(
                r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>showshelf</title></head>
  <body>
    <h1>showshelf</h1>
    <p>web assets not found. Put an <code>index.html</code> into <code>web</code> or pass <code>--web-dir</code>.</p>
  </body>
</html>
"#,
            )
        });
    }

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
