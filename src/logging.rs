use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Default directives for the command line tool.
pub const CLI_FILTER: &str = "info";

/// Default directives for the app; request spans from `TraceLayer` are
/// emitted at debug level.
pub const APP_FILTER: &str = "info,tower_http=debug";

/// Installs the stderr subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), default_filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}

fn build_filter(from_env: Option<String>, default_filter: &str) -> anyhow::Result<EnvFilter> {
    match from_env.filter(|v| !v.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("parse {}={directives:?}", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(default_filter)
            .with_context(|| format!("parse default log filter {default_filter:?}")),
    }
}
