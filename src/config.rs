use std::path::PathBuf;
use std::time::Duration;

pub const ROOT_ENV: &str = "SHOWSHELF_ROOT";
pub const PLAYER_ENV: &str = "SHOWSHELF_PLAYER";

const DEFAULT_ROOT: &str = "shows";
const DEFAULT_PLAYER: &str = "vlc";

/// Settings shared by the CLI and the app.
///
/// Flags win over environment variables, which win over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root_dir: PathBuf,
    pub player: PathBuf,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn resolve(root: Option<PathBuf>, player: Option<PathBuf>, timeout_secs: u64) -> Self {
        Self::resolve_with(root, player, timeout_secs, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        root: Option<PathBuf>,
        player: Option<PathBuf>,
        timeout_secs: u64,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let from_env = |key: &str| {
            env(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        Self {
            root_dir: root
                .or_else(|| from_env(ROOT_ENV))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
            player: player
                .or_else(|| from_env(PLAYER_ENV))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAYER)),
            fetch_timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_win_over_env() {
        let config = Config::resolve_with(
            Some(PathBuf::from("/srv/shows")),
            None,
            30,
            |key| (key == ROOT_ENV).then(|| "/env/shows".to_string()),
        );
        assert_eq!(config.root_dir, PathBuf::from("/srv/shows"));
        assert_eq!(config.player, PathBuf::from("vlc"));
    }

    #[test]
    fn env_fills_missing_flags() {
        let config = Config::resolve_with(None, None, 0, |key| match key {
            ROOT_ENV => Some(" /env/shows ".to_string()),
            PLAYER_ENV => Some("mpv".to_string()),
            _ => None,
        });
        assert_eq!(config.root_dir, PathBuf::from("/env/shows"));
        assert_eq!(config.player, PathBuf::from("mpv"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(1));
    }

    #[test]
    fn blank_env_falls_back_to_defaults() {
        let config = Config::resolve_with(None, None, 30, |_| Some("  ".to_string()));
        assert_eq!(config.root_dir, PathBuf::from("shows"));
    }
}
