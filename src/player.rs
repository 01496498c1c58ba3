use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Starts playback of a single link.
///
/// Launch is fire-and-forget: success means the process started, nothing is
/// tracked afterwards.
pub trait Player: Send + Sync {
    fn launch(&self, link: &str) -> Result<()>;
}

/// Runs an external player program with the link as its last argument.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

impl Player for CommandPlayer {
    fn launch(&self, link: &str) -> Result<()> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(link)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::PlayerLaunch {
                program: self.program.display().to_string(),
                source,
            })?;
        tracing::info!(pid = child.id(), link, "player started");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_reports_launch_error() {
        let player = CommandPlayer::new("/nonexistent/showshelf-player");
        let err = player.launch("http://h/ep1.mp4").unwrap_err();
        assert!(matches!(err, Error::PlayerLaunch { .. }));
        assert!(err.to_string().contains("showshelf-player"));
    }

    #[cfg(unix)]
    #[test]
    fn launches_without_waiting() {
        let player = CommandPlayer::new("true");
        player.launch("http://h/ep1.mp4").unwrap();
    }
}
