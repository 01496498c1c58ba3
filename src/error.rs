//! Error taxonomy for collection operations.
//!
//! Library calls return [`Result<T>`]. Binaries wrap these in `anyhow` at the
//! edges; the HTTP app maps them to status codes.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP failure while fetching a listing page.
    #[error("fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// The URL has no trailing path segment to name a collection after.
    #[error("cannot derive a collection name from {0}")]
    Naming(String),

    #[error("collection not found: {0}")]
    NotFound(String),

    /// The stored progress file is not a flat `index -> bool` object.
    ///
    /// The repository recovers from this locally; it is only surfaced by
    /// [`crate::progress::parse`].
    #[error("malformed progress file {path}: {message}")]
    MalformedProgress { path: PathBuf, message: String },

    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("link is not part of collection {collection}: {link}")]
    UnknownLink { collection: String, link: String },

    #[error("launch player {program}: {source}")]
    PlayerLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn fetch(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// True for errors caused by the caller's input rather than by I/O.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Naming(_) | Self::InvalidUrl { .. } | Self::UnknownLink { .. }
        )
    }
}
