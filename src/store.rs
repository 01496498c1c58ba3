//! On-disk collections.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<identifier>/extracted_links.txt   one absolute URL per line
//! <root>/<identifier>/data.json             {"0": true, "1": false, ...}
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};
use crate::extract::{LinkBase, extract_links};
use crate::fetch::PageFetcher;
use crate::naming::{is_valid_identifier, name_for};
use crate::progress::{self, Progress};

pub const LINKS_FILE: &str = "extracted_links.txt";
pub const PROGRESS_FILE: &str = "data.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub name: String,
    pub links: Vec<String>,
    pub progress: Progress,
}

#[derive(Debug, Clone)]
pub struct CollectionRepository {
    root: PathBuf,
}

impl CollectionRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn links_path(&self, name: &str) -> PathBuf {
        self.collection_dir(name).join(LINKS_FILE)
    }

    fn progress_path(&self, name: &str) -> PathBuf {
        self.collection_dir(name).join(PROGRESS_FILE)
    }

    /// Fetches `url`, extracts its video links and stores them under the
    /// collection named after the URL.
    ///
    /// `base` overrides the scheme and host used to absolutize relative links;
    /// by default the page's own are used. The previous link list is replaced
    /// unconditionally and stored progress is left as it is, so flags stay tied
    /// to episode positions even if the listing order changed.
    pub fn ingest(
        &self,
        fetcher: &dyn PageFetcher,
        url: &str,
        base: Option<&str>,
    ) -> Result<Collection> {
        let name = name_for(url)?;
        let page_url = parse_url(url)?;
        let base = match base {
            Some(base) => LinkBase::from_url(&parse_url(base)?)?,
            None => LinkBase::from_url(&page_url)?,
        };

        let html = fetcher.fetch(&page_url)?;
        let links = extract_links(&html, &base);
        if links.is_empty() {
            tracing::warn!(%page_url, collection = %name, "no video links found on page");
        }

        let dir = self.collection_dir(&name);
        std::fs::create_dir_all(&dir).map_err(|err| Error::io("create collection dir", &dir, err))?;

        write_links(&self.links_path(&name), &links)?;
        let stored = progress::read(&self.progress_path(&name))?;

        tracing::info!(collection = %name, links = links.len(), "ingested collection");
        let progress = progress::reconcile(links.len(), stored);
        Ok(Collection {
            name,
            links,
            progress,
        })
    }

    /// Names of every collection with a stored link list, sorted.
    pub fn list_collections(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::io("list collections", &self.root, err)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| Error::io("list collections", &self.root, err))?;
            if !entry.path().join(LINKS_FILE).is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the stored links with progress reconciled against them.
    pub fn load(&self, name: &str) -> Result<Collection> {
        let links_path = self.existing_links_path(name)?;
        let links = read_links(&links_path)?.ok_or_else(|| Error::NotFound(name.to_owned()))?;
        let stored = progress::read(&self.progress_path(name))?;

        Ok(Collection {
            name: name.to_owned(),
            progress: progress::reconcile(links.len(), stored),
            links,
        })
    }

    /// Replaces the collection's stored progress with exactly `progress`.
    pub fn save_progress(&self, name: &str, progress: &Progress) -> Result<()> {
        self.existing_links_path(name)?;
        progress::replace(&self.progress_path(name), progress)?;
        tracing::debug!(collection = %name, entries = progress.len(), "saved progress");
        Ok(())
    }

    fn existing_links_path(&self, name: &str) -> Result<PathBuf> {
        if !is_valid_identifier(name) {
            return Err(Error::NotFound(name.to_owned()));
        }
        let path = self.links_path(name);
        if !path.is_file() {
            return Err(Error::NotFound(name.to_owned()));
        }
        Ok(path)
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|err| Error::InvalidUrl {
        url: raw.to_owned(),
        message: err.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::InvalidUrl {
            url: raw.to_owned(),
            message: "url must be http/https".to_owned(),
        });
    }
    Ok(url)
}

fn read_links(path: &Path) -> Result<Option<Vec<String>>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(Error::io("read links", path, err)),
    };
    Ok(Some(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect(),
    ))
}

fn write_links(path: &Path, links: &[String]) -> Result<()> {
    let mut data = String::new();
    for link in links {
        data.push_str(link);
        data.push('\n');
    }
    write_atomic(path, data.as_bytes())
}

/// Writes through a temporary sibling file and renames it into place.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension(format!("tmp.{}", uuid::Uuid::new_v4().simple()));
    std::fs::write(&tmp_path, data).map_err(|err| Error::io("write", &tmp_path, err))?;
    std::fs::rename(&tmp_path, path).map_err(|err| Error::io("rename", path, err))?;
    Ok(())
}
