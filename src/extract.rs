use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::error::{Error, Result};

const VIDEO_EXTENSIONS: [&str; 4] = [".m3u8", ".mp4", ".mkv", ".avi"];

/// Scheme and authority that relative hrefs are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBase {
    pub scheme: String,
    /// Host, with `:port` when the URL carries an explicit port.
    pub host: String,
}

impl LinkBase {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    pub fn from_url(url: &Url) -> Result<Self> {
        let host = url.host_str().ok_or_else(|| Error::InvalidUrl {
            url: url.to_string(),
            message: "url must have host".to_owned(),
        })?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };
        Ok(Self::new(url.scheme(), host))
    }

    /// Resolves `href` to an absolute link, or `None` when it carries a
    /// scheme but no authority (`mailto:`, `data:`) and so cannot be played.
    fn absolutize(&self, href: &str) -> Option<String> {
        if let Some(rest) = strip_scheme(href) {
            return rest.starts_with("//").then(|| href.to_owned());
        }
        if let Some(rest) = href.strip_prefix("//") {
            return Some(format!("{}://{rest}", self.scheme));
        }
        let path = href.trim_start_matches('/');
        Some(format!("{}://{}/{path}", self.scheme, self.host))
    }
}

/// Collects playable video links from a directory listing page.
///
/// Anchors are visited in document order. Only hrefs that look like video
/// containers (or HLS playlists) are kept, every kept link is made absolute
/// against `base`, and repeated links keep their first position.
pub fn extract_links(html: &str, base: &LinkBase) -> Vec<String> {
    if html.trim().is_empty() {
        return Vec::new();
    }
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || !is_video_href(href) {
            continue;
        }

        let Some(link) = base.absolutize(href) else {
            tracing::debug!(href, "skipping link without host");
            continue;
        };
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    tracing::debug!(count = links.len(), "extracted video links");
    links
}

/// True when the href path ends in a video container extension, or when the
/// href mentions `m3u8` anywhere (query-qualified playlists).
pub fn is_video_href(href: &str) -> bool {
    if href.contains("m3u8") {
        return true;
    }
    let path = href
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Returns what follows `scheme:` when `href` starts with an RFC 3986 scheme.
fn strip_scheme(href: &str) -> Option<&str> {
    let (scheme, rest) = href.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(rest)
}
