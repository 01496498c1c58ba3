use url::Url;

use crate::error::{Error, Result};

const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Derives the collection identifier for a listing URL.
///
/// The last non-empty path segment (after percent-decoding) becomes the name,
/// with file-system reserved characters replaced by `-`.
pub fn name_for(url: &str) -> Result<String> {
    let parsed = Url::parse(url.trim()).map_err(|err| Error::InvalidUrl {
        url: url.to_owned(),
        message: err.to_string(),
    })?;

    let decoded = urlencoding::decode_binary(parsed.path().as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);
    let trimmed = decoded.strip_suffix('/').unwrap_or(&decoded);
    let raw = trimmed.rsplit('/').next().unwrap_or_default();

    let name = sanitize(raw);
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::Naming(url.to_owned()));
    }
    Ok(name)
}

/// Replaces reserved characters with `-` and trims surrounding whitespace.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if RESERVED.contains(&c) { '-' } else { c })
        .collect::<String>()
        .trim()
        .to_owned()
}

/// True when `name` can be used as a directory directly under the root.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name == name.trim()
        && !name.contains(RESERVED)
}
