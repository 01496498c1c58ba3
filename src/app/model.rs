use serde::{Deserialize, Serialize};

use crate::progress::Progress;
use crate::store::Collection;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub url: String,
    #[serde(default)]
    pub base: Option<String>,
}

/// Body of `GET /load_show/:show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowView {
    pub links: Vec<String>,
    pub progress: Progress,
}

impl From<Collection> for ShowView {
    fn from(collection: Collection) -> Self {
        Self {
            links: collection.links,
            progress: collection.progress,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkDoneRequest {
    #[serde(default)]
    pub progress: Progress,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayRequest {
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
