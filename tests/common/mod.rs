#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use showshelf::error::{Error, Result};
use showshelf::fetch::PageFetcher;
use showshelf::player::Player;
use url::Url;

/// Serves canned listing pages keyed by URL.
#[derive(Default)]
pub struct StubFetcher {
    pages: Mutex<HashMap<String, String>>,
}

impl StubFetcher {
    pub fn with_page(url: &str, html: &str) -> Self {
        let fetcher = Self::default();
        fetcher.set_page(url, html);
        fetcher
    }

    pub fn set_page(&self, url: &str, html: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), html.to_string());
    }
}

impl PageFetcher for StubFetcher {
    fn fetch(&self, url: &Url) -> Result<String> {
        self.pages
            .lock()
            .unwrap()
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| Error::Fetch {
                url: url.to_string(),
                message: "http status 404 Not Found".to_string(),
            })
    }
}

/// Records launched links instead of starting a process.
#[derive(Default)]
pub struct RecordingPlayer {
    pub launched: Mutex<Vec<String>>,
}

impl Player for RecordingPlayer {
    fn launch(&self, link: &str) -> Result<()> {
        self.launched.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

pub fn listing(files: &[&str]) -> String {
    let mut html = String::from(
        "<!doctype html>\n<html><body>\n<a href=\"../\">Parent Directory</a>\n",
    );
    for file in files {
        html.push_str(&format!("<a href=\"{file}\">{file}</a>\n"));
    }
    html.push_str("</body></html>\n");
    html
}
