use std::sync::LazyLock;
use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{Error, Result};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector parses"));

/// Fetches a page and returns its readable text.
pub trait PageFetcher {
    fn fetch_text(&self, url: &str) -> Result<String>;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch_text(&self, url: &str) -> Result<String> {
        (**self).fetch_text(url)
    }
}

#[derive(Clone)]
pub struct WebTextExtractor {
    http: Client,
}

impl WebTextExtractor {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl PageFetcher for WebTextExtractor {
    fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let response = self.http.get(url).timeout(FETCH_TIMEOUT).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(paragraph_text(&body))
    }
}

/// Text content of every `<p>` element, in document order, joined by single
/// spaces.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&PARAGRAPH)
        .map(|paragraph| paragraph.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
