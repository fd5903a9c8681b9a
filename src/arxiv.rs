use chrono::NaiveDate;
use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_ARXIV_ENDPOINT: &str = "http://export.arxiv.org/api/query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    pub title: String,
    /// The abstract.
    pub summary: String,
    pub url: String,
    pub published: Option<NaiveDate>,
}

/// Finds papers for a topic, newest submissions first.
pub trait PaperSearch {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>>;
}

impl<T: PaperSearch + ?Sized> PaperSearch for &T {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>> {
        (**self).search(query, max_results)
    }
}

/// arXiv export API client. Results come back as an Atom feed.
#[derive(Clone)]
pub struct ArxivClient {
    http: Client,
    endpoint: String,
}

impl ArxivClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

impl PaperSearch for ArxivClient {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>> {
        info!(query, max_results, "searching arXiv");
        let max_results_param = max_results.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("search_query", query),
                ("start", "0"),
                ("max_results", max_results_param.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: response.text()?,
            });
        }
        let bytes = response.bytes()?;
        let mut papers = parse_feed(&bytes)?;
        papers.truncate(max_results);
        debug!(found = papers.len(), "parsed arXiv feed");
        Ok(papers)
    }
}

/// Maps feed entries to papers in feed order. Entries without any usable
/// identifier are skipped.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<Paper>> {
    let feed = parser::parse(bytes)?;
    let mut papers = Vec::new();
    for entry in feed.entries {
        let Some(url) = entry_url(&entry) else {
            continue;
        };
        let title = entry
            .title
            .as_ref()
            .map(|text| collapse_whitespace(&text.content))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());
        let summary = entry
            .summary
            .as_ref()
            .map(|text| text.content.clone())
            .or_else(|| entry.content.as_ref().and_then(|content| content.body.clone()))
            .map(|text| collapse_whitespace(&text))
            .unwrap_or_default();
        let published = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.date_naive());
        papers.push(Paper {
            title,
            summary,
            url,
            published,
        });
    }
    Ok(papers)
}

// arXiv ids are the abstract page URL
fn entry_url(entry: &Entry) -> Option<String> {
    if entry.id.starts_with("http") {
        return Some(entry.id.clone());
    }
    entry
        .links
        .iter()
        .map(|link| link.href.clone())
        .find(|href| !href.trim().is_empty())
        .or_else(|| {
            if entry.id.trim().is_empty() {
                None
            } else {
                Some(entry.id.clone())
            }
        })
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
