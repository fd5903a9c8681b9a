use chrono::NaiveDate;
use tracing::{info, warn};

use crate::arxiv::{Paper, PaperSearch};
use crate::error::Result;
use crate::gateway::text::TextGateway;
use crate::scrape::PageFetcher;
use crate::summarize::Summarizer;

/// One summarized paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub published: Option<NaiveDate>,
    /// Chunks whose summary call failed; their error text went into `summary`.
    pub failed_chunks: Vec<usize>,
    /// The final combine call failed, so `summary` is its error text.
    pub combine_failed: bool,
}

impl DigestEntry {
    pub fn is_partial(&self) -> bool {
        self.combine_failed || !self.failed_chunks.is_empty()
    }
}

/// Search, optionally scrape, then summarize each paper in search order.
pub struct ResearchDigest<S, F, T> {
    search: S,
    fetcher: F,
    summarizer: Summarizer<T>,
}

impl<S, F, T> ResearchDigest<S, F, T>
where
    S: PaperSearch,
    F: PageFetcher,
    T: TextGateway,
{
    pub fn new(search: S, fetcher: F, summarizer: Summarizer<T>) -> Self {
        Self {
            search,
            fetcher,
            summarizer,
        }
    }

    /// Only a failed search is an error. Per-paper failures end up in that
    /// paper's summary and the remaining papers are still processed.
    pub fn digest(
        &self,
        query: &str,
        n_papers: usize,
        use_scraping: bool,
    ) -> Result<Vec<DigestEntry>> {
        let papers = self.search.search(query, n_papers)?;
        info!(query, papers = papers.len(), use_scraping, "building digest");

        let mut entries = Vec::with_capacity(papers.len().min(n_papers));
        for paper in papers.into_iter().take(n_papers) {
            entries.push(self.summarize_paper(paper, use_scraping));
        }
        Ok(entries)
    }

    fn summarize_paper(&self, paper: Paper, use_scraping: bool) -> DigestEntry {
        info!(title = %paper.title, url = %paper.url, "summarizing paper");
        let source = if use_scraping {
            self.scraped_text(&paper.url)
        } else {
            paper.summary.clone()
        };
        let summary = self.summarizer.summarize_long(&source);
        if summary.is_partial() {
            warn!(
                title = %paper.title,
                failed_chunks = ?summary.failed_chunks,
                combine_failed = summary.combine_failed,
                "summary is partial"
            );
        }
        DigestEntry {
            title: paper.title,
            summary: summary.text,
            url: paper.url,
            published: paper.published,
            failed_chunks: summary.failed_chunks,
            combine_failed: summary.combine_failed,
        }
    }

    fn scraped_text(&self, url: &str) -> String {
        match self.fetcher.fetch_text(url) {
            Ok(text) => text,
            Err(err) => {
                warn!(url, error = %err, "scraping failed");
                format!("Error scraping {url}: {err}")
            }
        }
    }
}
