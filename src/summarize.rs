use tracing::{debug, warn};

use crate::chunk::{chunk_text, DEFAULT_CHUNK_WORDS};
use crate::error::Result;
use crate::gateway::text::{failure_text, TextGateway};

pub const SUMMARIZE_PROMPT: &str = "You are a helpful research assistant. Summarize this text:";
pub const COMBINE_PROMPT: &str = "Combine and simplify the following summaries:";

/// Outcome of [`Summarizer::summarize_long`].
///
/// A failed call contributes its error text in place of a summary, so `text`
/// may contain it. The failure positions are kept so callers can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongSummary {
    pub text: String,
    pub chunk_count: usize,
    pub failed_chunks: Vec<usize>,
    pub combine_failed: bool,
}

impl LongSummary {
    pub fn is_partial(&self) -> bool {
        self.combine_failed || !self.failed_chunks.is_empty()
    }
}

/// Map-reduce summarizer: one call per chunk, then one call that merges the
/// chunk summaries.
pub struct Summarizer<G> {
    gateway: G,
    max_len: usize,
}

impl<G: TextGateway> Summarizer<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            max_len: DEFAULT_CHUNK_WORDS,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len.max(1);
        self
    }

    pub fn summarize_chunk(&self, text: &str) -> Result<String> {
        self.gateway
            .generate_text(&format!("{SUMMARIZE_PROMPT}\n{text}"))
    }

    /// Summarizes each chunk in order, then combines them. A text with `k`
    /// chunks costs `k + 1` calls.
    pub fn summarize_long(&self, text: &str) -> LongSummary {
        let chunks: Vec<String> = chunk_text(text, self.max_len).into_iter().collect();
        debug!(chunks = chunks.len(), max_len = self.max_len, "summarizing text");

        let mut summaries = Vec::with_capacity(chunks.len());
        let mut failed_chunks = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            match self.summarize_chunk(chunk) {
                Ok(summary) => summaries.push(summary),
                Err(err) => {
                    warn!(chunk = idx, error = %err, "chunk summary failed");
                    failed_chunks.push(idx);
                    summaries.push(failure_text(&err));
                }
            }
        }

        let combined = summaries.join(" ");
        let final_prompt = format!("{COMBINE_PROMPT}\n{combined}");
        let (text, combine_failed) = match self.gateway.generate_text(&final_prompt) {
            Ok(text) => (text, false),
            Err(err) => {
                warn!(error = %err, "combine call failed");
                (failure_text(&err), true)
            }
        };

        LongSummary {
            text,
            chunk_count: chunks.len(),
            failed_chunks,
            combine_failed,
        }
    }
}
