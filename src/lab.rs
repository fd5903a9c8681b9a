use reqwest::blocking::Client;
use tracing::info;

use crate::arxiv::ArxivClient;
use crate::config::{Credentials, Settings};
use crate::digest::{DigestEntry, ResearchDigest};
use crate::dispatch::{DispatchResult, Dispatcher};
use crate::error::Result;
use crate::gateway::image::HuggingFaceClient;
use crate::gateway::text::GeminiClient;
use crate::intent::IntentClassifier;
use crate::scrape::WebTextExtractor;
use crate::summarize::Summarizer;

pub const MAX_PAPERS: usize = 10;

/// One operator session: settings, secrets and a shared HTTP client.
///
/// Every gateway is built per call from these, so nothing reads ambient
/// state. Both entry points refuse to run without a text API key, before any
/// network call is made.
pub struct Lab {
    settings: Settings,
    credentials: Credentials,
    http: Client,
}

impl Lab {
    pub fn new(settings: Settings, credentials: Credentials) -> Result<Self> {
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self {
            settings,
            credentials,
            http,
        })
    }

    /// Routes a prompt to the text or image model.
    pub fn ask(&self, prompt: &str) -> Result<DispatchResult> {
        let text = self.text_gateway()?;
        let image = HuggingFaceClient::new(self.http.clone(), &self.settings.image.endpoint);
        let classifier = IntentClassifier::new(&self.settings.intent.image_keywords);
        let dispatcher = Dispatcher::new(classifier, text, image);
        Ok(dispatcher.handle(prompt, self.credentials.image_token()))
    }

    /// Summarizes the newest papers for `query`. `n_papers` is clamped to
    /// `1..=MAX_PAPERS`.
    pub fn research(
        &self,
        query: &str,
        n_papers: usize,
        use_scraping: bool,
    ) -> Result<Vec<DigestEntry>> {
        let text = self.text_gateway()?;
        let n_papers = n_papers.clamp(1, MAX_PAPERS);
        info!(query, n_papers, use_scraping, "starting research digest");

        let search = ArxivClient::new(self.http.clone(), &self.settings.search.endpoint);
        let fetcher = WebTextExtractor::new(self.http.clone());
        let summarizer = Summarizer::new(text).with_max_len(self.settings.summarize.max_words);
        ResearchDigest::new(search, fetcher, summarizer).digest(query, n_papers, use_scraping)
    }

    fn text_gateway(&self) -> Result<GeminiClient> {
        let api_key = self.credentials.text_api_key()?;
        Ok(GeminiClient::new(
            self.http.clone(),
            &self.settings.text.endpoint,
            &self.settings.text.model,
            api_key,
        ))
    }
}
