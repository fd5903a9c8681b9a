#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io::Cursor;

use agents_lab::{Error, GeneratedImage, ImageGateway, PageFetcher, Paper, PaperSearch, Result, TextGateway};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn png_1x1() -> Vec<u8> {
    let img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Text gateway that records every prompt and answers through a closure
/// given the prompt and the zero-based call index.
pub struct ScriptedText {
    prompts: RefCell<Vec<String>>,
    respond: Box<dyn Fn(&str, usize) -> Result<String>>,
}

impl ScriptedText {
    pub fn new(respond: impl Fn(&str, usize) -> Result<String> + 'static) -> Self {
        Self {
            prompts: RefCell::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Replies `reply-<n>` to the n-th call.
    pub fn numbered() -> Self {
        Self::new(|_, idx| Ok(format!("reply-{idx}")))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl TextGateway for ScriptedText {
    fn generate_text(&self, prompt: &str) -> Result<String> {
        let idx = self.prompts.borrow().len();
        self.prompts.borrow_mut().push(prompt.to_string());
        (self.respond)(prompt, idx)
    }
}

/// Image gateway returning a fixed PNG, or failing without a credential.
#[derive(Default)]
pub struct StubImage {
    calls: Cell<usize>,
    last_credential: RefCell<Option<String>>,
}

impl StubImage {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_credential(&self) -> Option<String> {
        self.last_credential.borrow().clone()
    }
}

impl ImageGateway for StubImage {
    fn generate_image(&self, _prompt: &str, credential: &str) -> Result<GeneratedImage> {
        self.calls.set(self.calls.get() + 1);
        *self.last_credential.borrow_mut() = Some(credential.to_string());
        if credential.is_empty() {
            return Err(Error::missing_image_token());
        }
        GeneratedImage::decode(png_1x1())
    }
}

pub struct StubSearch {
    papers: Vec<Paper>,
    requests: RefCell<Vec<(String, usize)>>,
}

impl StubSearch {
    pub fn new(papers: Vec<Paper>) -> Self {
        Self {
            papers,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, usize)> {
        self.requests.borrow().clone()
    }
}

impl PaperSearch for StubSearch {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>> {
        self.requests
            .borrow_mut()
            .push((query.to_string(), max_results));
        Ok(self.papers.clone())
    }
}

pub struct FailingSearch;

impl PaperSearch for FailingSearch {
    fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<Paper>> {
        Err(Error::Status {
            status: 503,
            body: "arXiv unavailable".to_string(),
        })
    }
}

/// Page fetcher serving `page text for <url>`, failing for URLs containing
/// `broken`.
#[derive(Default)]
pub struct StubFetcher {
    fetched: RefCell<Vec<String>>,
}

impl StubFetcher {
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl PageFetcher for StubFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.fetched.borrow_mut().push(url.to_string());
        if url.contains("broken") {
            return Err(Error::Status {
                status: 404,
                body: "not found".to_string(),
            });
        }
        Ok(format!("page text for {url}"))
    }
}

pub fn paper(id: &str, summary: &str) -> Paper {
    Paper {
        title: format!("Paper {id}"),
        summary: summary.to_string(),
        url: format!("http://arxiv.org/abs/{id}"),
        published: None,
    }
}
