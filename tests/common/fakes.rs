//! In-memory collaborators that record how they were called.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use akkordy::chords::{Catalog, TipGenerator};
use akkordy::core::{AppError, AppResult, CatalogCandidate, ChordPage, PageRef, RecognizedTrack};
use akkordy::identity::Translator;
use akkordy::recognition::Recognizer;

/// Catalog answering only the (artist, title) pairs it was taught.
#[derive(Default)]
pub struct FakeCatalog {
    results: HashMap<(String, String), Vec<CatalogCandidate>>,
    failing: HashSet<(String, String)>,
    pages: HashMap<PageRef, ChordPage>,
    queries: Mutex<Vec<(String, String)>>,
    fetched: Mutex<Vec<PageRef>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, artist: &str, title: &str, candidates: Vec<CatalogCandidate>) -> Self {
        self.results.insert((artist.to_string(), title.to_string()), candidates);
        self
    }

    /// Search for this pair fails with a transport error.
    pub fn with_failure(mut self, artist: &str, title: &str) -> Self {
        self.failing.insert((artist.to_string(), title.to_string()));
        self
    }

    pub fn with_page(mut self, page: &PageRef, content: ChordPage) -> Self {
        self.pages.insert(page.clone(), content);
        self
    }

    /// Searches in call order, as (artist, title).
    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn fetched(&self) -> Vec<PageRef> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, artist: &str, title: &str) -> AppResult<Vec<CatalogCandidate>> {
        let key = (artist.to_string(), title.to_string());
        self.queries.lock().unwrap().push(key.clone());

        if self.failing.contains(&key) {
            return Err(AppError::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self.results.get(&key).cloned().unwrap_or_default())
    }

    async fn fetch_page(&self, page: &PageRef) -> AppResult<Option<ChordPage>> {
        self.fetched.lock().unwrap().push(page.clone());
        Ok(self.pages.get(page).cloned())
    }
}

/// Translator with a fixed dictionary; unknown text yields no variants.
#[derive(Default)]
pub struct FakeTranslator {
    dictionary: HashMap<String, Vec<String>>,
    calls: AtomicUsize,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, variants: &[&str]) -> Self {
        self.dictionary
            .insert(text.to_string(), variants.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn variants(&self, text: &str) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.dictionary.get(text).cloned().unwrap_or_default()
    }
}

pub struct FakeTips {
    reply: Option<String>,
    sheets: Mutex<Vec<String>>,
}

impl FakeTips {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            sheets: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            sheets: Mutex::new(Vec::new()),
        }
    }

    /// Sheets the generator was asked about.
    pub fn sheets(&self) -> Vec<String> {
        self.sheets.lock().unwrap().clone()
    }
}

#[async_trait]
impl TipGenerator for FakeTips {
    async fn generate_tips(&self, sheet: &str) -> AppResult<String> {
        self.sheets.lock().unwrap().push(sheet.to_string());
        self.reply
            .clone()
            .ok_or_else(|| AppError::HttpStatus(reqwest::StatusCode::TOO_MANY_REQUESTS))
    }
}

pub enum FakeRecognizer {
    Track(RecognizedTrack),
    Nothing,
    Broken,
}

#[async_trait]
impl Recognizer for FakeRecognizer {
    async fn recognize(&self, _clip: &Path) -> AppResult<Option<RecognizedTrack>> {
        match self {
            FakeRecognizer::Track(track) => Ok(Some(track.clone())),
            FakeRecognizer::Nothing => Ok(None),
            FakeRecognizer::Broken => Err(AppError::Parse("AudD error 901: no api_token passed".to_string())),
        }
    }
}
