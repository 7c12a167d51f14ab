//! Chord catalog collaborator and the amdm.ru client.
//!
//! The site has no API: search results and chord pages are plain HTML, so
//! both are scraped with `select`. The catalog rate-limits aggressive
//! clients, each request is preceded by a randomized pause and sent with a
//! browser user agent picked at random.

use async_trait::async_trait;
use rand::Rng;
use select::document::Document;
use select::predicate::{Attr, Class, Name, Predicate};
use std::time::Duration;
use url::Url;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::types::{CatalogCandidate, ChordPage, PageRef};

/// Search + page access for a chord catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search result rows in the catalog's own order.
    async fn search(&self, artist: &str, title: &str) -> AppResult<Vec<CatalogCandidate>>;

    /// The chord block of a page, `None` when the page has none.
    async fn fetch_page(&self, page: &PageRef) -> AppResult<Option<ChordPage>>;
}

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Edge/120.0.0.0",
];

fn random_user_agent() -> &'static str {
    USER_AGENTS[rand::rng().random_range(0..USER_AGENTS.len())]
}

/// Query string the site's own search box produces: `artist title`, spaces as `+`.
pub fn search_query(artist: &str, title: &str) -> String {
    urlencoding::encode(&format!("{} {}", artist, title)).replace("%20", "+")
}

/// Parses a search result page.
///
/// Rows without both an artist link and a song link are skipped. Song links
/// are resolved against `base`, the site uses protocol-relative hrefs.
pub fn parse_search_results(html: &str, base: &Url) -> Vec<CatalogCandidate> {
    let document = Document::from(html);
    let rows = Name("table")
        .and(Class("items"))
        .descendant(Name("tbody"))
        .descendant(Name("tr"));

    document
        .find(rows)
        .filter_map(|row| {
            let cell = row.find(Name("td").and(Class("artist_name"))).next()?;
            let mut links = cell.find(Name("a")).skip_while(|a| !a.is(Class("artist")));
            let artist = links.next()?;
            let song = links.next()?;
            let href = song.attr("href")?;
            let page = match base.join(href) {
                Ok(url) => PageRef::new(url.as_str()),
                Err(e) => {
                    log::debug!("Chords: skipping row with bad link '{}': {}", href, e);
                    return None;
                }
            };

            Some(CatalogCandidate {
                artist_text: artist.text().trim().to_string(),
                title_text: song.text().trim().to_string(),
                verified: cell.find(Name("span").and(Class("fa-check-circle"))).next().is_some(),
                page,
            })
        })
        .collect()
}

/// Parses a song page: the `chordsBlock` text plus the chord diagrams the
/// page declares. `None` when there is no chord block.
pub fn parse_chord_page(html: &str) -> Option<ChordPage> {
    let document = Document::from(html);
    let block = document
        .find(Name("pre").and(Attr("itemprop", "chordsBlock")))
        .next()?;

    let chords = document
        .find(Name("div").and(Class("podbor__chord")))
        .filter_map(|node| node.attr("data-chord"))
        .map(str::trim)
        .filter(|chord| !chord.is_empty())
        .map(str::to_string)
        .collect();

    Some(ChordPage {
        raw_text: block.text(),
        chords,
    })
}

/// amdm.ru scraper.
pub struct AmdmCatalog {
    client: reqwest::Client,
    base_url: Url,
    pacing: Option<(Duration, Duration)>,
}

impl AmdmCatalog {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config::network::timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            pacing: Some(config::catalog::pacing_range()),
        })
    }

    pub fn from_config() -> AppResult<Self> {
        Self::new(config::CATALOG_BASE_URL.as_str())
    }

    /// Disables the pause before requests (local mirrors, tests).
    #[must_use]
    pub fn without_pacing(mut self) -> Self {
        self.pacing = None;
        self
    }

    async fn pace(&self) {
        let Some((min, max)) = self.pacing else {
            return;
        };
        let millis = rand::rng().random_range(min.as_millis()..=max.as_millis());
        log::debug!("Chords: waiting {}ms before catalog request", millis);
        tokio::time::sleep(Duration::from_millis(millis as u64)).await;
    }

    async fn get_html(&self, url: &str) -> AppResult<String> {
        self.pace().await;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, random_user_agent())
            .header(reqwest::header::ACCEPT_LANGUAGE, "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7")
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl Catalog for AmdmCatalog {
    async fn search(&self, artist: &str, title: &str) -> AppResult<Vec<CatalogCandidate>> {
        let url = format!(
            "{}/search/?q={}",
            self.base_url.as_str().trim_end_matches('/'),
            search_query(artist, title)
        );
        log::info!("Chords: searching {}", url);

        let html = self.get_html(&url).await?;
        let candidates = parse_search_results(&html, &self.base_url);
        log::info!("Chords: {} results for '{} - {}'", candidates.len(), artist, title);
        Ok(candidates)
    }

    async fn fetch_page(&self, page: &PageRef) -> AppResult<Option<ChordPage>> {
        log::info!("Chords: opening {}", page);
        let html = self.get_html(page.as_str()).await?;
        let parsed = parse_chord_page(&html);
        if let Some(ref chord_page) = parsed {
            log::info!(
                "Chords: {} chars of text, {} declared chords",
                chord_page.raw_text.len(),
                chord_page.chords.len()
            );
        }
        Ok(parsed)
    }
}
