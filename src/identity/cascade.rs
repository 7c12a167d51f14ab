//! Cross-script resolution cascade.
//!
//! Recognizers romanize Russian artists, the chord catalog indexes them in
//! Cyrillic. For one identity we build an ordered plan of (title, artist)
//! spellings to query: verbatim, translated, transliterated, and walk it
//! one step at a time until a catalog page with chords comes back. Steps run
//! strictly in sequence: each one costs a catalog browse and maybe a
//! translation call, and is only needed when everything before it failed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::chords::catalog::Catalog;
use crate::core::types::{ChordPage, PageRef, SongIdentity};
use crate::identity::matcher::{self, MatchTier};
use crate::identity::prepare::locked_to_recognized_pair;
use crate::identity::script;
use crate::identity::translate::{first_variant, Translator};
use crate::identity::translit::{convert_to_russian, reapply_case};

static PARENTHESES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parentheses regex is valid"));

/// Which spelling of a field a step queries with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// The identity's current value (possibly an alias substitution)
    Current,
    /// The recognizer's value
    Original,
    /// First translation variant of the recognizer's value
    Translated,
    /// Reverse transliteration of the recognizer's value
    Transliterated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub label: &'static str,
    pub title: Term,
    pub artist: Term,
    /// Wrap the attempt in the parenthetical-qualifier retry
    pub strip_parentheses: bool,
}

impl Step {
    const fn new(label: &'static str, title: Term, artist: Term) -> Self {
        Self {
            label,
            title,
            artist,
            strip_parentheses: true,
        }
    }
}

const DIRECT: Step = Step {
    label: "direct",
    title: Term::Current,
    artist: Term::Current,
    strip_parentheses: false,
};

/// The ordered attempts for `identity`. The direct search always comes first.
pub fn plan(identity: &SongIdentity) -> Vec<Step> {
    use Term::*;

    let mut steps = vec![DIRECT];

    if locked_to_recognized_pair(identity) {
        steps.push(Step::new("recognized pair", Original, Original));
        return steps;
    }

    if identity.artist_overwritten() {
        steps.extend([
            Step::new("fixed artist, original title", Original, Current),
            Step::new("fixed artist, transliterated title", Transliterated, Current),
            Step::new("fixed artist, translated title", Translated, Current),
        ]);
        return steps;
    }

    let signal = script::classify(&identity.artist);
    log::info!("Resolve: '{}' translit={}", identity.artist, signal.is_translit);

    // only reached when preparation found no Cyrillic spelling for the artist
    if signal.is_translit {
        steps.extend([
            Step::new("translated artist", Original, Translated),
            Step::new("transliterated artist", Original, Transliterated),
            Step::new("transliterated artist, translated title", Translated, Transliterated),
            Step::new("transliterated artist and title", Transliterated, Transliterated),
        ]);
    } else {
        steps.extend([
            Step::new("recognized pair", Original, Original),
            Step::new("translated artist and title", Translated, Translated),
            Step::new("transliterated artist", Original, Transliterated),
        ]);
    }

    steps
}

/// Removes every `(...)` segment. `None` when there was nothing to remove or
/// nothing would be left.
pub fn strip_parentheses(text: &str) -> Option<String> {
    if !PARENTHESES_RE.is_match(text) {
        return None;
    }
    let stripped = PARENTHESES_RE.replace_all(text, "");
    let stripped = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

/// A catalog page the cascade settled on, and the spelling that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChords {
    pub title: String,
    pub artist: String,
    pub tier: MatchTier,
    pub page_ref: PageRef,
    pub page: ChordPage,
}

/// Drives the plan against a catalog and a translator.
pub struct Resolver {
    catalog: Arc<dyn Catalog>,
    translator: Arc<dyn Translator>,
}

impl Resolver {
    pub fn new(catalog: Arc<dyn Catalog>, translator: Arc<dyn Translator>) -> Self {
        Self { catalog, translator }
    }

    /// Walks the plan for `identity`; `None` means chords are unavailable,
    /// which is an outcome, not an error.
    pub async fn resolve(&self, identity: &SongIdentity) -> Option<ResolvedChords> {
        let mut session = Session::new(self, identity);

        for step in plan(identity) {
            let Some(artist) = session.artist(step.artist).await else {
                log::debug!("Resolve: skip '{}', no artist spelling", step.label);
                continue;
            };
            let Some(title) = session.title(step.title).await else {
                log::debug!("Resolve: skip '{}', no title spelling", step.label);
                continue;
            };

            log::info!("Resolve: step '{}' → '{} - {}'", step.label, artist, title);
            let found = if step.strip_parentheses {
                session.attempt_with_parentheses_retry(&title, &artist).await
            } else {
                session.attempt(&title, &artist).await
            };

            if let Some(resolved) = found {
                log::info!(
                    "Resolve: found '{} - {}' ({} match) via '{}'",
                    resolved.artist,
                    resolved.title,
                    resolved.tier,
                    step.label
                );
                return Some(resolved);
            }
        }

        log::info!("Resolve: exhausted all steps for '{}'", identity);
        None
    }
}

/// Per-request state: translation results and the pairs already queried.
struct Session<'r> {
    resolver: &'r Resolver,
    identity: &'r SongIdentity,
    translated_title: Option<Option<String>>,
    translated_artist: Option<Option<String>>,
    tried: HashSet<(String, String)>,
}

impl<'r> Session<'r> {
    fn new(resolver: &'r Resolver, identity: &'r SongIdentity) -> Self {
        Self {
            resolver,
            identity,
            translated_title: None,
            translated_artist: None,
            tried: HashSet::new(),
        }
    }

    async fn title(&mut self, term: Term) -> Option<String> {
        let original = self.identity.original_title();
        match term {
            Term::Current => Some(self.identity.title.clone()),
            Term::Original => Some(original.to_string()),
            Term::Transliterated => transliterated(original),
            Term::Translated => {
                if self.translated_title.is_none() {
                    let translated = first_variant(self.resolver.translator.as_ref(), original).await;
                    self.translated_title = Some(translated);
                }
                self.translated_title.clone().flatten()
            }
        }
    }

    async fn artist(&mut self, term: Term) -> Option<String> {
        let original = self.identity.original_artist();
        match term {
            Term::Current => Some(self.identity.artist.clone()),
            Term::Original => Some(original.to_string()),
            Term::Transliterated => transliterated(original).map(|converted| reapply_case(original, &converted)),
            Term::Translated => {
                if self.translated_artist.is_none() {
                    // an echoed artist would only repeat the recognized pair
                    let translated = first_variant(self.resolver.translator.as_ref(), original)
                        .await
                        .filter(|variant| variant.to_lowercase() != original.to_lowercase());
                    self.translated_artist = Some(translated);
                }
                self.translated_artist.clone().flatten()
            }
        }
    }

    /// Tries the pair as is, then once more with parenthetical qualifiers
    /// removed from whichever fields had them.
    async fn attempt_with_parentheses_retry(&mut self, title: &str, artist: &str) -> Option<ResolvedChords> {
        if let Some(found) = self.attempt(title, artist).await {
            return Some(found);
        }

        let stripped_title = strip_parentheses(title);
        let stripped_artist = strip_parentheses(artist);
        if stripped_title.is_none() && stripped_artist.is_none() {
            return None;
        }

        let title = stripped_title.as_deref().unwrap_or(title);
        let artist = stripped_artist.as_deref().unwrap_or(artist);
        log::info!("Resolve: retrying without parentheses '{} - {}'", artist, title);
        self.attempt(title, artist).await
    }

    /// One catalog search + page fetch. Collaborator failures end the attempt.
    async fn attempt(&mut self, title: &str, artist: &str) -> Option<ResolvedChords> {
        if !self.tried.insert((title.to_string(), artist.to_string())) {
            log::debug!("Resolve: '{} - {}' already tried", artist, title);
            return None;
        }

        let catalog = self.resolver.catalog.as_ref();
        let candidates = match catalog.search(artist, title).await {
            Ok(candidates) => candidates,
            Err(e) => {
                log::warn!("Resolve: search failed for '{} - {}': {}", artist, title, e);
                return None;
            }
        };

        let Some(picked) = matcher::pick(artist, title, &candidates) else {
            log::info!("Resolve: no search results for '{} - {}'", artist, title);
            return None;
        };
        log::info!(
            "Resolve: picked '{} - {}' ({} match) from {} results",
            picked.candidate.artist_text,
            picked.candidate.title_text,
            picked.tier,
            candidates.len()
        );

        let page_ref = picked.candidate.page.clone();
        match catalog.fetch_page(&page_ref).await {
            Ok(Some(page)) => Some(ResolvedChords {
                title: title.to_string(),
                artist: artist.to_string(),
                tier: picked.tier,
                page_ref,
                page,
            }),
            Ok(None) => {
                log::warn!("Resolve: no chords block on {}", page_ref);
                None
            }
            Err(e) => {
                log::warn!("Resolve: fetching {} failed: {}", page_ref, e);
                None
            }
        }
    }
}

/// Transliteration, or `None` when it would not change anything.
fn transliterated(original: &str) -> Option<String> {
    let converted = convert_to_russian(original);
    (converted != original.to_lowercase()).then_some(converted)
}
