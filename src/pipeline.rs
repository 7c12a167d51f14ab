//! One request end to end: clip → track → identity → chord sheet → tips.

use std::path::Path;
use std::sync::Arc;

use crate::chords::catalog::{AmdmCatalog, Catalog};
use crate::chords::sheet::{chords_in_order, normalize_chord_sheet};
use crate::chords::tips::{tips_or_apology, DisabledTips, MistralTips, TipGenerator};
use crate::core::error::AppResult;
use crate::core::types::{PageRef, RecognizedTrack, SongIdentity};
use crate::identity::cascade::Resolver;
use crate::identity::matcher::MatchTier;
use crate::identity::prepare::prepare_identity;
use crate::identity::translate::{GoogleTranslator, Translator};
use crate::recognition::{AuddRecognizer, DisabledRecognizer, Recognizer};

/// A cleaned chord sheet and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongChords {
    /// Spelling the catalog answered to
    pub query_artist: String,
    pub query_title: String,
    pub page: PageRef,
    pub tier: MatchTier,
    pub sheet: String,
    /// Page chords in order of appearance in the sheet
    pub chords: Vec<String>,
}

/// How a request ended. Only the first two are user-visible failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordOutcome {
    NotRecognized,
    ChordsNotFound { identity: SongIdentity },
    Found {
        identity: SongIdentity,
        chords: SongChords,
        tips: String,
    },
}

pub struct ChordFinder {
    recognizer: Arc<dyn Recognizer>,
    translator: Arc<dyn Translator>,
    resolver: Resolver,
    tips: Arc<dyn TipGenerator>,
}

impl ChordFinder {
    pub fn new(
        recognizer: Arc<dyn Recognizer>,
        catalog: Arc<dyn Catalog>,
        translator: Arc<dyn Translator>,
        tips: Arc<dyn TipGenerator>,
    ) -> Self {
        Self {
            recognizer,
            resolver: Resolver::new(catalog, translator.clone()),
            translator,
            tips,
        }
    }

    /// Real clients from the environment. Missing API keys disable
    /// recognition or tips instead of failing.
    pub fn from_config() -> AppResult<Self> {
        let recognizer: Arc<dyn Recognizer> = match AuddRecognizer::from_config() {
            Ok(recognizer) => Arc::new(recognizer),
            Err(e) => {
                log::warn!("Recognition disabled: {}", e);
                Arc::new(DisabledRecognizer)
            }
        };
        let tips: Arc<dyn TipGenerator> = match MistralTips::from_config() {
            Ok(tips) => Arc::new(tips),
            Err(e) => {
                log::warn!("Tips disabled: {}", e);
                Arc::new(DisabledTips)
            }
        };

        Ok(Self::new(
            recognizer,
            Arc::new(AmdmCatalog::from_config()?),
            Arc::new(GoogleTranslator::from_config()?),
            tips,
        ))
    }

    /// Swaps the tip generator.
    #[must_use]
    pub fn with_tips(mut self, tips: Arc<dyn TipGenerator>) -> Self {
        self.tips = tips;
        self
    }

    /// Recognizer transport failures count as a miss.
    pub async fn recognize(&self, clip: &Path) -> Option<RecognizedTrack> {
        match self.recognizer.recognize(clip).await {
            Ok(track) => track,
            Err(e) => {
                log::warn!("Recognize: failed for {}: {}", clip.display(), e);
                None
            }
        }
    }

    pub async fn find_for_clip(&self, clip: &Path) -> ChordOutcome {
        match self.recognize(clip).await {
            Some(track) => self.find_for_track(&track).await,
            None => ChordOutcome::NotRecognized,
        }
    }

    /// The identity the lookup starts from: alias table, ISRC policy and
    /// the romanized-artist substitution applied.
    pub async fn prepare(&self, track: &RecognizedTrack) -> SongIdentity {
        prepare_identity(track, self.translator.as_ref()).await
    }

    pub async fn find_for_track(&self, track: &RecognizedTrack) -> ChordOutcome {
        let identity = self.prepare(track).await;
        self.find_for_identity(identity).await
    }

    pub async fn find_for_identity(&self, identity: SongIdentity) -> ChordOutcome {
        log::info!("Chords: looking up '{}'", identity);

        let Some(resolved) = self.resolver.resolve(&identity).await else {
            log::info!("Chords: not found for '{}'", identity);
            return ChordOutcome::ChordsNotFound { identity };
        };

        let sheet = normalize_chord_sheet(&resolved.page.raw_text, &resolved.page.chords);
        let chords = chords_in_order(&sheet, &resolved.page.chords);
        if resolved.page.chords.is_empty() {
            log::info!("Chords: {} declares no chords, sheet kept as text", resolved.page_ref);
        }

        let tips = tips_or_apology(self.tips.as_ref(), &sheet).await;

        ChordOutcome::Found {
            identity,
            chords: SongChords {
                query_artist: resolved.artist,
                query_title: resolved.title,
                page: resolved.page_ref,
                tier: resolved.tier,
                sheet,
                chords,
            },
            tips,
        }
    }
}
