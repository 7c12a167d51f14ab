use std::fmt;

/// What the recognition service reported for a clip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecognizedTrack {
    pub title: String,
    pub artist: String,
    pub isrc: Option<String>,
    pub album: Option<String>,
}

/// The song we are looking chords up for.
///
/// `title`/`artist` are the spellings currently used for catalog queries and
/// may be replaced (alias table, translation, transliteration). The
/// `original_*` pair is whatever the recognizer said and cannot be changed
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongIdentity {
    pub title: String,
    pub artist: String,
    original_title: String,
    original_artist: String,
    pub album: Option<String>,
    /// Two-letter ISRC country prefix, upper-case
    pub region_code: Option<String>,
}

impl SongIdentity {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        let title = title.into();
        let artist = artist.into();
        Self {
            original_title: title.clone(),
            original_artist: artist.clone(),
            title,
            artist,
            album: None,
            region_code: None,
        }
    }

    pub fn from_track(track: &RecognizedTrack) -> Self {
        let mut identity = Self::new(track.title.clone(), track.artist.clone());
        identity.album = track.album.clone().filter(|a| !a.trim().is_empty());
        identity.region_code = track.isrc.as_deref().and_then(region_code_from_isrc);
        identity
    }

    #[must_use]
    pub fn with_region_code(mut self, code: impl Into<String>) -> Self {
        self.region_code = Some(code.into().to_uppercase());
        self
    }

    pub fn original_title(&self) -> &str {
        &self.original_title
    }

    pub fn original_artist(&self) -> &str {
        &self.original_artist
    }

    /// True once something replaced the recognizer's artist spelling.
    pub fn artist_overwritten(&self) -> bool {
        self.artist != self.original_artist
    }
}

impl fmt::Display for SongIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// ISRC codes start with the registrant's ISO country code (`RUA1D1900001` → `RU`).
pub fn region_code_from_isrc(isrc: &str) -> Option<String> {
    let prefix: String = isrc.trim().chars().take(2).collect();
    if prefix.len() == 2 && prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(prefix.to_ascii_uppercase())
    } else {
        None
    }
}

/// Opaque handle to a catalog page (its absolute URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRef(String);

impl PageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of a catalog search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCandidate {
    pub artist_text: String,
    pub title_text: String,
    /// Editorially confirmed by the catalog
    pub verified: bool,
    pub page: PageRef,
}

/// A scraped chord page: the raw text block plus the chords the page declares.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChordPage {
    pub raw_text: String,
    pub chords: Vec<String>,
}
