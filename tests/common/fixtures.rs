//! Test data builders

use akkordy::core::{CatalogCandidate, ChordPage, PageRef, RecognizedTrack};

pub fn track(artist: &str, title: &str, isrc: Option<&str>) -> RecognizedTrack {
    RecognizedTrack {
        title: title.to_string(),
        artist: artist.to_string(),
        isrc: isrc.map(str::to_string),
        album: None,
    }
}

pub fn candidate(artist: &str, title: &str, page: &str) -> CatalogCandidate {
    CatalogCandidate {
        artist_text: artist.to_string(),
        title_text: title.to_string(),
        verified: false,
        page: PageRef::new(format!("https://amdm.ru/akkordi/{}", page)),
    }
}

pub fn chord_page(raw_text: &str, chords: &[&str]) -> ChordPage {
    ChordPage {
        raw_text: raw_text.to_string(),
        chords: chords.iter().map(|c| c.to_string()).collect(),
    }
}
