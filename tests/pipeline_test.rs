//! End-to-end request tests: clip → track → chords → tips
//!
//! Run with: cargo test --test pipeline_test

mod common;

use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use akkordy::core::PageRef;
use akkordy::identity::MatchTier;
use akkordy::{ChordFinder, ChordOutcome};
use common::{candidate, chord_page, track, FakeCatalog, FakeRecognizer, FakeTips, FakeTranslator};

const RAW_SHEET: &str = "Куплет 1:\nAm      C\nAm      C\nГорит огонь\nПрипев:\nF   G\nИ снова ночь   ";

fn lube_catalog() -> FakeCatalog {
    let page = PageRef::new("https://amdm.ru/akkordi/lyube/kombat");
    FakeCatalog::new()
        .with_results("ЛЮБЭ", "Kombat", vec![candidate("Любэ", "Kombat", "lyube/kombat")])
        .with_page(&page, chord_page(RAW_SHEET, &["G", "F", "C", "Am"]))
}

fn finder(recognizer: FakeRecognizer, catalog: FakeCatalog, tips: Arc<FakeTips>) -> ChordFinder {
    ChordFinder::new(
        Arc::new(recognizer),
        Arc::new(catalog),
        Arc::new(FakeTranslator::new()),
        tips,
    )
}

#[tokio::test]
async fn test_unrecognized_clip() {
    let tips = Arc::new(FakeTips::replying("tips"));
    let finder = finder(FakeRecognizer::Nothing, lube_catalog(), tips.clone());

    let outcome = finder.find_for_clip(Path::new("clip.ogg")).await;

    assert_eq!(outcome, ChordOutcome::NotRecognized);
    assert!(tips.sheets().is_empty());
}

#[tokio::test]
async fn test_recognizer_error_counts_as_not_recognized() {
    let finder = finder(FakeRecognizer::Broken, lube_catalog(), Arc::new(FakeTips::replying("tips")));

    assert_eq!(finder.find_for_clip(Path::new("clip.ogg")).await, ChordOutcome::NotRecognized);
}

#[tokio::test]
async fn test_chords_not_found_keeps_identity() {
    let recognizer = FakeRecognizer::Track(track("Kino", "Kukushka", None));
    let finder = finder(recognizer, FakeCatalog::new(), Arc::new(FakeTips::replying("tips")));

    match finder.find_for_clip(Path::new("clip.mp3")).await {
        ChordOutcome::ChordsNotFound { identity } => {
            assert_eq!(identity.artist, "Kino");
            assert_eq!(identity.title, "Kukushka");
        }
        other => panic!("expected ChordsNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_found_sheet_is_normalized_and_analyzed() {
    let recognizer = FakeRecognizer::Track(track("LUBE", "Kombat", Some("RUA000000001")));
    let tips = Arc::new(FakeTips::replying("<b>Уникальные аккорды:</b> Am, C, F, G"));
    let finder = finder(recognizer, lube_catalog(), tips.clone());

    let ChordOutcome::Found { identity, chords, tips: text } = finder.find_for_clip(Path::new("clip.mp3")).await else {
        panic!("expected chords to be found");
    };

    assert_eq!(identity.artist, "ЛЮБЭ");
    assert_eq!(identity.original_artist(), "LUBE");
    assert_eq!(chords.query_artist, "ЛЮБЭ");
    assert_eq!(chords.query_title, "Kombat");
    assert_eq!(chords.tier, MatchTier::Exact);
    assert_eq!(
        chords.sheet,
        "Куплет 1:\nAm      C\nГорит огонь\n\nПрипев:\nF   G\nИ снова ночь"
    );
    assert_eq!(chords.chords, vec!["Am", "C", "F", "G"]);
    assert_eq!(text, "<b>Уникальные аккорды:</b> Am, C, F, G");
    assert_eq!(tips.sheets(), vec![chords.sheet.clone()]);
}

#[tokio::test]
async fn test_tip_failure_becomes_apology() {
    let recognizer = FakeRecognizer::Track(track("LUBE", "Kombat", None));
    let finder = finder(recognizer, lube_catalog(), Arc::new(FakeTips::failing()));

    let ChordOutcome::Found { tips, .. } = finder.find_for_clip(Path::new("clip.mp3")).await else {
        panic!("expected chords to be found");
    };

    assert!(tips.starts_with("Не удалось проанализировать аккорды: "));
}

#[tokio::test]
async fn test_romanized_artist_is_looked_up_in_cyrillic() {
    let page = PageRef::new("https://amdm.ru/akkordi/zemfira/iskala");
    let catalog = FakeCatalog::new()
        .with_results("Земфира", "Iskala", vec![candidate("Земфира", "Iskala", "zemfira/iskala")])
        .with_page(&page, chord_page("Dm Am\nЯ искала тебя", &["Dm", "Am"]));
    let recognizer = FakeRecognizer::Track(track("Zemfira", "Iskala", Some("RUA000000002")));
    let finder = finder(recognizer, catalog, Arc::new(FakeTips::replying("tips")));

    let ChordOutcome::Found { identity, chords, .. } = finder.find_for_clip(Path::new("clip.mp3")).await else {
        panic!("expected chords to be found");
    };

    assert_eq!(identity.artist, "Земфира");
    assert_eq!(identity.original_artist(), "Zemfira");
    assert_eq!(chords.query_artist, "Земфира");
    assert_eq!(chords.chords, vec!["Dm", "Am"]);
}
