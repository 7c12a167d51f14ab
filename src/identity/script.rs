//! Heuristic detection of Russian words spelled in Latin letters.
//!
//! Recognition services usually report Russian artists romanized ("Kino",
//! "Mumiy Troll"), while the chord catalog indexes them in Cyrillic. This
//! classifier decides whether a Latin string is worth converting back.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static CYRILLIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[а-яА-ЯёЁ]").expect("cyrillic regex is valid"));

static NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9.,!?()\[\]{}]").expect("noise regex is valid"));

static CONSONANT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[bcdfghjklmnpqrstvwxz]{3,}").expect("consonant run regex is valid"));

static VOWEL_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]{3,}").expect("vowel run regex is valid"));

static LATIN_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("latin regex is valid"));

static SIBILANT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[szh]").expect("sibilant regex is valid"));

static DOUBLE_VOWEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]{2,}").expect("double vowel regex is valid"));

/// Articles, prepositions and words that show up in English band names.
static ENGLISH_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "feat", "featuring", "vs",
        "versus", "mr", "mrs", "ms", "dr", "dj", "mc", "sir", "black", "white", "red", "blue", "green", "band",
        "boys", "girls", "brothers", "sisters", "king", "queen", "prince", "princess", "rock", "pop", "jazz",
        "blues", "metal", "little", "big", "young", "old", "death", "dead", "life", "live", "sun", "moon", "star",
        "sky", "deep", "high", "low", "new",
    ]
    .into_iter()
    .collect()
});

/// Romanizations of ж ч ш щ ю я ё ц х.
const TRANSLIT_PATTERNS: &[&str] = &["zh", "ch", "sh", "sch", "shch", "yu", "ya", "yo", "ts", "kh"];

/// Surname, patronymic and adjective endings.
const TRANSLIT_ENDINGS: &[&str] = &[
    "ov", "ev", "in", "iy", "yi", "oy", "sky", "skiy", "skaya", "yan", "ian", "jan", "khan", "glu", "uli", "dze",
    "shvili", "adze", "idze", "enko", "yuk", "chuk", "man", "berg", "mir", "ovich", "evich", "ovna", "evna",
];

/// Share of flagged words at which a string counts as translit.
const TRANSLIT_THRESHOLD: f64 = 0.5;

/// Classification result, recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslitSignal {
    pub is_translit: bool,
}

pub fn contains_cyrillic(text: &str) -> bool {
    CYRILLIC_RE.is_match(text)
}

pub fn classify(text: &str) -> TranslitSignal {
    TranslitSignal {
        is_translit: is_likely_translit(text),
    }
}

/// Returns true when most non-English words of `text` look like romanized Russian.
///
/// Exactly half counts as translit.
pub fn is_likely_translit(text: &str) -> bool {
    if contains_cyrillic(text) {
        return false;
    }

    let lowered = text.to_lowercase();
    let cleaned = NOISE_RE.replace_all(&lowered, "");

    let mut flagged = 0usize;
    let mut total = 0usize;

    for word in cleaned.split_whitespace().filter(|w| w.chars().count() > 1) {
        if ENGLISH_WORDS.contains(word) {
            continue;
        }
        total += 1;
        if word_has_translit_signal(word) {
            flagged += 1;
        }
    }

    if total == 0 {
        return false;
    }
    flagged as f64 / total as f64 >= TRANSLIT_THRESHOLD
}

fn word_has_translit_signal(word: &str) -> bool {
    if TRANSLIT_PATTERNS.iter().any(|p| word.contains(p)) {
        return true;
    }
    if TRANSLIT_ENDINGS.iter().any(|e| word.ends_with(e)) {
        return true;
    }
    if CONSONANT_RUN_RE.is_match(word) || VOWEL_RUN_RE.is_match(word) {
        return true;
    }
    LATIN_ONLY_RE.is_match(word) && (SIBILANT_RE.is_match(word) || DOUBLE_VOWEL_RE.is_match(word))
}
