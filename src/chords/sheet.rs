//! Chord-sheet normalizer.
//!
//! Scraped pages often annotate every lyric line with chords, repeating the
//! same chord line under itself. The normalizer keeps the first line of such
//! a run, drops blank lines and marks section headers off with a single
//! blank line. A token is only a chord when it both looks like one and
//! appears in the page's own chord list: "A" or "Em" in a lyric line stays a
//! word.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static CHORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-H][b#]?(m|sus|add|maj|dim|aug|-|\d)*(/[A-H][b#]?)?$").expect("chord regex is valid")
});

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Припев|Проигрыш|Куплет|Бридж|Вступление|Кода)(\s*\d+)?:").expect("header regex is valid")
});

/// `Припев:`, `Куплет 2:` and friends.
pub fn is_section_header(line: &str) -> bool {
    HEADER_RE.is_match(line.trim_start())
}

/// Chord grammar only, without the page's chord set.
pub fn looks_like_chord(token: &str) -> bool {
    CHORD_RE.is_match(token)
}

/// Tokens of `line` that are chords of this page, in order.
pub fn extract_chords<'a>(line: &'a str, known: &HashSet<&str>) -> Vec<&'a str> {
    line.split_whitespace()
        .filter(|token| looks_like_chord(token) && known.contains(token))
        .collect()
}

/// Distinct chords of the page in order of first appearance in `sheet`.
pub fn chords_in_order(sheet: &str, chords: &[String]) -> Vec<String> {
    let known = chord_set(chords);
    let mut seen = HashSet::new();
    sheet
        .lines()
        .filter(|line| !is_section_header(line))
        .flat_map(|line| extract_chords(line, &known))
        .filter(|chord| seen.insert(*chord))
        .map(str::to_string)
        .collect()
}

fn chord_set(chords: &[String]) -> HashSet<&str> {
    chords
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Cleans a raw chord block against the page's chord list.
///
/// Total and idempotent. The only blank lines in the output are the ones
/// put before section headers. With an empty chord list only that
/// blank-line handling applies.
pub fn normalize_chord_sheet(raw: &str, chords: &[String]) -> String {
    let known = chord_set(chords);
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim_start().is_empty())
        .collect();

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        kept.push(line);
        i += 1;

        if is_section_header(line) {
            continue;
        }
        let sequence = extract_chords(line, &known);
        if sequence.is_empty() {
            continue;
        }

        // drop every directly following repeat of the same chord line
        while i < lines.len() && !is_section_header(lines[i]) && extract_chords(lines[i], &known) == sequence {
            log::debug!("Chords: dropping repeated chord line '{}'", lines[i]);
            i += 1;
        }
    }

    let mut out = String::with_capacity(raw.len());
    for line in kept {
        if is_section_header(line) {
            out.push('\n');
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim_matches('\n').to_string()
}
