//! Ranking of catalog search rows against the (artist, title) we asked for.

use std::fmt;

use crate::core::types::CatalogCandidate;

/// Which relaxation accepted the candidate, strictest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    VerifiedExact,
    Exact,
    Contains,
    /// Currently the same predicate as `Contains`; a separate tier so it can
    /// be loosened on its own.
    Fuzzy,
    /// Nothing matched, the first row is taken as is.
    FirstAvailable,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchTier::VerifiedExact => "verified exact",
            MatchTier::Exact => "exact",
            MatchTier::Contains => "contains",
            MatchTier::Fuzzy => "fuzzy",
            MatchTier::FirstAvailable => "first available",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub tier: MatchTier,
    pub candidate: &'a CatalogCandidate,
}

/// Comparison-only form of a name: lower-case, trimmed, single spaces,
/// `ё` folded to `е`, `. , ! ? ( )` removed.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('ё', "е")
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | '(' | ')'))
        .collect()
}

struct Target {
    artist: String,
    title: String,
}

struct Row<'a> {
    artist: String,
    title: String,
    candidate: &'a CatalogCandidate,
}

fn either_contains(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn exact_match(row: &Row<'_>, target: &Target) -> bool {
    row.artist == target.artist && row.title == target.title
}

fn verified_exact_match(row: &Row<'_>, target: &Target) -> bool {
    row.candidate.verified && exact_match(row, target)
}

fn contains_match(row: &Row<'_>, target: &Target) -> bool {
    either_contains(&row.artist, &target.artist) && either_contains(&row.title, &target.title)
}

fn fuzzy_match(row: &Row<'_>, target: &Target) -> bool {
    either_contains(&row.artist, &target.artist) && either_contains(&row.title, &target.title)
}

/// Picks the best candidate for `(artist, title)`.
///
/// Returns `None` only for an empty list; when no tier matches, the first
/// row wins.
pub fn pick<'a>(artist: &str, title: &str, candidates: &'a [CatalogCandidate]) -> Option<Match<'a>> {
    let first = candidates.first()?;

    let target = Target {
        artist: normalize(artist),
        title: normalize(title),
    };
    let rows: Vec<Row<'a>> = candidates
        .iter()
        .map(|candidate| Row {
            artist: normalize(&candidate.artist_text),
            title: normalize(&candidate.title_text),
            candidate,
        })
        .collect();

    let tiers: [(MatchTier, fn(&Row<'_>, &Target) -> bool); 4] = [
        (MatchTier::VerifiedExact, verified_exact_match),
        (MatchTier::Exact, exact_match),
        (MatchTier::Contains, contains_match),
        (MatchTier::Fuzzy, fuzzy_match),
    ];

    for (tier, predicate) in tiers {
        if let Some(row) = rows.iter().find(|row| predicate(row, &target)) {
            return Some(Match {
                tier,
                candidate: row.candidate,
            });
        }
    }

    Some(Match {
        tier: MatchTier::FirstAvailable,
        candidate: first,
    })
}
