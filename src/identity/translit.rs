//! Latin → Cyrillic reverse transliteration.
//!
//! Both converters are pure and total: they lower-case the input, run a fixed
//! substitution table over it and return whatever comes out. Letters the table
//! does not know (`q`, `x`, `j`, digits, punctuation) pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Substitution table in declared order. `improved_convert_to_russian` applies
/// every row in exactly this order, so a row placed after its own prefix
/// (`ye` after `y`) never fires there. That ordering is observable output and
/// must not be "fixed" by sorting.
const REVERSE_TRANSLIT: &[(&str, &str)] = &[
    ("ea", "и"),
    ("yo", "ё"),
    ("zh", "ж"),
    ("ch", "ч"),
    ("sh", "ш"),
    ("sch", "щ"),
    ("yu", "ю"),
    ("ya", "я"),
    ("iy", "ий"),
    ("y", "й"),
    ("a", "а"),
    ("b", "б"),
    ("v", "в"),
    ("w", "в"),
    ("g", "г"),
    ("h", "х"),
    ("d", "д"),
    ("e", "е"),
    ("z", "з"),
    ("i", "и"),
    ("k", "к"),
    ("l", "л"),
    ("m", "м"),
    ("n", "н"),
    ("o", "о"),
    ("p", "п"),
    ("r", "р"),
    ("s", "с"),
    ("t", "т"),
    ("u", "у"),
    ("f", "ф"),
    ("c", "ц"),
    ("'", "ь"),
    ("ye", "ые"),
];

/// Multi-letter sequences the basic converter handles before single letters.
/// `kh`, `ts` and `shch` have no table row and are skipped.
const COMPOSITES: &[&str] = &["ea", "yo", "zh", "kh", "ts", "ch", "sh", "sch", "shch", "yu", "ya"];

// ASCII word boundaries: a Cyrillic letter ends a Latin word.
static ADJECTIVE_YE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])ye(?-u:\b)").expect("ye ending regex is valid"));

static ENDING_Y_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])y(?-u:\b)").expect("y ending regex is valid"));

static ENDING_IY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])iy(?-u:\b)").expect("iy ending regex is valid"));

fn lookup(latin: &str) -> Option<&'static str> {
    REVERSE_TRANSLIT
        .iter()
        .find(|(from, _)| *from == latin)
        .map(|(_, to)| *to)
}

/// Composite sequences first, then single letters.
pub fn convert_to_russian(text: &str) -> String {
    let mut result = text.to_lowercase();

    for composite in COMPOSITES {
        if let Some(cyrillic) = lookup(composite) {
            result = result.replace(composite, cyrillic);
        }
    }

    for (latin, cyrillic) in REVERSE_TRANSLIT {
        if latin.chars().count() == 1 {
            result = result.replace(latin, cyrillic);
        }
    }

    result
}

/// Rewrites word endings (`-ye`, `-y`, `-iy`) to Russian morphology, then
/// applies the whole table in declared order.
pub fn improved_convert_to_russian(text: &str) -> String {
    let lowered = text.to_lowercase();
    let result = ADJECTIVE_YE_RE.replace_all(&lowered, "${1}ые");
    let result = ENDING_Y_RE.replace_all(&result, "${1}ый");
    let mut result = ENDING_IY_RE.replace_all(&result, "${1}ий").into_owned();

    for (latin, cyrillic) in REVERSE_TRANSLIT {
        result = result.replace(latin, cyrillic);
    }

    result
}

/// Copies the original's per-position capitalization onto `converted`.
///
/// Position `i` of the output is upper-cased when character `i` of `original`
/// is its own upper-case form (capitals, but also spaces and digits). This is
/// a plain positional zip: digraphs change the length, so after the first one
/// the capitals drift. Known approximation, kept as is.
pub fn reapply_case(original: &str, converted: &str) -> String {
    let original: Vec<char> = original.chars().collect();
    converted
        .chars()
        .enumerate()
        .map(|(i, c)| match original.get(i) {
            Some(o) if o.to_uppercase().eq(std::iter::once(*o)) => c.to_uppercase().collect::<String>(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_simple_names() {
        assert_eq!(convert_to_russian("Kino"), "кино");
        assert_eq!(convert_to_russian("Zhanna"), "жанна");
        assert_eq!(convert_to_russian("Chaif"), "чаиф");
        assert_eq!(convert_to_russian("Spleen"), "сплеен");
    }

    #[test]
    fn test_convert_skips_unmapped_composites() {
        // "ts" has no row, so t and s are converted separately
        assert_eq!(convert_to_russian("tsoi"), "тсои");
    }

    #[test]
    fn test_convert_keeps_unknown_letters() {
        assert_eq!(convert_to_russian("Xq 42!"), "xq 42!");
    }

    #[test]
    fn test_convert_ch_wins_over_sch() {
        // "ch" runs before "sch" in the composite list
        assert_eq!(convert_to_russian("borsch"), "борсч");
    }

    #[test]
    fn test_improved_adjective_ending() {
        assert_eq!(improved_convert_to_russian("smyslovye"), "смйсловые");
    }

    #[test]
    fn test_improved_word_boundary_is_ascii() {
        // after "-ye" became "ые" the Latin "y" before it ends a word
        assert_eq!(improved_convert_to_russian("kryye"), "крыйые");
    }

    #[test]
    fn test_improved_iy_ending_is_shadowed_by_y_rule() {
        // "-y" rewrites the tail first, so "-iy" never matches
        assert_eq!(improved_convert_to_russian("laskoviy"), "ласковиый");
    }

    #[test]
    fn test_converters_are_deterministic_and_total() {
        for input in ["", "   ", "Mumiy Troll", "ЛЮБЭ", "a'b'c", "🎸 rock"] {
            assert_eq!(convert_to_russian(input), convert_to_russian(input));
            assert_eq!(improved_convert_to_russian(input), improved_convert_to_russian(input));
        }
    }

    #[test]
    fn test_output_is_lowercase() {
        let out = convert_to_russian("KINO");
        assert_eq!(out, out.to_lowercase());
    }

    #[test]
    fn test_reapply_case_same_length() {
        let converted = convert_to_russian("Mumiy Troll");
        assert_eq!(converted, "мумий тролл");
        assert_eq!(reapply_case("Mumiy Troll", &converted), "Мумий Тролл");
    }

    #[test]
    fn test_reapply_case_drifts_after_digraph() {
        let converted = convert_to_russian("Zhanna Friske");
        assert_eq!(converted, "жанна фриске");
        assert_eq!(reapply_case("Zhanna Friske", &converted), "Жанна ФРиске");
    }
}
