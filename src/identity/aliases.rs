//! Known Latin spellings of Russian artists that heuristics get wrong.

/// Upper-case Latin spelling → canonical Cyrillic name.
const ARTIST_ALIASES: &[(&str, &str)] = &[
    ("LUBE", "ЛЮБЭ"),
    ("LYUBE", "ЛЮБЭ"),
    ("LYBE", "ЛЮБЭ"),
    ("LUBE'", "ЛЮБЭ"),
    ("LYUBE'", "ЛЮБЭ"),
    ("KOROL I SHUT", "Король и Шут"),
    ("KOROL AND SHUT", "Король и Шут"),
    ("KIS", "Король и Шут"),
    ("KOROL & SHUT", "Король и Шут"),
    ("SPLEAN", "Сплин"),
    ("SPLEEN", "Сплин"),
    ("SPLIN", "Сплин"),
    ("SMYSLOVYE GALLYUTSINATSII", "Смысловые Галлюцинации"),
    ("SMYSLOVYE GALLUTSINATSII", "Смысловые Галлюцинации"),
    ("SMYSLOVIE GALLUCINACII", "Смысловые Галлюцинации"),
    ("SG", "Смысловые Галлюцинации"),
];

fn exact(key: &str) -> Option<&'static str> {
    ARTIST_ALIASES
        .iter()
        .find(|(latin, _)| *latin == key)
        .map(|(_, cyrillic)| *cyrillic)
}

/// Case-insensitive lookup; retries with runs of whitespace collapsed.
pub fn lookup_alias(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    exact(&upper).or_else(|| {
        let collapsed = upper.split_whitespace().collect::<Vec<_>>().join(" ");
        exact(&collapsed)
    })
}
