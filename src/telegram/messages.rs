//! Reply texts and Telegram HTML formatting.

use teloxide::utils::html;

use crate::core::config;
use crate::core::types::SongIdentity;

pub const GREETING: &str = "🎸 Приветствую, музыкальный искатель! 🎵 Я здесь, чтобы помочь тебе найти аккорды из аудиозаписей и раскрыть потрясающее звучание мелодий. Доверься мне, и вместе мы пройдем по волнам музыки и создадим гармонию звуков. Погрузимся в мир музыкального творчества вместе! 🎼

📝 Как пользоваться:
1. Отправь мне аудио с песней
2. Я распознаю песню и найду аккорды
3. Получи текст песни с аккордами и советы по исполнению

🎯 Просто отправь мне любую песню, и я помогу тебе!";

pub const DOWNLOADING: &str = "Загружаю файл и пытаюсь распознать песню... 🎵";
pub const NOT_RECOGNIZED: &str = "К сожалению, не удалось распознать песню 😔";
pub const CHORDS_NOT_FOUND: &str = "К сожалению, аккорды для этой песни не найдены 😔";
pub const PROCESSING_FAILED: &str = "Произошла ошибка при обработке файла 😔";
pub const SEND_AUDIO_HINT: &str = "Отправь мне аудио, голосовое или видео с песней, и я найду к ней аккорды 🎸";

const SHEET_HEADER: &str = "🎵 <b>Текст песни с аккордами:</b>\n\n";
const PRE_OPEN: &str = "<pre><code>";
const PRE_CLOSE: &str = "</code></pre>";

/// "Found the song" banner, sent before the chord lookup starts. Shows the
/// spelling the lookup uses, so aliases and translations are visible.
pub fn found_banner(identity: &SongIdentity) -> String {
    format!(
        "🎧 <b>НАЙДЕНА ПЕСНЯ:</b>\n🎵<b>{}</b>\n👨‍🎤 <b>{}</b>\n\nИщу аккорды...",
        html::escape(&identity.title.to_uppercase()),
        html::escape(&identity.artist.to_uppercase())
    )
}

fn escaped_len(c: char) -> usize {
    match c {
        '&' => 5,
        '<' | '>' => 4,
        _ => 1,
    }
}

/// Splits `text` into pieces of at most `limit` characters, measured after
/// HTML escaping when `escaped` is set. Breaks at line ends when it can.
fn split_lines(text: &str, limit: usize, escaped: bool) -> Vec<String> {
    let len = |c: char| if escaped { escaped_len(c) } else { 1 };
    let limit = limit.max(1);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len: usize = line.chars().map(len).sum();
        let separator = usize::from(!current.is_empty());

        if current_len + separator + line_len <= limit {
            if separator == 1 {
                current.push('\n');
            }
            current.push_str(line);
            current_len += separator + line_len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        // a single line longer than the limit is cut by characters
        for c in line.chars() {
            if current_len + len(c) > limit {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(c);
            current_len += len(c);
        }
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// The chord sheet as one or more `<pre>` messages, each within Telegram's
/// message limit. Only the first carries the header.
pub fn sheet_messages(sheet: &str) -> Vec<String> {
    let overhead = SHEET_HEADER.chars().count() + PRE_OPEN.len() + PRE_CLOSE.len();
    let budget = config::telegram::MAX_MESSAGE_LEN.saturating_sub(overhead);

    split_lines(sheet, budget, true)
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let header = if i == 0 { SHEET_HEADER } else { "" };
            format!("{}{}{}{}", header, PRE_OPEN, html::escape(&chunk), PRE_CLOSE)
        })
        .collect()
}

/// Splits already-formatted text (tips) at line ends.
pub fn split_message(text: &str) -> Vec<String> {
    split_lines(text, config::telegram::MAX_MESSAGE_LEN, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_found_banner_is_uppercased_and_escaped() {
        let identity = SongIdentity::new("Rock & Roll <live>", "Сплин");
        assert_eq!(
            found_banner(&identity),
            "🎧 <b>НАЙДЕНА ПЕСНЯ:</b>\n🎵<b>ROCK &amp; ROLL &lt;LIVE&gt;</b>\n👨‍🎤 <b>СПЛИН</b>\n\nИщу аккорды..."
        );
    }

    #[test]
    fn test_found_banner_shows_substituted_artist() {
        let mut identity = SongIdentity::new("Kombat", "LUBE");
        identity.artist = "ЛЮБЭ".to_string();
        let banner = found_banner(&identity);
        assert!(banner.contains("<b>ЛЮБЭ</b>"));
        assert!(!banner.contains("LUBE"));
    }

    #[test]
    fn test_short_sheet_is_one_message() {
        let messages = sheet_messages("Am   C\n<la> & la");
        assert_eq!(
            messages,
            vec!["🎵 <b>Текст песни с аккордами:</b>\n\n<pre><code>Am   C\n&lt;la&gt; &amp; la</code></pre>"]
        );
    }

    #[test]
    fn test_long_sheet_is_split_within_limit() {
        let line = "Am C G F ".repeat(10);
        let sheet = vec![line.as_str(); 100].join("\n");
        let messages = sheet_messages(&sheet);

        assert!(messages.len() > 1);
        assert!(messages[0].starts_with(SHEET_HEADER));
        assert!(!messages[1].starts_with(SHEET_HEADER));
        for message in &messages {
            assert!(message.chars().count() <= config::telegram::MAX_MESSAGE_LEN);
            assert!(message.ends_with(PRE_CLOSE));
        }
    }

    #[test]
    fn test_split_lines_measures_escaped_length() {
        assert_eq!(split_lines("&&\n&", 10, true), vec!["&&", "&"]);
        assert_eq!(split_lines("&&\n&", 10, false), vec!["&&\n&"]);
    }

    #[test]
    fn test_split_lines_cuts_overlong_line() {
        assert_eq!(split_lines("abcdefg", 3, false), vec!["abc", "def", "g"]);
        assert_eq!(split_lines("ab\ncdefg", 3, false), vec!["ab", "cde", "fg"]);
    }

    #[test]
    fn test_split_empty_text() {
        assert_eq!(split_message(""), vec![""]);
    }
}
