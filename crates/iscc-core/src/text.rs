//! Text normalization used by the Meta-Code and Text-Code generators.

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Characters accepted as line breaks.
const NEWLINES: [char; 7] = [
    '\n', '\u{000B}', '\u{000C}', '\r', '\u{0085}', '\u{2028}', '\u{2029}',
];

fn is_other(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Unassigned
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
    )
}

fn is_mark_or_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::NonspacingMark
            | GeneralCategory::SpacingMark
            | GeneralCategory::EnclosingMark
            | GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Cleans text for display.
///
/// NFKC-normalizes, drops control and format characters, maps every line
/// break (including `\r\n`) to `\n`, keeps at most one blank line in a row
/// and trims surrounding whitespace.
pub fn text_clean(text: &str) -> String {
    let mut unified = String::with_capacity(text.len());
    let mut chars = text.nfkc().peekable();
    while let Some(c) = chars.next() {
        if NEWLINES.contains(&c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            unified.push('\n');
        } else if !is_other(c) {
            unified.push(c);
        }
    }

    let mut lines: Vec<&str> = Vec::new();
    let mut last_blank = false;
    for line in unified.split('\n') {
        let blank = line.trim().is_empty();
        if !(blank && last_blank) {
            lines.push(line);
        }
        last_blank = blank;
    }
    lines.join("\n").trim().to_string()
}

/// Joins all whitespace-separated words with single spaces.
pub fn text_remove_newlines(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates text to at most `nbytes` UTF-8 bytes without splitting a
/// character, then trims whitespace.
pub fn text_trim(text: &str, nbytes: usize) -> String {
    let mut end = nbytes.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].trim().to_string()
}

/// Reduces text to its similarity-relevant characters.
///
/// Lowercases the NFD form, drops whitespace, control characters, marks and
/// punctuation, and recomposes with NFKC.
pub fn text_collapse(text: &str) -> String {
    let lowered = text.nfd().collect::<String>().to_lowercase();
    lowered
        .chars()
        .filter(|&c| !c.is_whitespace() && !is_other(c) && !is_mark_or_punctuation(c))
        .nfkc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_clean_newlines() {
        assert_eq!(text_clean("  a\r\nb\rc  "), "a\nb\nc");
        assert_eq!(text_clean("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(text_clean("a\n \n\t\nb"), "a\n \nb");
    }

    #[test]
    fn test_text_clean_removes_controls() {
        assert_eq!(text_clean("a\u{0000}b\u{200B}c"), "abc");
        // NFKC folds the ligature
        assert_eq!(text_clean("\u{FB01}ne"), "fine");
    }

    #[test]
    fn test_text_remove_newlines() {
        assert_eq!(text_remove_newlines("a\nb  c\n\n d"), "a b c d");
        assert_eq!(text_remove_newlines("   "), "");
    }

    #[test]
    fn test_text_trim_respects_char_boundaries() {
        assert_eq!(text_trim("hello world", 5), "hello");
        assert_eq!(text_trim("hello world", 6), "hello");
        assert_eq!(text_trim("ä", 1), "");
        assert_eq!(text_trim("aä", 2), "a");
        assert_eq!(text_trim("short", 100), "short");
    }

    #[test]
    fn test_text_collapse() {
        assert_eq!(text_collapse("Hello World"), "helloworld");
        assert_eq!(text_collapse("Café, Crème!"), "cafecreme");
        assert_eq!(text_collapse(""), "");
    }
}
