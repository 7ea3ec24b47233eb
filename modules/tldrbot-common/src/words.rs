//! Markdown-aware word counting and summary length targets.

use std::sync::OnceLock;

use regex::Regex;

/// Count words in post text. Markdown markup is stripped first so bold
/// markers, backticks, and link URLs don't inflate the count.
pub fn count_words(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }
    strip_markdown(text).split_whitespace().count()
}

/// Target TLDR length: 17% of the content, clamped to 40..=400 words.
pub fn target_summary_words(content_words: usize) -> usize {
    ((content_words as f64 * 0.17) as usize).clamp(40, 400)
}

fn strip_markdown(text: &str) -> String {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"\*\*([^*]+)\*\*",         // bold
            r"\*([^*]+)\*",             // italic
            r"`([^`]+)`",               // inline code
            r"\[([^\]]+)\]\([^)]+\)",   // links (keep the label, drop the URL)
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static markdown pattern"))
        .collect()
    });

    let mut out = text.to_string();
    for pattern in patterns {
        out = pattern.replace_all(&out, "$1").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_count_zero() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
    }

    #[test]
    fn plain_text_counts_whitespace_separated_words() {
        assert_eq!(count_words("one two three"), 3);
        assert_eq!(count_words("one\ntwo\n\nthree four"), 4);
    }

    #[test]
    fn markdown_markup_does_not_inflate_count() {
        assert_eq!(count_words("**bold words** here"), 3);
        assert_eq!(count_words("*emphasis* and `code span` too"), 5);
        // Link URL is dropped, the label survives.
        assert_eq!(count_words("see [this post](https://example.com/a/b) now"), 4);
    }

    #[test]
    fn target_length_scales_and_clamps() {
        assert_eq!(target_summary_words(600), 102);
        assert_eq!(target_summary_words(100), 40); // floor
        assert_eq!(target_summary_words(10_000), 400); // ceiling
    }
}
