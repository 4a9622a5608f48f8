#![forbid(unsafe_code)]

//! Summary text normalization.

/// Words kept in a node summary.
pub const SUMMARY_WORD_LIMIT: usize = 10;

/// Keep at most `limit` whitespace-separated words, appending `...` when
/// anything was cut.
///
/// A cut summary is re-joined with single spaces; an uncut one is only
/// trimmed.
#[must_use]
pub fn truncate_words(text: &str, limit: usize) -> String {
    if text.split_whitespace().nth(limit).is_none() {
        return text.trim().to_owned();
    }
    let mut out = text
        .split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(truncate_words("User asked about Python", 10), "User asked about Python");
    }

    #[test]
    fn long_text_cut_with_ellipsis() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        assert_eq!(
            truncate_words(text, SUMMARY_WORD_LIMIT),
            "one two three four five six seven eight nine ten..."
        );
    }

    #[test]
    fn exact_limit_has_no_ellipsis() {
        assert_eq!(truncate_words("a b c", 3), "a b c");
    }

    #[test]
    fn whitespace_trimmed() {
        assert_eq!(truncate_words("  spaced out  ", 10), "spaced out");
        assert_eq!(truncate_words("   ", 10), "");
    }

    #[test]
    fn uncut_text_keeps_inner_whitespace() {
        assert_eq!(truncate_words("  spaced \n   out  ", 10), "spaced \n   out");
        assert_eq!(truncate_words("a  b", 2), "a  b");
    }

    #[test]
    fn cut_text_collapses_whitespace() {
        assert_eq!(truncate_words("a  b \t c", 2), "a b...");
    }
}
