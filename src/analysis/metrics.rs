//! Engagement feature counting.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[a-zA-Z0-9]+").unwrap());
static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[a-zA-Z0-9]+").unwrap());
static EMOJI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Emoji_Presentation}").unwrap());

/// Counts of the text features the score is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ContentMetrics {
    pub word_count: usize,
    pub hashtag_count: usize,
    pub mention_count: usize,
    pub question_count: usize,
    pub emoji_count: usize,
}

impl ContentMetrics {
    pub fn from_text(text: &str) -> Self {
        Self {
            word_count: count_words(text),
            hashtag_count: count_hashtags(text),
            mention_count: count_mentions(text),
            question_count: count_questions(text),
            emoji_count: count_emojis(text),
        }
    }
}

/// Whitespace-delimited tokens. Empty text has zero words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `#` followed by one or more ASCII letters or digits.
pub fn count_hashtags(text: &str) -> usize {
    HASHTAG.find_iter(text).count()
}

/// `@` followed by one or more ASCII letters or digits.
pub fn count_mentions(text: &str) -> usize {
    MENTION.find_iter(text).count()
}

pub fn count_questions(text: &str) -> usize {
    text.chars().filter(|&c| c == '?').count()
}

/// Code points that render as emoji by default.
pub fn count_emojis(text: &str) -> usize {
    EMOJI.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("  one two\n\nthree\tfour  "), 4);
    }

    #[test]
    fn test_hashtags_and_mentions() {
        assert_eq!(count_hashtags("#rust is #1 at #2024 # alone"), 3);
        assert_eq!(count_hashtags("##double"), 1);
        assert_eq!(count_hashtags("#café"), 1);
        assert_eq!(count_mentions("thanks @alice and @Bob42!"), 2);
        assert_eq!(count_mentions("mail me at team@example.com"), 1);
        assert_eq!(count_mentions("just an @ sign"), 0);
    }

    #[test]
    fn test_questions() {
        assert_eq!(count_questions("What? Really?? No."), 3);
        assert_eq!(count_questions("No questions here."), 0);
    }

    #[test]
    fn test_emojis() {
        assert_eq!(count_emojis("Launch day 🚀🎉"), 2);
        // Digits and symbols with text presentation are not emoji
        assert_eq!(count_emojis("Call 555 #1 * ©"), 0);
        assert_eq!(count_emojis(""), 0);
    }

    #[test]
    fn test_from_text() {
        let metrics = ContentMetrics::from_text("Who's ready? #launch @acme 🎉");
        assert_eq!(
            metrics,
            ContentMetrics {
                word_count: 5,
                hashtag_count: 1,
                mention_count: 1,
                question_count: 1,
                emoji_count: 1,
            }
        );
    }
}
