//! Improvement suggestions.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::metrics::ContentMetrics;

/// Fewer words than this is "too short".
pub const MIN_WORDS: usize = 50;
/// More words than this is "too long".
pub const MAX_WORDS: usize = 200;
/// More hashtags than this is "too many".
pub const MAX_HASHTAGS: usize = 5;

/// One piece of advice about a post.
///
/// Serializes as `{"id": "add_hashtags", "message": "Add relevant ..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suggestion {
    AddHashtags,
    ReduceHashtags,
    AddMoreContent,
    ShortenContent,
    AddQuestions,
    AddEmojis,
    AddMentions,
}

impl Suggestion {
    /// Stable identifier for machine consumers.
    pub fn id(&self) -> &'static str {
        match self {
            Suggestion::AddHashtags => "add_hashtags",
            Suggestion::ReduceHashtags => "reduce_hashtags",
            Suggestion::AddMoreContent => "add_more_content",
            Suggestion::ShortenContent => "shorten_content",
            Suggestion::AddQuestions => "add_questions",
            Suggestion::AddEmojis => "add_emojis",
            Suggestion::AddMentions => "add_mentions",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Suggestion::AddHashtags => "Add relevant hashtags to increase visibility",
            Suggestion::ReduceHashtags => "Consider using fewer hashtags for better engagement",
            Suggestion::AddMoreContent => "Consider adding more content for better context",
            Suggestion::ShortenContent => "Consider shortening the content for better engagement",
            Suggestion::AddQuestions => "Add questions to encourage audience interaction",
            Suggestion::AddEmojis => "Add relevant emojis to make the content more engaging",
            Suggestion::AddMentions => "Consider tagging relevant accounts to increase reach",
        }
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Suggestion", 2)?;
        state.serialize_field("id", self.id())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}

/// Suggestions for the given metrics, in a fixed order: hashtags, length,
/// questions, emojis, mentions.
pub fn suggest(metrics: &ContentMetrics) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if metrics.hashtag_count == 0 {
        suggestions.push(Suggestion::AddHashtags);
    } else if metrics.hashtag_count > MAX_HASHTAGS {
        suggestions.push(Suggestion::ReduceHashtags);
    }

    if metrics.word_count < MIN_WORDS {
        suggestions.push(Suggestion::AddMoreContent);
    } else if metrics.word_count > MAX_WORDS {
        suggestions.push(Suggestion::ShortenContent);
    }

    if metrics.question_count == 0 {
        suggestions.push(Suggestion::AddQuestions);
    }

    if metrics.emoji_count == 0 {
        suggestions.push(Suggestion::AddEmojis);
    }

    if metrics.mention_count == 0 {
        suggestions.push(Suggestion::AddMentions);
    }

    suggestions
}
