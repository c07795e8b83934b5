//! Engagement scoring for extracted text.
//!
//! Pure and deterministic: no I/O, no state, total over any `&str`.

mod metrics;
mod suggestions;

use serde::Serialize;

pub use metrics::{
    count_emojis, count_hashtags, count_mentions, count_questions, count_words, ContentMetrics,
};
pub use suggestions::{suggest, Suggestion, MAX_HASHTAGS, MAX_WORDS, MIN_WORDS};

/// Score every text starts from.
pub const BASE_SCORE: u32 = 50;
/// Highest possible score.
pub const MAX_SCORE: u32 = 100;

const WORD_BAND_BONUS: u32 = 10;
const HASHTAG_POINTS: u32 = 5;
const MENTION_POINTS: u32 = 3;
const QUESTION_POINTS: u32 = 5;
const EMOJI_POINTS: u32 = 2;
const EMOJI_CAP: u32 = 10;

/// Score and advice for one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Engagement score, 50..=100.
    pub score: u8,
    pub suggestions: Vec<Suggestion>,
    pub metrics: ContentMetrics,
}

/// Score `text` for engagement and suggest improvements.
pub fn analyze(text: &str) -> AnalysisResult {
    let metrics = ContentMetrics::from_text(text);
    AnalysisResult {
        score: score(&metrics),
        suggestions: suggest(&metrics),
        metrics,
    }
}

/// Engagement score for the given metrics.
pub fn score(metrics: &ContentMetrics) -> u8 {
    let mut score = BASE_SCORE;

    if (MIN_WORDS..=MAX_WORDS).contains(&metrics.word_count) {
        score += WORD_BAND_BONUS;
    }
    score = score.saturating_add(points(metrics.hashtag_count, HASHTAG_POINTS));
    score = score.saturating_add(points(metrics.mention_count, MENTION_POINTS));
    score = score.saturating_add(points(metrics.question_count, QUESTION_POINTS));
    score = score.saturating_add(points(metrics.emoji_count, EMOJI_POINTS).min(EMOJI_CAP));

    score.min(MAX_SCORE) as u8
}

fn points(count: usize, each: u32) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(each)
}
