//! Reading-time estimate

use serde::{Deserialize, Serialize};

use super::MarkdownRenderer;

/// Estimated reading time of a post body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingTime {
    /// Words of visible text
    pub words: usize,
    /// Whole minutes, never below one
    pub minutes: u32,
    /// Display label, e.g. "3 min read"
    pub text: String,
}

impl ReadingTime {
    /// Estimate from a word count at the given reading speed
    pub fn from_words(words: usize, words_per_minute: usize) -> Self {
        let minutes = words.div_ceil(words_per_minute.max(1)).max(1) as u32;
        Self {
            words,
            minutes,
            text: format!("{} min read", minutes),
        }
    }

    /// Estimate from a Markdown body
    pub fn estimate(markdown: &str, words_per_minute: usize) -> Self {
        let text = MarkdownRenderer::new().plain_text(markdown);
        Self::from_words(text.split_whitespace().count(), words_per_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_is_one_minute() {
        let rt = ReadingTime::estimate("Hello there.", 200);
        assert_eq!(rt.words, 2);
        assert_eq!(rt.minutes, 1);
        assert_eq!(rt.text, "1 min read");
    }

    #[test]
    fn test_empty_body_is_one_minute() {
        let rt = ReadingTime::estimate("", 200);
        assert_eq!(rt.words, 0);
        assert_eq!(rt.minutes, 1);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(ReadingTime::from_words(200, 200).minutes, 1);
        assert_eq!(ReadingTime::from_words(201, 200).minutes, 2);
        assert_eq!(ReadingTime::from_words(1000, 200).minutes, 5);
    }

    #[test]
    fn test_monotonic_in_length() {
        let mut last = 0;
        for words in (0..2000).step_by(37) {
            let minutes = ReadingTime::from_words(words, 200).minutes;
            assert!(minutes >= last);
            last = minutes;
        }
    }

    #[test]
    fn test_zero_speed_does_not_panic() {
        assert_eq!(ReadingTime::from_words(10, 0).minutes, 10);
    }
}
