const WORDS_PER_MINUTE: f64 = 200.0;

/// Estimated time to read a post body, derived from the whitespace-delimited
/// word count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingTime {
    pub minutes: f64,
    pub words: usize,
}

impl ReadingTime {
    pub fn estimate(body: &str) -> ReadingTime {
        let words = body.split_whitespace().count();
        ReadingTime {
            minutes: words as f64 / WORDS_PER_MINUTE,
            words,
        }
    }

    /// Rounded up for display, never below one minute.
    pub fn display(&self) -> String {
        let minutes = self.minutes.ceil().max(1.0) as u64;
        format!("{} min read", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_up() {
        let body = "word ".repeat(50);
        let rt = ReadingTime::estimate(&body);
        assert_eq!(rt.words, 50);
        assert_eq!(rt.display(), "1 min read");

        let body = "word ".repeat(400);
        assert_eq!(ReadingTime::estimate(&body).display(), "2 min read");

        let body = "word ".repeat(401);
        assert_eq!(ReadingTime::estimate(&body).display(), "3 min read");
    }

    #[test]
    fn test_empty_body() {
        let rt = ReadingTime::estimate("");
        assert_eq!(rt.words, 0);
        assert!(!rt.minutes.is_nan());
        assert_eq!(rt.display(), "1 min read");
    }

    #[test]
    fn test_monotonic_in_word_count() {
        let mut previous = 0.0;
        for words in [1, 100, 500, 2000, 10_000] {
            let body = "word ".repeat(words);
            let rt = ReadingTime::estimate(&body);
            assert!(rt.minutes >= previous);
            previous = rt.minutes;
        }
    }
}
