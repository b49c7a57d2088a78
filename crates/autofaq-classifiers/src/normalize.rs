//! Deterministic message cleaning

use regex::Regex;

use autofaq_core::{Error, Result};

/// Normalizes raw chat text into the form the classifier is trained on
///
/// Cleaning is pure and idempotent; the exact same transformation runs
/// at training and at inference time. An empty result means the message
/// carries no classifiable content.
pub struct MessageNormalizer {
    urls: Regex,
    markup: Regex,
    symbols: Regex,
    whitespace: Regex,
}

impl MessageNormalizer {
    /// Compile the cleaning patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            urls: compile(r"https?://\S+")?,
            markup: compile(r"<[^>]*>")?,
            symbols: compile(r"[^\w\s]")?,
            whitespace: compile(r"\s+")?,
        })
    }

    /// Clean raw text: lowercase, strip URLs and platform markup, drop
    /// remaining symbols, collapse whitespace
    pub fn clean(&self, raw: &str) -> String {
        let text = raw.to_lowercase();
        let text = self.urls.replace_all(&text, "");
        let text = self.markup.replace_all(&text, "");
        let text = self.symbols.replace_all(&text, "");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::internal(format!("failed to compile cleaning pattern: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn normalizer() -> MessageNormalizer {
        MessageNormalizer::new().unwrap()
    }

    #[test]
    fn test_clean_lowercases_and_strips_punctuation() {
        let n = normalizer();
        assert_eq!(n.clean("When are you OPEN???"), "when are you open");
        assert_eq!(n.clean("I can't log in!"), "i cant log in");
    }

    #[test]
    fn test_clean_strips_urls() {
        let n = normalizer();
        assert_eq!(
            n.clean("see https://example.com/docs?page=1 for details"),
            "see for details"
        );
        assert_eq!(n.clean("http://a.example.org"), "");
    }

    #[test]
    fn test_clean_strips_platform_markup() {
        let n = normalizer();
        assert_eq!(n.clean("<@138472> can you help?"), "can you help");
        assert_eq!(n.clean("thanks <:wave:9931> a lot"), "thanks a lot");
        assert_eq!(n.clean("join <#55512>!"), "join");
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        let n = normalizer();
        assert_eq!(n.clean("  what \t are\n\nyour   hours "), "what are your hours");
    }

    #[test]
    fn test_clean_can_empty_a_message() {
        let n = normalizer();
        assert_eq!(n.clean("???"), "");
        assert_eq!(n.clean("<@123> <#456>"), "");
        assert_eq!(n.clean("   "), "");
    }

    proptest! {
        #[test]
        fn test_clean_is_idempotent(raw in any::<String>()) {
            let n = normalizer();
            let once = n.clean(&raw);
            prop_assert_eq!(n.clean(&once), once);
        }
    }
}
