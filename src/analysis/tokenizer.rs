use std::sync::LazyLock;

use regex::Regex;

use crate::config::DEFAULT_MIN_WORD_LENGTH;

// ASCII punctuation, Chinese punctuation and ASCII digits.
static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"[!"#$%&'()*+,\-./:;<=>?@\[\\\]^_`{|}~，。！？；：“”‘’（）【】《》、0-9]"##)
        .expect("noise pattern is a valid regex")
});

pub fn is_noise_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    c.is_whitespace() || NOISE.is_match(c.encode_utf8(&mut buf))
}

/// Splits raw text into candidate words on punctuation, digits and whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    min_word_length: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_WORD_LENGTH)
    }
}

impl Tokenizer {
    pub fn new(min_word_length: usize) -> Self {
        Self { min_word_length }
    }

    /// Tokens come back in order of appearance, duplicates kept.
    /// Length is measured in characters, not bytes.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = NOISE.replace_all(text, " ");

        cleaned
            .split_whitespace()
            .filter(|word| word.chars().count() >= self.min_word_length)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_splits_on_punctuation_and_digits() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("今天，天气很好！2024年【北京】hello-world 42abc");

        assert_eq!(tokens, vec!["今天", "天气很好", "北京", "hello", "world", "abc"]);
    }

    #[test]
    fn test_only_ascii_digits_are_noise() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("２０２４年 ٣٤ 12ab"), vec!["２０２４年", "٣٤", "ab"]);
    }

    #[test]
    fn test_drops_short_tokens_and_keeps_duplicates() {
        let tokenizer = Tokenizer::default();
        let tokens = tokenizer.tokenize("猫 猫 狗 的 了 猫咪 a bb 猫咪");

        assert_eq!(tokens, vec!["猫咪", "bb", "猫咪"]);
    }

    #[test]
    fn test_single_char_words_survive_with_min_length_one() {
        let tokenizer = Tokenizer::new(1);
        assert_eq!(tokenizer.tokenize("猫 猫 狗 的 了"), vec!["猫", "猫", "狗", "的", "了"]);
    }

    #[test]
    fn test_all_noise_yields_nothing() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   \n\t ").is_empty());
        assert!(tokenizer.tokenize("，。！？ 123 ... ---").is_empty());
    }

    #[test]
    fn test_length_counts_characters() {
        // "é" is two bytes but one character.
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize("é 中").is_empty());
        assert_eq!(tokenizer.tokenize("éé"), vec!["éé"]);
    }

    proptest! {
        #[test]
        fn prop_tokens_are_long_enough_and_noise_free(text in "\\PC{0,200}") {
            let tokenizer = Tokenizer::default();
            for token in tokenizer.tokenize(&text) {
                prop_assert!(token.chars().count() >= 2);
                prop_assert!(!token.chars().any(is_noise_char), "noise in {:?}", token);
            }
        }

        #[test]
        fn prop_tokenize_is_repeatable(text in "[a-z猫狗的 ,。0-9]{0,80}") {
            let tokenizer = Tokenizer::default();
            prop_assert_eq!(tokenizer.tokenize(&text), tokenizer.tokenize(&text));
        }
    }
}
