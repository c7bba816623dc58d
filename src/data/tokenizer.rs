// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// The one splitting rule shared by the vocabulary builder and
// the sequence encoder. If the two ever disagreed, words would
// be counted under one spelling and looked up under another.
//
// Rule:
//   1. Lowercase the whole text
//   2. Treat these characters as separators:
//        ! " # $ % & ( ) * + , - . / : ; < = > ? @ [ \ ] ^ _ ` { | } ~
//      plus every Unicode whitespace character
//   3. Keep the non-empty runs between separators
//
// Everything else stays inside a word, notably the apostrophe:
//   "Don't PANIC, it's 42!"  →  ["don't", "panic", "it's", "42"]
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

/// Punctuation treated as a word separator
pub const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~";

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || FILTERS.contains(c)
}

/// Split `text` into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_separator)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Don't PANIC, it's 42!"),
            vec!["don't", "panic", "it's", "42"]
        );
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(tokenize("e-mail:user@host.com"), vec!["e", "mail", "user", "host", "com"]);
    }

    #[test]
    fn test_all_whitespace_kinds_separate() {
        assert_eq!(tokenize("a\tb\nc\r\nd\u{00A0}e"), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("... !!! ???").is_empty());
    }

    #[test]
    fn test_non_ascii_letters_kept() {
        assert_eq!(tokenize("Café Über"), vec!["café", "über"]);
    }
}
