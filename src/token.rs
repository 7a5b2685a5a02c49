//! Whitespace tokenization of clause text.

use serde::{Deserialize, Serialize};

/// Grammatical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tag {
    /// Copular or auxiliary verb ("is", "has")
    Verb,
    /// Preposition ("of", "to"); a relator in logic compilation
    Prep,
    /// Quantifier ("each", "all")
    Quant,
    /// Negation marker ("not", "never")
    Neg,
    /// Modal verb ("shall", "may")
    Modal,
    /// Token with no lexical content ("--", "§")
    Garbage,
    /// Anything else
    Other,
}

/// A single whitespace-delimited unit of a clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Text as written, punctuation included
    pub raw: String,
    /// `raw` with leading and trailing punctuation stripped
    pub clean: String,
    /// Lowercased `clean`
    pub lower: String,
    pub tag: Tag,
}

impl Token {
    /// Build an untagged token from raw text.
    ///
    /// The tag is [`Tag::Garbage`] when nothing lexical remains after stripping
    /// punctuation and [`Tag::Other`] otherwise; the classifier assigns the
    /// final tag.
    pub fn new(raw: &str) -> Self {
        let clean = raw.trim_matches(|c: char| !c.is_alphanumeric());
        Self {
            raw: raw.to_string(),
            clean: clean.to_string(),
            lower: clean.to_lowercase(),
            tag: if clean.is_empty() { Tag::Garbage } else { Tag::Other },
        }
    }

    pub fn is_garbage(&self) -> bool {
        self.clean.is_empty()
    }

    /// Whether the raw text ends a clause or sub-clause (`.`, `;`, `:`).
    pub fn ends_sentence(&self) -> bool {
        self.raw.ends_with(&['.', ';', ':'][..])
    }

    pub(crate) fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lazy token sequence over a clause.
///
/// Cloning the iterator restarts it from the clone point; the sequence is
/// finite and always yields tokens in source order.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.words.next().map(Token::new)
    }
}

/// Split a clause into tokens.
///
/// Whitespace runs never produce empty tokens, so this is equivalent to
/// tokenizing `normalize(text)`. Empty or all-whitespace input yields an empty
/// sequence.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        words: text.split_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_surrounding_punctuation() {
        let tokens: Vec<Token> = tokenize(r#"(the "Supplier"), $5,000.00;"#).collect();
        let cleans: Vec<&str> = tokens.iter().map(|t| t.clean.as_str()).collect();
        assert_eq!(cleans, vec!["the", "Supplier", "5,000.00"]);
        assert_eq!(tokens[1].raw, r#""Supplier"),"#);
        assert_eq!(tokens[1].lower, "supplier");
    }

    #[test]
    fn garbage_tokens() {
        let tokens: Vec<Token> = tokenize("Fees -- §").collect();
        assert!(!tokens[0].is_garbage());
        assert!(tokens[1].is_garbage());
        assert!(tokens[2].is_garbage());
        assert_eq!(tokens[2].tag, Tag::Garbage);
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize(" \t\n ").count(), 0);
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  The\tParty \n\n shall  "), "The Party shall");
    }

    #[test]
    fn restartable() {
        let tokens = tokenize("a b c");
        let first: Vec<Token> = tokens.clone().collect();
        let second: Vec<Token> = tokens.collect();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn tokenize_normalized_is_idempotent(text in "\\PC{0,80}") {
            let once = normalize(&text);
            let twice = normalize(&once);
            let a: Vec<Token> = tokenize(&twice).collect();
            let b: Vec<Token> = tokenize(&once).collect();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn non_blank_input_yields_tokens(text in "[a-z ]{0,10}[a-z][a-z ]{0,10}") {
            prop_assert!(tokenize(&text).count() > 0);
        }
    }
}
