//! Single-pass tagging of a token sequence.

use serde::{Deserialize, Serialize};

use crate::{Tag, Token, LEXICON};

/// Per-tag counts over a classified clause.
///
/// Built in the same traversal that assigns tags, and shared by every scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStats {
    pub verb_count: usize,
    pub prep_count: usize,
    pub quant_count: usize,
    pub neg_count: usize,
    pub modal_count: usize,
    pub garbage_count: usize,
    pub total_count: usize,
}

impl TokenStats {
    fn record(&mut self, tag: Tag) {
        self.total_count += 1;
        match tag {
            Tag::Verb => self.verb_count += 1,
            Tag::Prep => self.prep_count += 1,
            Tag::Quant => self.quant_count += 1,
            Tag::Neg => self.neg_count += 1,
            Tag::Modal => self.modal_count += 1,
            Tag::Garbage => self.garbage_count += 1,
            Tag::Other => {}
        }
    }
}

/// Tagged tokens of one clause together with their [`TokenStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedClause {
    pub tokens: Vec<Token>,
    pub stats: TokenStats,
}

/// Assign a tag to every token and count tags, in exactly one pass.
pub fn classify<I>(tokens: I) -> ClassifiedClause
where
    I: IntoIterator<Item = Token>,
{
    let tokens = tokens.into_iter();
    let mut stats = TokenStats::default();
    let mut tagged = Vec::with_capacity(tokens.size_hint().0);

    for token in tokens {
        let tag = LEXICON.tag_for(&token.lower);
        stats.record(tag);
        tagged.push(token.with_tag(tag));
    }

    ClassifiedClause {
        tokens: tagged,
        stats,
    }
}

impl ClassifiedClause {
    /// Tokenize and classify `text`.
    pub fn from_text(text: &str) -> Self {
        classify(crate::tokenize(text))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Lowercased clean words, garbage tokens skipped.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens
            .iter()
            .filter(|t| !t.is_garbage())
            .map(|t| t.lower.as_str())
    }

    /// Number of occurrences of a lowercase, space-separated phrase over the
    /// clean words. Matches are whole words; occurrences may not overlap.
    pub fn count_phrase(&self, phrase: &str) -> usize {
        let needle: Vec<&str> = phrase.split_whitespace().collect();
        if needle.is_empty() {
            return 0;
        }
        let words: Vec<&str> = self.words().collect();

        let mut count = 0;
        let mut i = 0;
        while i + needle.len() <= words.len() {
            if words[i..i + needle.len()] == needle[..] {
                count += 1;
                i += needle.len();
            } else {
                i += 1;
            }
        }
        count
    }

    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.count_phrase(phrase) > 0
    }

    /// Total occurrences of any of `phrases`.
    pub fn count_phrases(&self, phrases: &[&str]) -> usize {
        phrases.iter().map(|p| self.count_phrase(p)).sum()
    }

    /// Number of binding modals ("shall", "must", "shan't").
    pub fn binding_modal_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| LEXICON.is_binding_modal(&t.lower))
            .count()
    }

    /// Number of modal words, counting negated modals that are tagged
    /// [`Tag::Neg`] ("won't") as well as [`Tag::Modal`] ones.
    pub fn modal_word_count(&self) -> usize {
        self.tokens.iter().filter(|t| LEXICON.is_modal(&t.lower)).count()
    }
}
