//! Shared closed-class word lists.
//!
//! The classifier and the logic compiler both consult [`LEXICON`]; neither
//! keeps a private copy of these lists. Lookups are by lowercased, punctuation
//! stripped token text; a typographic apostrophe (`’`) matches a straight one.
//!
//! Contracted negatives ("won't", "isn't") sit on the negation list and on the
//! list of their base word, so tag precedence decides between them.

use std::borrow::Cow;
use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::Tag;

/// Negation markers. Highest classification precedence.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "cannot", "without", "nothing", "nobody",
    // modal contractions
    "won't", "can't", "shan't", "mustn't", "shouldn't", "couldn't", "wouldn't", "mightn't",
    // verb contractions
    "isn't", "aren't", "wasn't", "weren't", "doesn't", "don't", "didn't", "hasn't", "haven't",
    "hadn't",
];

/// Modal verbs, negated forms included.
const MODALS: &[&str] = &[
    "shall", "must", "will", "may", "might", "should", "could", "would", "can", "cannot",
    "won't", "can't", "shan't", "mustn't", "shouldn't", "couldn't", "wouldn't", "mightn't",
];

/// Modals that create a binding duty rather than a permission or a hedge.
/// A negated binding modal ("shan't") binds to a prohibition.
const BINDING_MODALS: &[&str] = &["shall", "must", "shan't", "mustn't"];

/// Copular and auxiliary verbs, negated forms included.
const VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do", "does",
    "did", "isn't", "aren't", "wasn't", "weren't", "doesn't", "don't", "didn't", "hasn't",
    "haven't", "hadn't",
];

/// Prepositions. These are the relators of the logic compiler.
const PREPOSITIONS: &[&str] = &[
    "of", "to", "in", "for", "on", "by", "with", "at", "from", "under", "within", "upon",
    "between", "into", "through", "after", "before", "during", "against", "among", "over",
    "throughout", "toward", "towards", "until",
];

/// Quantifiers.
const QUANTIFIERS: &[&str] = &[
    "all", "any", "each", "every", "some", "both", "either", "several", "many", "few", "most",
    "such",
];

/// Determiners, stripped when naming a phrase.
const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "its", "their", "his", "her", "our",
    "your", "such", "said",
];

/// Conjunctions, stripped when naming a phrase.
const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "if", "unless", "so", "yet", "whereas", "while", "because",
    "provided", "that",
];

/// Immutable lookup tables for closed-class words.
#[derive(Debug)]
pub struct Lexicon {
    negations: HashSet<&'static str>,
    modals: HashSet<&'static str>,
    binding_modals: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    prepositions: HashSet<&'static str>,
    quantifiers: HashSet<&'static str>,
    determiners: HashSet<&'static str>,
    conjunctions: HashSet<&'static str>,
}

/// The process-wide lexicon.
pub static LEXICON: Lazy<Lexicon> = Lazy::new(Lexicon::build);

impl Lexicon {
    fn build() -> Self {
        fn set(words: &[&'static str]) -> HashSet<&'static str> {
            words.iter().copied().collect()
        }

        Self {
            negations: set(NEGATIONS),
            modals: set(MODALS),
            binding_modals: set(BINDING_MODALS),
            verbs: set(VERBS),
            prepositions: set(PREPOSITIONS),
            quantifiers: set(QUANTIFIERS),
            determiners: set(DETERMINERS),
            conjunctions: set(CONJUNCTIONS),
        }
    }

    /// Tag a lowercased clean word.
    ///
    /// Precedence: negation > modal > verb > preposition > quantifier.
    /// An empty word is [`Tag::Garbage`]; anything unlisted is [`Tag::Other`].
    pub fn tag_for(&self, lower: &str) -> Tag {
        let folded = fold_apostrophes(lower);
        let lower: &str = &folded;
        if lower.is_empty() {
            Tag::Garbage
        } else if self.negations.contains(lower) {
            Tag::Neg
        } else if self.modals.contains(lower) {
            Tag::Modal
        } else if self.verbs.contains(lower) {
            Tag::Verb
        } else if self.prepositions.contains(lower) {
            Tag::Prep
        } else if self.quantifiers.contains(lower) {
            Tag::Quant
        } else {
            Tag::Other
        }
    }

    pub fn is_negation(&self, lower: &str) -> bool {
        self.negations.contains(&*fold_apostrophes(lower))
    }

    /// Any modal, including negated forms tagged [`Tag::Neg`].
    pub fn is_modal(&self, lower: &str) -> bool {
        self.modals.contains(&*fold_apostrophes(lower))
    }

    /// "shall" / "must" and their negated forms.
    pub fn is_binding_modal(&self, lower: &str) -> bool {
        self.binding_modals.contains(&*fold_apostrophes(lower))
    }

    pub fn is_relator(&self, lower: &str) -> bool {
        self.prepositions.contains(lower)
    }

    /// Determiners and conjunctions carry no entity name.
    pub fn is_function_word(&self, lower: &str) -> bool {
        self.determiners.contains(lower) || self.conjunctions.contains(lower)
    }
}

fn fold_apostrophes(word: &str) -> Cow<'_, str> {
    if word.contains('\u{2019}') {
        Cow::Owned(word.replace('\u{2019}', "'"))
    } else {
        Cow::Borrowed(word)
    }
}
