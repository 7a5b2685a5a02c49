#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Token layer for legal clause analysis.
//!
//! - [`tokenize`] / [`normalize`] - whitespace tokenization with raw, clean and
//!   lowercased forms
//! - [`classify`] - single-pass tagging into [`Tag`]s, accumulating [`TokenStats`]
//! - [`LEXICON`] - the shared closed-class word lists
//! - [`ClauseDisplay`] - renders tags and labelled spans under the clause text
//!
//! ## Example
//!
//! ```
//! use layered_clause::{ClassifiedClause, Tag};
//!
//! let clause = ClassifiedClause::from_text("The Tenant shall not sublet the premises.");
//! assert_eq!(clause.tokens[2].tag, Tag::Modal);
//! assert_eq!(clause.stats.neg_count, 1);
//! ```

mod classifier;
mod display;
mod lexicon;
mod token;

pub use classifier::{classify, ClassifiedClause, TokenStats};
pub use display::{ClauseDisplay, SpanRef};
pub use lexicon::{Lexicon, LEXICON};
pub use token::{normalize, tokenize, Tag, Token, Tokens};
