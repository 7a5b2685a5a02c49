//! Entity extraction: parties, dates, amounts and obligation phrases.
//!
//! Each family is an independent pass over the clause's raw (case-preserving)
//! text. Within one pass a token contributes to at most one match; separate
//! passes may re-scan the same text. Every list is ordered by first
//! occurrence and holds no duplicates.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use layered_clause::{ClassifiedClause, LEXICON};

use crate::signals::PARTY_ROLES;

/// Entities found in one clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    pub parties: Vec<String>,
    pub dates: Vec<String>,
    pub amounts: Vec<String>,
    pub obligations: Vec<String>,
}

impl EntitySet {
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
            && self.dates.is_empty()
            && self.amounts.is_empty()
            && self.obligations.is_empty()
    }
}

const CAPITALIZED_SPAN: &str = r"((?:[A-Z][\w&.'-]*\s+)*[A-Z][\w&.'-]*)";

/// `Acme Corp. (the "Supplier")`
static DEFINED_PARTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"{}\s*,?\s*\((?:the\s+)?["“]([^"”]+)["”]\)"#,
        CAPITALIZED_SPAN
    ))
    .unwrap()
});

/// `Acme Corp., hereinafter referred to as the "Supplier"`
static HEREINAFTER_PARTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"{},?\s+hereinafter\s+(?:referred\s+to\s+as\s+)?(?:the\s+)?["“]?([A-Z][\w-]*)["”]?"#,
        CAPITALIZED_SPAN
    ))
    .unwrap()
});

/// A capitalized role word such as "Client" or "Licensee".
static ROLE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+)\b").unwrap());

static DATE: Lazy<Regex> = Lazy::new(|| {
    const MONTH: &str = "(?:January|February|March|April|May|June|July|August|September|October|November|December)";
    Regex::new(&format!(
        r"\b(?:{m}\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:day\s+of\s+)?{m},?\s+\d{{4}}|\d{{4}}-\d{{2}}-\d{{2}}|\d{{1,2}}/\d{{1,2}}/\d{{2,4}})\b",
        m = MONTH
    ))
    .unwrap()
});

static AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[$€£¥]\s?|\b(?:USD|EUR|GBP)\s?)\d[\d,]*(?:\.\d+)?(?:\s(?:million|billion|thousand)\b)?|\b\d[\d,]*(?:\.\d+)?\s(?:dollars|euros|pounds)\b",
    )
    .unwrap()
});

/// Longest obligation phrase, in tokens after the modal.
const MAX_OBLIGATION_TOKENS: usize = 16;

/// Punctuation closing an obligation span.
const SPAN_END: &[char] = &['.', ';', ':', ','];

/// Leading words dropped from a captured party name.
const LEADING_ARTICLES: &[&str] = &["The", "This", "Each", "Either", "Such", "Said"];

/// Byte ranges already claimed within one pass.
#[derive(Default)]
struct Claims(Vec<Range<usize>>);

impl Claims {
    /// Claim `range` unless it overlaps an earlier claim.
    fn claim(&mut self, range: Range<usize>) -> bool {
        if self
            .0
            .iter()
            .any(|r| r.start < range.end && range.start < r.end)
        {
            return false;
        }
        self.0.push(range);
        true
    }
}

/// Pattern-based entity extraction.
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, clause: &ClassifiedClause) -> EntitySet {
        let text = clause
            .tokens
            .iter()
            .map(|t| t.raw.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        EntitySet {
            parties: self.parties(&text),
            dates: simple_pass(&DATE, &text),
            amounts: simple_pass(&AMOUNT, &text),
            obligations: self.obligations(clause),
        }
    }

    fn parties(&self, text: &str) -> Vec<String> {
        let mut claims = Claims::default();
        let mut found: Vec<(usize, String)> = Vec::new();

        for caps in DEFINED_PARTY.captures_iter(text) {
            claim_defined_party(&caps, text, &mut claims, &mut found);
        }
        for caps in HEREINAFTER_PARTY.captures_iter(text) {
            claim_defined_party(&caps, text, &mut claims, &mut found);
        }

        for m in ROLE_WORD.find_iter(text) {
            let lower = m.as_str().to_lowercase();
            if PARTY_ROLES.contains(&lower.as_str()) && claims.claim(m.range()) {
                found.push((m.start(), m.as_str().to_string()));
            }
        }

        first_occurrence_order(found)
    }

    /// Spans anchored on a binding modal, through the end of the sub-clause.
    fn obligations(&self, clause: &ClassifiedClause) -> Vec<String> {
        let tokens = &clause.tokens;
        let mut found = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let anchor = &tokens[i];
            // A modal closing its own sub-clause ("shall.") has nothing to bind.
            if !LEXICON.is_binding_modal(&anchor.lower) || anchor.raw.ends_with(SPAN_END) {
                i += 1;
                continue;
            }

            let mut words = vec![anchor.clean.as_str()];
            let mut end = i + 1;
            while end < tokens.len() && end - i <= MAX_OBLIGATION_TOKENS {
                let token = &tokens[end];
                if LEXICON.is_modal(&token.lower) {
                    break;
                }
                end += 1;
                if token.raw.ends_with(SPAN_END) {
                    words.push(token.raw.trim_end_matches(SPAN_END));
                    break;
                }
                words.push(token.raw.as_str());
            }

            // A modal alone is not an obligation.
            if words.len() > 1 {
                let phrase = words.join(" ");
                if !found.contains(&phrase) {
                    found.push(phrase);
                }
            }
            i = end;
        }

        found
    }
}

/// Record a party name and its defined term, unless the match overlaps an
/// earlier one.
fn claim_defined_party(
    caps: &Captures<'_>,
    text: &str,
    claims: &mut Claims,
    found: &mut Vec<(usize, String)>,
) {
    let (Some(whole), Some(name), Some(term)) = (caps.get(0), caps.get(1), caps.get(2)) else {
        return;
    };
    if !claims.claim(whole.range()) {
        return;
    }
    if let Some(name) = strip_leading_articles(name.as_str()) {
        found.push((name_start(name, whole.start(), text), name.to_string()));
    }
    found.push((term.start(), term.as_str().trim().to_string()));
}

fn simple_pass(pattern: &Regex, text: &str) -> Vec<String> {
    let found = pattern
        .find_iter(text)
        .map(|m| {
            let value = m.as_str().trim_end_matches(&[',', '.'][..]);
            (m.start(), value.to_string())
        })
        .collect();
    first_occurrence_order(found)
}

fn strip_leading_articles(name: &str) -> Option<&str> {
    let mut rest = name.trim();
    loop {
        let Some((first, tail)) = rest.split_once(char::is_whitespace) else {
            break;
        };
        if !LEADING_ARTICLES.contains(&first) {
            break;
        }
        rest = tail.trim_start();
    }
    if rest.is_empty() || LEADING_ARTICLES.contains(&rest) {
        None
    } else {
        Some(rest)
    }
}

/// Byte offset of a (possibly stripped) name inside its match.
fn name_start(name: &str, match_start: usize, text: &str) -> usize {
    text[match_start..]
        .find(name)
        .map_or(match_start, |offset| match_start + offset)
}

fn first_occurrence_order(mut found: Vec<(usize, String)>) -> Vec<String> {
    found.sort_by_key(|(start, _)| *start);
    let mut out: Vec<String> = Vec::with_capacity(found.len());
    for (_, value) in found {
        if !value.is_empty() && !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> EntitySet {
        EntityExtractor::new().extract(&ClassifiedClause::from_text(text))
    }

    #[test]
    fn defined_party_and_role() {
        let entities = extract(
            r#"Acme Widgets Inc. (the "Supplier") shall deliver the goods to the Buyer."#,
        );
        assert_eq!(entities.parties, vec!["Acme Widgets Inc.", "Supplier", "Buyer"]);
    }

    #[test]
    fn hereinafter_party() {
        let entities = extract(
            r#"Globex LLC, hereinafter referred to as the "Licensor", grants a license."#,
        );
        assert_eq!(entities.parties, vec!["Globex LLC", "Licensor"]);
    }

    #[test]
    fn role_words_in_order() {
        let entities = extract(
            "The Client shall pay the Contractor a fee of $5,000 pursuant to this agreement hereby executed by both parties.",
        );
        assert_eq!(entities.parties, vec!["Client", "Contractor"]);
        assert_eq!(entities.amounts, vec!["$5,000"]);
    }

    #[test]
    fn dates_and_amounts() {
        let entities = extract(
            "Payment of USD 12,500.50 is due on March 1, 2025, and a further 300 dollars on 2025-06-30 or 7/1/2025.",
        );
        assert_eq!(entities.dates, vec!["March 1, 2025", "2025-06-30", "7/1/2025"]);
        assert_eq!(entities.amounts, vec!["USD 12,500.50", "300 dollars"]);
    }

    #[test]
    fn ordinal_dates() {
        let entities = extract("Signed on the 3rd day of May, 2024 by the Tenant.");
        assert_eq!(entities.dates, vec!["3rd day of May, 2024"]);
        assert_eq!(entities.parties, vec!["Tenant"]);
    }

    #[test]
    fn obligations_stop_at_clause_punctuation() {
        let entities = extract(
            "The Tenant shall pay rent monthly, and the Landlord must not enter the premises; notices may be emailed.",
        );
        assert_eq!(
            entities.obligations,
            vec!["shall pay rent monthly", "must not enter the premises"]
        );
    }

    #[test]
    fn obligation_stops_at_next_modal() {
        let entities = extract("Buyer shall inspect and may reject the goods.");
        assert_eq!(entities.obligations, vec!["shall inspect and"]);
    }

    #[test]
    fn contracted_prohibitions() {
        let entities = extract("The Tenant shan't sublet the premises. Licensee mustn\u{2019}t assign.");
        assert_eq!(
            entities.obligations,
            vec!["shan't sublet the premises", "mustn\u{2019}t assign"]
        );
    }

    #[test]
    fn modal_ending_a_sentence_binds_nothing() {
        let entities = extract("The Tenant shall. Pay rent to the Landlord.");
        assert!(entities.obligations.is_empty(), "{:?}", entities.obligations);
    }

    #[test]
    fn nothing_to_extract() {
        assert!(extract("maybe something").is_empty());
        assert!(extract("").is_empty());
    }
}
