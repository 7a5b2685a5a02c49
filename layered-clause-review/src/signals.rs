//! Contract vocabulary shared by the scorers and the rewrite engine.
//!
//! Grammatical word lists live in [`layered_clause::LEXICON`]; the lists here
//! are legal signals. Multi-word entries are matched as whole-word phrases
//! over the clause's clean lowercased words.

use once_cell::sync::Lazy;
use regex::Regex;

use layered_clause::{ClassifiedClause, Token};

/// Words naming a contracting party.
pub(crate) const PARTY_ROLES: &[&str] = &[
    "party", "parties", "client", "contractor", "consultant", "company", "customer", "vendor",
    "supplier", "buyer", "seller", "purchaser", "licensor", "licensee", "lessor", "lessee",
    "landlord", "tenant", "employer", "employee", "borrower", "lender", "provider", "recipient",
    "discloser", "partner", "partners", "guarantor", "contractors", "clients",
];

/// Verbs that bind without a modal ("Tenant agrees to ...").
pub(crate) const BINDING_VERBS: &[&str] = &[
    "agrees", "agree", "covenants", "covenant", "undertakes", "undertake", "warrants",
    "obligated", "obliged",
];

/// Payment and consideration vocabulary.
pub(crate) const PAYMENT_WORDS: &[&str] = &[
    "pay", "pays", "paid", "payment", "payments", "payable", "fee", "fees", "consideration",
    "compensation", "price", "remuneration", "salary", "wages", "rent", "royalty", "royalties",
    "invoice", "dollars",
];

/// Words establishing a duration or term.
pub(crate) const TERM_WORDS: &[&str] = &[
    "term", "days", "months", "years", "period", "duration", "weeks", "renewal",
];

/// Formal drafting markers.
pub(crate) const FORMALITY_MARKERS: &[&str] = &[
    "pursuant to",
    "hereby",
    "hereto",
    "herein",
    "hereunder",
    "hereof",
    "whereas",
    "notwithstanding",
    "in accordance with",
    "executed",
    "witnesseth",
    "in witness whereof",
    "governed by",
];

/// Vague qualifiers.
pub(crate) const AMBIGUITY_MARKERS: &[&str] = &[
    "reasonable",
    "reasonably",
    "as needed",
    "as appropriate",
    "as necessary",
    "from time to time",
    "best efforts",
    "promptly",
    "approximately",
    "substantially",
    "material",
    "etc",
    "adequate",
    "satisfactory",
    "timely",
];

/// Hedges that withhold commitment altogether.
pub(crate) const HEDGE_WORDS: &[&str] = &["maybe", "might", "perhaps", "possibly", "mightn't"];

/// Phrases granting one party unchecked discretion.
pub(crate) const DISCRETION_MARKERS: &[&str] = &[
    "sole discretion",
    "absolute discretion",
    "at any time",
    "for any reason",
    "without notice",
    "without cause",
    "unilaterally",
    "in its discretion",
];

/// Terms that are commonly unenforceable or unconscionable.
pub(crate) const ILLEGAL_TERMS: &[&str] = &[
    "waive all rights",
    "waives all rights",
    "waives any right",
    "waive any right",
    "unlimited liability",
    "regardless of negligence",
    "including gross negligence",
    "no liability whatsoever",
    "forfeit all",
    "in perpetuity",
    "irrevocably waives",
];

/// Termination vocabulary.
pub(crate) const TERMINATION_WORDS: &[&str] = &[
    "terminate",
    "terminates",
    "terminated",
    "termination",
    "expire",
    "expires",
    "expiration",
    "expiry",
    "cancel",
    "cancellation",
];

/// Governing-law vocabulary.
pub(crate) const GOVERNING_LAW: &[&str] = &[
    "governed by",
    "governing law",
    "laws of",
    "jurisdiction",
    "construed in accordance",
];

/// Words introducing a definition or a list.
pub(crate) const DEFINITION_MARKERS: &[&str] = &[
    "means", "includes", "including", "defined", "hereinafter", "following",
];

static CURRENCY_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[("\[]?(?:[$€£¥]|USD|EUR|GBP)\d"#).unwrap());

static LETTERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\((?:[a-z]|[ivxlc]{1,6})\)|[a-z]\))[,;:]?$").unwrap());

static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\(\d{1,3}\)|\d{1,3}\)|\d{1,3}(?:\.\d{1,3})*\.)[,;:]?$").unwrap()
});

/// Whether a raw token is a currency-prefixed number ("$5,000", "USD100").
pub(crate) fn is_currency_amount(token: &Token) -> bool {
    CURRENCY_AMOUNT.is_match(&token.raw)
}

/// Whether the clause carries list markers.
///
/// Lettered markers ("(a)", "(iv)", "b)") count anywhere. Numbered ones
/// ("(1)", "2.1.") count only in a list position, so "thirty (30) days"
/// is not a list.
pub(crate) fn has_enumeration(clause: &ClassifiedClause) -> bool {
    let tokens = &clause.tokens;
    tokens.iter().enumerate().any(|(i, token)| {
        if LETTERED_ITEM.is_match(&token.raw) {
            return true;
        }
        NUMBERED_ITEM.is_match(&token.raw) && (i == 0 || opens_list_item(&tokens[i - 1]))
    })
}

fn opens_list_item(previous: &Token) -> bool {
    previous.raw.ends_with(&[':', ';'][..]) || matches!(previous.lower.as_str(), "and" | "or")
}

/// Binding language: a binding modal or a binding verb.
pub(crate) fn has_binding_language(clause: &ClassifiedClause) -> bool {
    clause.binding_modal_count() > 0 || clause.count_phrases(BINDING_VERBS) > 0
}

/// Payment vocabulary or a currency amount.
pub(crate) fn has_consideration(clause: &ClassifiedClause) -> bool {
    clause.count_phrases(PAYMENT_WORDS) > 0 || clause.tokens.iter().any(is_currency_amount)
}
