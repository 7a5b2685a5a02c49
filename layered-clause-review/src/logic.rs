//! Compiles a clause into a conjunction of binary relations.
//!
//! Tokens are grouped into alternating segments: a maximal run of
//! non-preposition tokens is a phrase, each preposition is a relator of its
//! own. A relator followed by a phrase links the entity of the previous
//! phrase to the entity of the next one:
//!
//! ```text
//! payment | of | the fee | to | the Contractor
//!   => Of(payment, fee) ∧ To(fee, contractor)
//! ```

use serde::{Deserialize, Serialize};

use layered_clause::{ClassifiedClause, Token, LEXICON};

use crate::ReviewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Phrase,
    Relator,
}

/// A contiguous run of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub tokens: &'a [Token],
}

/// Result of [`compile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicFormula {
    /// Distinct entity names, in order of first appearance
    pub entities: Vec<String>,
    /// `Relator(source, target)`
    pub relations: Vec<String>,
    pub formula: String,
}

/// Formula of a clause with no entities at all.
pub const EMPTY_FORMULA: &str = "⊤";

const CONJUNCTION: &str = " ∧ ";

fn is_relator(token: &Token) -> bool {
    LEXICON.is_relator(&token.lower)
}

/// Split tokens into phrase and relator segments.
pub fn segment(tokens: &[Token]) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut phrase_start = 0;

    for (idx, token) in tokens.iter().enumerate() {
        if !is_relator(token) {
            continue;
        }
        if phrase_start < idx {
            segments.push(Segment {
                kind: SegmentKind::Phrase,
                tokens: &tokens[phrase_start..idx],
            });
        }
        segments.push(Segment {
            kind: SegmentKind::Relator,
            tokens: &tokens[idx..=idx],
        });
        phrase_start = idx + 1;
    }
    if phrase_start < tokens.len() {
        segments.push(Segment {
            kind: SegmentKind::Phrase,
            tokens: &tokens[phrase_start..],
        });
    }

    segments
}

/// Identifier for a phrase: its last content word, lowercased and reduced
/// to `[a-z0-9_]`. A name starting with a digit is prefixed with `n`; a
/// phrase with no usable word is named `x{fallback_index}`.
pub fn entity_name(phrase: &[Token], fallback_index: usize) -> String {
    let head = phrase
        .iter()
        .rev()
        .filter(|t| !t.is_garbage() && !LEXICON.is_function_word(&t.lower))
        .map(|t| sanitize(&t.lower))
        .find(|name| !name.is_empty());

    match head {
        Some(name) if name.starts_with(|c: char| c.is_ascii_digit()) => format!("n{}", name),
        Some(name) => name,
        None => format!("x{}", fallback_index),
    }
}

fn sanitize(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

fn push_unique(entities: &mut Vec<String>, name: &str) {
    if !entities.iter().any(|e| e == name) {
        entities.push(name.to_string());
    }
}

fn relation_name(relator: &Segment<'_>) -> String {
    let word = relator.tokens.first().map_or("", |t| t.lower.as_str());
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Compile a classified clause.
pub fn compile(clause: &ClassifiedClause) -> LogicFormula {
    compile_segments(&segment(&clause.tokens))
}

fn compile_segments(segments: &[Segment<'_>]) -> LogicFormula {
    let mut entities: Vec<String> = Vec::new();
    let mut relations = Vec::new();
    let mut previous: Option<String> = None;

    // Invariant: every segment before `i` has been consumed exactly once.
    // Each step advances `i` by 2 for a relator with its following phrase,
    // and by 1 otherwise.
    let mut i = 0;
    while i < segments.len() {
        let current = &segments[i];
        match current.kind {
            SegmentKind::Phrase => {
                let name = entity_name(current.tokens, i);
                push_unique(&mut entities, &name);
                previous = Some(name);
                i += 1;
            }
            SegmentKind::Relator => {
                let Some(source) = previous.take() else {
                    log::debug!("{}", ReviewError::MalformedSegment { index: i });
                    i += 1;
                    continue;
                };
                match segments.get(i + 1) {
                    Some(next) if next.kind == SegmentKind::Phrase => {
                        let target = entity_name(next.tokens, i + 1);
                        push_unique(&mut entities, &target);
                        relations.push(format!("{}({}, {})", relation_name(current), source, target));
                        previous = Some(target);
                        i += 2;
                    }
                    _ => {
                        // Dangling relator: keep the source for a later relator.
                        previous = Some(source);
                        i += 1;
                    }
                }
            }
        }
    }

    let formula = if !relations.is_empty() {
        relations.join(CONJUNCTION)
    } else if !entities.is_empty() {
        entities.join(CONJUNCTION)
    } else {
        EMPTY_FORMULA.to_string()
    };

    LogicFormula {
        entities,
        relations,
        formula,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logic(text: &str) -> LogicFormula {
        compile(&ClassifiedClause::from_text(text))
    }

    #[test]
    fn segments_alternate() {
        let clause = ClassifiedClause::from_text("payment of the fee to the Contractor");
        let kinds: Vec<_> = segment(&clause.tokens)
            .iter()
            .map(|s| (s.kind, s.tokens.len()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (SegmentKind::Phrase, 1),
                (SegmentKind::Relator, 1),
                (SegmentKind::Phrase, 2),
                (SegmentKind::Relator, 1),
                (SegmentKind::Phrase, 2),
            ]
        );
    }

    #[test]
    fn chained_relations() {
        let formula = logic("payment of the fee to the Contractor");
        assert_eq!(formula.entities, vec!["payment", "fee", "contractor"]);
        assert_eq!(formula.relations, vec!["Of(payment, fee)", "To(fee, contractor)"]);
        assert_eq!(formula.formula, "Of(payment, fee) ∧ To(fee, contractor)");
    }

    #[test]
    fn leading_relator_is_skipped() {
        let formula = logic("of the fee");
        assert_eq!(formula.entities, vec!["fee"]);
        assert!(formula.relations.is_empty());
        assert_eq!(formula.formula, "fee");
    }

    #[test]
    fn trailing_relator_emits_nothing() {
        let formula = logic("payment of");
        assert_eq!(formula.entities, vec!["payment"]);
        assert!(formula.relations.is_empty());
        assert_eq!(formula.formula, "payment");
    }

    #[test]
    fn adjacent_relators() {
        let formula = logic("rent to of the Landlord");
        assert_eq!(formula.relations, vec!["Of(rent, landlord)"]);
    }

    #[test]
    fn empty_clause() {
        let formula = logic("");
        assert!(formula.entities.is_empty());
        assert_eq!(formula.formula, EMPTY_FORMULA);
    }

    #[test]
    fn entity_names() {
        let clause = ClassifiedClause::from_text("the Contractor's -- 30 the and");
        let tokens = &clause.tokens;
        assert_eq!(entity_name(&tokens[0..2], 0), "contractors");
        assert_eq!(entity_name(&tokens[0..4], 0), "n30");
        assert_eq!(entity_name(&tokens[4..6], 7), "x7");
        assert_eq!(entity_name(&[], 2), "x2");
    }

    #[test]
    fn positional_fallback_names() {
        let formula = logic("the of a");
        assert_eq!(formula.relations, vec!["Of(x0, x2)"]);
    }

    #[test]
    fn duplicate_entities_listed_once() {
        let formula = logic("notice to Tenant of notice");
        assert_eq!(formula.entities, vec!["notice", "tenant"]);
        assert_eq!(formula.relations, vec!["To(notice, tenant)", "Of(tenant, notice)"]);
    }
}
