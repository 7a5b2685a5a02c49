use serde::{Deserialize, Serialize};

use layered_clause::ClassifiedClause;

use super::Scorer;
use crate::score::{BandLabels, Breakdown};
use crate::signals::{
    has_binding_language, has_consideration, GOVERNING_LAW, PARTY_ROLES, TERMINATION_WORDS,
    TERM_WORDS,
};
use crate::{ScoreBands, ScoreResult};

const LABELS: BandLabels = BandLabels {
    high: "Complete",
    mid: "Partially complete",
    low: "Incomplete",
};

/// The fixed checklist of elements a self-contained provision carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EssentialElement {
    Parties,
    Obligation,
    /// Consideration or a defined term of performance
    ConsiderationOrTerm,
    Termination,
    GoverningLaw,
}

impl EssentialElement {
    pub const ALL: [EssentialElement; 5] = [
        EssentialElement::Parties,
        EssentialElement::Obligation,
        EssentialElement::ConsiderationOrTerm,
        EssentialElement::Termination,
        EssentialElement::GoverningLaw,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EssentialElement::Parties => "parties",
            EssentialElement::Obligation => "obligation",
            EssentialElement::ConsiderationOrTerm => "consideration_or_term",
            EssentialElement::Termination => "termination",
            EssentialElement::GoverningLaw => "governing_law",
        }
    }

    /// Whether the clause contains this element.
    pub fn is_present(&self, clause: &ClassifiedClause) -> bool {
        match self {
            EssentialElement::Parties => clause.count_phrases(PARTY_ROLES) > 0,
            EssentialElement::Obligation => has_binding_language(clause),
            EssentialElement::ConsiderationOrTerm => {
                has_consideration(clause) || clause.count_phrases(TERM_WORDS) > 0
            }
            EssentialElement::Termination => clause.count_phrases(TERMINATION_WORDS) > 0,
            EssentialElement::GoverningLaw => clause.count_phrases(GOVERNING_LAW) > 0,
        }
    }
}

/// `completeness = present elements / required elements`.
#[derive(Debug, Clone, Default)]
pub struct CompletenessScorer;

impl CompletenessScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Scorer for CompletenessScorer {
    fn name(&self) -> &'static str {
        "completeness"
    }

    fn score(&self, clause: &ClassifiedClause, bands: &ScoreBands) -> ScoreResult {
        let mut breakdown = Breakdown::default();
        let mut present = 0;
        let mut missing = Vec::new();

        for element in EssentialElement::ALL {
            if element.is_present(clause) {
                present += 1;
                breakdown.component(element.key(), 1.0);
            } else {
                missing.push(element.key());
                breakdown.component(element.key(), 0.0);
            }
        }

        breakdown.note(format!("{} of {} essential elements", present, EssentialElement::ALL.len()));
        if !missing.is_empty() {
            breakdown.note(format!("missing: {}", missing.join(", ")));
        }

        let score = present as f64 / EssentialElement::ALL.len() as f64;
        breakdown.finish(score, bands, &LABELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completeness(text: &str) -> ScoreResult {
        CompletenessScorer.score(&ClassifiedClause::from_text(text), &ScoreBands::default())
    }

    #[test]
    fn full_checklist() {
        let result = completeness(
            "The Client shall pay the fee; either party may terminate on notice; this Agreement is governed by the laws of Ohio.",
        );
        assert_eq!(result.score, 1.0);
        assert_eq!(result.label, "Complete");
        assert!(!result.notes.contains("missing"));
    }

    #[test]
    fn reports_missing_elements() {
        let result = completeness("The Client shall pay the fee.");
        assert!((result.score - 0.6).abs() < 1e-9);
        assert!(result.notes.contains("missing: termination, governing_law"));
        assert_eq!(result.component("termination"), Some(0.0));
    }

    #[test]
    fn empty_clause() {
        let result = completeness("");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, "Incomplete");
    }
}
