use layered_clause::ClassifiedClause;

use super::{saturating_ratio, Scorer};
use crate::score::{BandLabels, Breakdown};
use crate::signals::{
    has_binding_language, has_consideration, FORMALITY_MARKERS, PARTY_ROLES,
};
use crate::{ScoreBands, ScoreResult};

const LABELS: BandLabels = BandLabels {
    high: "Likely enforceable",
    mid: "Partially enforceable",
    low: "Unlikely enforceable",
};

/// Scores how likely a clause is to bind its parties.
///
/// The score starts at 0.0 and only grows with evidence, so a clause with no
/// binding signal scores near zero:
///
/// | component     | weight | full credit when                         |
/// |---------------|--------|------------------------------------------|
/// | binding       | 0.30   | "shall"/"must" or a binding verb         |
/// | consideration | 0.25   | payment vocabulary or a currency amount  |
/// | parties       | 0.25   | two or more party references             |
/// | formality     | 0.20   | two or more formal markers ("hereby")    |
#[derive(Debug, Clone)]
pub struct EnforceabilityScorer {
    binding_weight: f64,
    consideration_weight: f64,
    parties_weight: f64,
    formality_weight: f64,
    /// Credit for a bare "will" commitment
    future_commitment_credit: f64,
}

impl Default for EnforceabilityScorer {
    fn default() -> Self {
        Self {
            binding_weight: 0.30,
            consideration_weight: 0.25,
            parties_weight: 0.25,
            formality_weight: 0.20,
            future_commitment_credit: 0.5,
        }
    }
}

impl EnforceabilityScorer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scorer for EnforceabilityScorer {
    fn name(&self) -> &'static str {
        "enforceability"
    }

    fn score(&self, clause: &ClassifiedClause, bands: &ScoreBands) -> ScoreResult {
        let mut breakdown = Breakdown::default();

        let binding = if has_binding_language(clause) {
            breakdown.note("binding language");
            1.0
        } else if clause.contains_phrase("will") {
            breakdown.note("future commitment only (\"will\")");
            self.future_commitment_credit
        } else {
            0.0
        };
        let binding = breakdown.component("binding", binding);

        let consideration = if has_consideration(clause) {
            breakdown.note("consideration or payment");
            1.0
        } else {
            0.0
        };
        let consideration = breakdown.component("consideration", consideration);

        let party_hits = clause.count_phrases(PARTY_ROLES);
        if party_hits > 0 {
            breakdown.note(format!("{} party reference(s)", party_hits));
        }
        let parties = breakdown.component("parties", saturating_ratio(party_hits, 2));

        let formal_hits = clause.count_phrases(FORMALITY_MARKERS);
        if formal_hits > 0 {
            breakdown.note(format!("{} formality marker(s)", formal_hits));
        }
        let formality = breakdown.component("formality", saturating_ratio(formal_hits, 2));

        let score = self.binding_weight * binding
            + self.consideration_weight * consideration
            + self.parties_weight * parties
            + self.formality_weight * formality;
        breakdown.finish(score, bands, &LABELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enforceability(text: &str) -> ScoreResult {
        EnforceabilityScorer::default()
            .score(&ClassifiedClause::from_text(text), &ScoreBands::default())
    }

    #[test]
    fn hedged_clause_is_weak() {
        let result = enforceability("The party might consider doing something reasonable.");
        assert!(result.score < 0.3, "{:?}", result);
        assert_eq!(result.component("binding"), Some(0.0));
        assert_eq!(result.component("parties"), Some(0.5));
        assert_eq!(result.label, "Unlikely enforceable");
    }

    #[test]
    fn formal_paid_clause_is_strong() {
        let result = enforceability(
            "The Client shall pay the Contractor a fee of $5,000 pursuant to this agreement hereby executed by both parties.",
        );
        assert!(result.score >= 0.7, "{:?}", result);
        assert_eq!(result.component("binding"), Some(1.0));
        assert_eq!(result.component("consideration"), Some(1.0));
        assert_eq!(result.component("parties"), Some(1.0));
        assert_eq!(result.component("formality"), Some(1.0));
    }

    #[test]
    fn will_earns_partial_credit() {
        let result = enforceability("Vendor will ship the order.");
        assert_eq!(result.component("binding"), Some(0.5));
    }

    #[test]
    fn empty_clause_scores_zero() {
        let result = enforceability("");
        assert_eq!(result.score, 0.0);
    }
}
