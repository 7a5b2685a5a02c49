use layered_clause::ClassifiedClause;

use super::Scorer;
use crate::score::{clamp_score, BandLabels, Breakdown};
use crate::signals::{AMBIGUITY_MARKERS, DISCRETION_MARKERS, HEDGE_WORDS, ILLEGAL_TERMS};
use crate::{ScoreBands, ScoreResult};

const LABELS: BandLabels = BandLabels {
    high: "High risk",
    mid: "Moderate risk",
    low: "Low risk",
};

/// Scores the exposure a clause creates: `risk = 1 - safety`.
///
/// Safety starts at 1.0 and each detected marker subtracts its penalty:
/// ambiguity markers ("reasonable", "as needed"), with hedges ("maybe",
/// "might") weighing heavier, one-sided discretion ("sole discretion") and
/// illegal-term patterns ("waive all rights").
///
/// The risk is the clamped sum of penalties; safety is only reported in the
/// breakdown, so a total on a band edge keeps its label.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    ambiguity_penalty: f64,
    hedge_penalty: f64,
    discretion_penalty: f64,
    illegal_penalty: f64,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self {
            ambiguity_penalty: 0.15,
            hedge_penalty: 0.35,
            discretion_penalty: 0.25,
            illegal_penalty: 0.40,
        }
    }
}

impl RiskScorer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scorer for RiskScorer {
    fn name(&self) -> &'static str {
        "risk"
    }

    fn score(&self, clause: &ClassifiedClause, bands: &ScoreBands) -> ScoreResult {
        let mut breakdown = Breakdown::default();

        let ambiguous = clause.count_phrases(AMBIGUITY_MARKERS);
        if ambiguous > 0 {
            breakdown.note(format!("{} ambiguity marker(s)", ambiguous));
        }
        let ambiguity = breakdown.component("ambiguity", ambiguous as f64 * self.ambiguity_penalty);

        let hedges = clause.count_phrases(HEDGE_WORDS);
        if hedges > 0 {
            breakdown.note(format!("{} hedge word(s)", hedges));
        }
        let hedging = breakdown.component("hedging", hedges as f64 * self.hedge_penalty);

        let one_sided = clause.count_phrases(DISCRETION_MARKERS);
        if one_sided > 0 {
            breakdown.note(format!("{} one-sided discretion phrase(s)", one_sided));
        }
        let discretion =
            breakdown.component("discretion", one_sided as f64 * self.discretion_penalty);

        let flagged = clause.count_phrases(ILLEGAL_TERMS);
        if flagged > 0 {
            breakdown.note(format!("{} potentially unenforceable term(s)", flagged));
        }
        let illegal = breakdown.component("illegal_terms", flagged as f64 * self.illegal_penalty);

        let risk = clamp_score(ambiguity + hedging + discretion + illegal);
        breakdown.component("safety", 1.0 - risk);
        breakdown.finish(risk, bands, &LABELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk(text: &str) -> ScoreResult {
        RiskScorer::default().score(&ClassifiedClause::from_text(text), &ScoreBands::default())
    }

    #[test]
    fn clean_binding_clause_is_safe() {
        let result = risk("The Buyer shall pay the invoice within thirty days.");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, "Low risk");
    }

    #[test]
    fn discretion_and_waiver_are_high_risk() {
        let result = risk(
            "The Company may terminate at any time in its sole discretion and the Employee waives all rights to appeal.",
        );
        assert!(result.score >= 0.7, "{:?}", result);
        assert_eq!(result.label, "High risk");
        assert!(result.notes.contains("one-sided discretion"));
        assert!(result.notes.contains("unenforceable"));
    }

    #[test]
    fn penalties_saturate() {
        let result = risk(
            "reasonable reasonable reasonable reasonable reasonable reasonable reasonable reasonable",
        );
        assert_eq!(result.score, 1.0);
        assert_eq!(result.component("safety"), Some(0.0));
    }

    #[test]
    fn penalties_on_the_low_edge_stay_low() {
        let result = risk("The Buyer shall pay a reasonable fee promptly.");
        assert_eq!(result.component("ambiguity"), Some(0.3));
        assert_eq!(result.score, 0.3);
        assert_eq!(result.label, "Low risk");
    }

    #[test]
    fn permissive_clause_is_not_risky() {
        let result = risk("Either party may terminate this Agreement upon written notice.");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, "Low risk");
        assert_eq!(result.notes, "no signals detected");
    }

    #[test]
    fn hedges_weigh_more_than_vague_qualifiers() {
        let hedged = risk("maybe something");
        let vague = risk("something reasonable");
        assert!(hedged.score > vague.score);
        assert!(hedged.notes.contains("1 hedge word(s)"));
    }

    #[test]
    fn empty_clause_is_safe() {
        let result = risk("");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.component("safety"), Some(1.0));
    }
}
