use layered_clause::ClassifiedClause;

use super::Scorer;
use crate::score::{BandLabels, Breakdown};
use crate::signals::{has_enumeration, DEFINITION_MARKERS};
use crate::{ReadabilityBand, ScoreBands, ScoreResult};

const LABELS: BandLabels = BandLabels {
    high: "Clear",
    mid: "Moderately clear",
    low: "Unclear",
};

/// Scores how precisely a clause is drafted.
///
/// `clarity = w_r * readability + w_p * precision + w_s * structure`
///
/// - readability: 1.0 inside the target length band, falling off linearly
///   outside it
/// - precision: binding modals ("shall", "must") over all modals
/// - structure: a terminated sentence (0.4) plus enumeration or definition
///   markers (0.6)
#[derive(Debug, Clone)]
pub struct ClarityScorer {
    band: ReadabilityBand,
    readability_weight: f64,
    precision_weight: f64,
    structure_weight: f64,
}

impl Default for ClarityScorer {
    fn default() -> Self {
        Self {
            band: ReadabilityBand::default(),
            readability_weight: 0.40,
            precision_weight: 0.35,
            structure_weight: 0.25,
        }
    }
}

impl ClarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different target length band.
    pub fn with_band(band: ReadabilityBand) -> Self {
        Self {
            band,
            ..Self::default()
        }
    }

    fn readability(&self, token_count: usize) -> f64 {
        let min = self.band.min_tokens.max(1);
        let max = self.band.max_tokens.max(min);

        if token_count < min {
            token_count as f64 / min as f64
        } else if token_count <= max {
            1.0
        } else {
            (1.0 - (token_count - max) as f64 / max as f64).max(0.0)
        }
    }
}

impl Scorer for ClarityScorer {
    fn name(&self) -> &'static str {
        "clarity"
    }

    fn score(&self, clause: &ClassifiedClause, bands: &ScoreBands) -> ScoreResult {
        let mut breakdown = Breakdown::default();
        let stats = &clause.stats;

        let readability = breakdown.component("readability", self.readability(stats.total_count));
        if readability >= 1.0 {
            breakdown.note(format!("{} tokens, within target length", stats.total_count));
        } else if stats.total_count > 0 {
            breakdown.note(format!("{} tokens, outside target length", stats.total_count));
        }

        let binding = clause.binding_modal_count();
        let modals = clause.modal_word_count();
        let precision = if modals == 0 {
            0.0
        } else {
            binding as f64 / modals as f64
        };
        let precision = breakdown.component("precision", precision);
        if modals > 0 {
            breakdown.note(format!("{} of {} modals binding", binding, modals));
        }

        let terminated = clause.tokens.last().map_or(false, |t| t.ends_sentence());
        let has_markers = has_enumeration(clause)
            || clause.count_phrases(DEFINITION_MARKERS) > 0
            || clause.tokens.iter().any(|t| t.raw.ends_with(':'));
        let mut structure = 0.0;
        if terminated {
            structure += 0.4;
            breakdown.note("terminated sentence");
        }
        if has_markers {
            structure += 0.6;
            breakdown.note("enumeration or definition markers");
        }
        let structure = breakdown.component("structure", structure);

        let score = self.readability_weight * readability
            + self.precision_weight * precision
            + self.structure_weight * structure;
        breakdown.finish(score, bands, &LABELS)
    }
}
