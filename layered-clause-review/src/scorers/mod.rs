//! The four clause scorers.
//!
//! Each scorer is a pure function of a [`ClassifiedClause`]: none reads
//! another scorer's output or keeps state between calls, and all of them
//! are total over any classified input, including the empty clause.

use layered_clause::ClassifiedClause;

use crate::{ScoreBands, ScoreResult};

mod clarity;
mod completeness;
mod enforceability;
mod risk;

pub use clarity::ClarityScorer;
pub use completeness::{CompletenessScorer, EssentialElement};
pub use enforceability::EnforceabilityScorer;
pub use risk::RiskScorer;

/// A single scoring dimension.
pub trait Scorer {
    /// Stable identifier, used in logs.
    fn name(&self) -> &'static str;

    fn score(&self, clause: &ClassifiedClause, bands: &ScoreBands) -> ScoreResult;
}

/// `(clarity + enforceability + (1 - risk) + completeness) / 4`.
///
/// Each term is within `[0, 1]`, so the mean is too.
pub fn overall_quality(
    clarity: &ScoreResult,
    enforceability: &ScoreResult,
    risk: &ScoreResult,
    completeness: &ScoreResult,
) -> f64 {
    (clarity.score + enforceability.score + (1.0 - risk.score) + completeness.score) / 4.0
}

/// Fraction `hits / needed`, capped at 1.
pub(crate) fn saturating_ratio(hits: usize, needed: usize) -> f64 {
    if needed == 0 {
        return 1.0;
    }
    (hits as f64 / needed as f64).min(1.0)
}
