//! [`ScoreResult`] and the band labelling shared by all scorers.
//!
//! A score is always within `[0, 1]`. Its label is a pure function of the
//! score and the configured [`ScoreBands`]:
//! - `score >= high` -> high-band label
//! - `score <= low` -> low-band label
//! - otherwise -> mid-band label

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ScoreBands;

/// Clamp a value to `[0, 1]`, mapping NaN to 0 and infinities to the nearest bound.
#[inline]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to 0.0");
        return 0.0;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { 1.0 } else { 0.0 };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.1}");
        return boundary;
    }
    value.clamp(0.0, 1.0)
}

/// Which band a score falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    High,
    Mid,
    Low,
}

impl ScoreBand {
    pub fn of(score: f64, bands: &ScoreBands) -> Self {
        if score >= bands.high {
            ScoreBand::High
        } else if score <= bands.low {
            ScoreBand::Low
        } else {
            ScoreBand::Mid
        }
    }
}

/// Human-readable labels for the three bands of one scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandLabels {
    pub high: &'static str,
    pub mid: &'static str,
    pub low: &'static str,
}

impl BandLabels {
    pub fn label(&self, band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::High => self.high,
            ScoreBand::Mid => self.mid,
            ScoreBand::Low => self.low,
        }
    }
}

/// The outcome of one scorer.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Score from 0.0 to 1.0
    pub score: f64,
    /// Band label for `score`
    pub label: String,
    pub band: ScoreBand,
    /// Which sub-signals fired
    pub notes: String,
    /// Per-component contributions
    pub breakdown: BTreeMap<String, f64>,
}

impl ScoreResult {
    /// Build a result, clamping `score` and deriving its label.
    pub fn new(
        score: f64,
        bands: &ScoreBands,
        labels: &BandLabels,
        notes: String,
        breakdown: BTreeMap<String, f64>,
    ) -> Self {
        let score = clamp_score(score);
        let band = ScoreBand::of(score, bands);
        Self {
            score,
            label: labels.label(band).to_string(),
            band,
            notes,
            breakdown,
        }
    }

    /// Look up one component of the breakdown.
    pub fn component(&self, name: &str) -> Option<f64> {
        self.breakdown.get(name).copied()
    }
}

impl fmt::Debug for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact format for snapshot tests: Score(0.85, "Clear")
        write!(f, "Score({:.2}, {:?})", self.score, self.label)
    }
}

/// Collects breakdown components and notes while a scorer runs.
#[derive(Debug, Default)]
pub(crate) struct Breakdown {
    components: BTreeMap<String, f64>,
    notes: Vec<String>,
}

impl Breakdown {
    pub(crate) fn component(&mut self, name: &str, value: f64) -> f64 {
        self.components.insert(name.to_string(), value);
        value
    }

    pub(crate) fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub(crate) fn finish(
        self,
        score: f64,
        bands: &ScoreBands,
        labels: &BandLabels,
    ) -> ScoreResult {
        let notes = if self.notes.is_empty() {
            "no signals detected".to_string()
        } else {
            self.notes.join("; ")
        };
        ScoreResult::new(score, bands, labels, notes, self.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: BandLabels = BandLabels {
        high: "high",
        mid: "mid",
        low: "low",
    };

    #[test]
    fn clamping() {
        let bands = ScoreBands::default();
        assert_eq!(ScoreResult::new(1.5, &bands, &LABELS, String::new(), BTreeMap::new()).score, 1.0);
        assert_eq!(ScoreResult::new(-0.5, &bands, &LABELS, String::new(), BTreeMap::new()).score, 0.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 1.0);
        assert_eq!(clamp_score(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn band_edges_are_inclusive() {
        let bands = ScoreBands::default();
        assert_eq!(ScoreBand::of(0.7, &bands), ScoreBand::High);
        assert_eq!(ScoreBand::of(0.69, &bands), ScoreBand::Mid);
        assert_eq!(ScoreBand::of(0.3, &bands), ScoreBand::Low);
        assert_eq!(ScoreBand::of(0.31, &bands), ScoreBand::Mid);
    }

    #[test]
    fn label_follows_band() {
        let bands = ScoreBands::default();
        let result = ScoreResult::new(0.9, &bands, &LABELS, String::new(), BTreeMap::new());
        assert_eq!(result.label, "high");
        assert_eq!(result.band, ScoreBand::High);
    }

    #[test]
    fn debug_format() {
        let bands = ScoreBands::default();
        let result = ScoreResult::new(0.854, &bands, &LABELS, String::new(), BTreeMap::new());
        assert_eq!(format!("{:?}", result), r#"Score(0.85, "high")"#);
    }

    #[test]
    fn breakdown_notes() {
        let bands = ScoreBands::default();
        let mut breakdown = Breakdown::default();
        breakdown.component("a", 0.25);
        breakdown.note("a fired");
        let result = breakdown.finish(0.25, &bands, &LABELS);
        assert_eq!(result.notes, "a fired");
        assert_eq!(result.component("a"), Some(0.25));

        let empty = Breakdown::default().finish(0.0, &bands, &LABELS);
        assert_eq!(empty.notes, "no signals detected");
    }
}
