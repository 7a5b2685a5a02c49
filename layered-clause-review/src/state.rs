//! Maps three scores onto one of eight interpretive states.
//!
//! | bit | set when                     |
//! |-----|------------------------------|
//! | `q` | clarity >= threshold         |
//! | `l` | enforceability >= threshold  |
//! | `k` | 1 - risk >= threshold        |
//!
//! `index = q + 2l + 4k`.

use serde::{Deserialize, Serialize};

use crate::score::clamp_score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateBits {
    /// Clarity
    pub q: bool,
    /// Enforceability
    pub l: bool,
    /// Safety (inverse risk)
    pub k: bool,
}

impl StateBits {
    pub fn index(&self) -> u8 {
        self.q as u8 + 2 * self.l as u8 + 4 * self.k as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuliadState {
    pub bits: StateBits,
    /// `0..=7`
    pub index: u8,
    pub label: String,
    pub explanation: String,
}

/// Label and explanation template per index. The template placeholders are
/// `{clarity}`, `{enforceability}` and `{safety}`.
const STATES: [(&str, &str); 8] = [
    (
        "Indeterminate",
        "Clarity {clarity}, enforceability {enforceability} and safety {safety} are all below threshold; the clause neither states nor binds anything reliably.",
    ),
    (
        "Articulate but Hollow",
        "Clear drafting (clarity {clarity}) without binding force (enforceability {enforceability}) and with notable exposure (safety {safety}).",
    ),
    (
        "Binding but Obscure",
        "The clause binds (enforceability {enforceability}) but is unclear (clarity {clarity}) and risky (safety {safety}).",
    ),
    (
        "Sharp Edge",
        "Clear (clarity {clarity}) and binding (enforceability {enforceability}), but the terms carry significant risk (safety {safety}).",
    ),
    (
        "Benign Vagueness",
        "Low risk (safety {safety}) but neither clear (clarity {clarity}) nor binding (enforceability {enforceability}).",
    ),
    (
        "Clear Courtesy",
        "Clear (clarity {clarity}) and low risk (safety {safety}), but without binding force (enforceability {enforceability}).",
    ),
    (
        "Murky Commitment",
        "Binding (enforceability {enforceability}) and low risk (safety {safety}), but unclear (clarity {clarity}).",
    ),
    (
        "Coherent Covenant",
        "Clear (clarity {clarity}), binding (enforceability {enforceability}) and low risk (safety {safety}).",
    ),
];

/// Thresholds scores into a [`RuliadState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateMapper {
    threshold: f64,
}

impl Default for StateMapper {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl StateMapper {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: clamp_score(threshold),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn bits(&self, clarity: f64, enforceability: f64, risk: f64) -> StateBits {
        StateBits {
            q: clarity >= self.threshold,
            l: enforceability >= self.threshold,
            k: 1.0 - risk >= self.threshold,
        }
    }

    pub fn map(&self, clarity: f64, enforceability: f64, risk: f64) -> RuliadState {
        let bits = self.bits(clarity, enforceability, risk);
        let index = bits.index();
        let (label, template) = STATES[usize::from(index)];
        let explanation = template
            .replace("{clarity}", &format!("{:.2}", clarity))
            .replace("{enforceability}", &format!("{:.2}", enforceability))
            .replace("{safety}", &format!("{:.2}", 1.0 - risk));

        RuliadState {
            bits,
            index,
            label: label.to_string(),
            explanation,
        }
    }
}
