//! Rule-based clause rewriting.
//!
//! Rules run in declaration order. Each rule replaces every non-overlapping
//! match in the text produced by the rules before it, so a phrase rule
//! declared ahead of a single-word rule claims its words first ("will
//! endeavor to" before "will").

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use layered_clause::normalize;

use crate::score::clamp_score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewriteCategory {
    /// Replaces vague or permissive wording with precise terms
    Precision,
    /// Turns hedged commitments into binding ones
    Enforceability,
    /// Removes one-sided or unconscionable terms
    RiskReduction,
}

impl fmt::Display for RewriteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RewriteCategory::Precision => "precision",
            RewriteCategory::Enforceability => "enforceability",
            RewriteCategory::RiskReduction => "risk reduction",
        })
    }
}

/// One pattern -> replacement rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    /// Replacement template; may refer to capture groups as `$1`
    replacement: String,
    pub category: RewriteCategory,
    /// Confidence in `[0, 1]`
    pub strength: f64,
}

impl RewriteRule {
    /// Build a rule from a case-insensitive, word-bounded pattern.
    ///
    /// # Panics
    /// If `pattern` is not a valid regular expression.
    pub fn new(
        pattern: &str,
        replacement: impl Into<String>,
        category: RewriteCategory,
        strength: f64,
    ) -> Self {
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", pattern))
            .unwrap_or_else(|e| panic!("invalid rewrite pattern {pattern:?}: {e}"));
        Self {
            pattern,
            replacement: replacement.into(),
            category,
            strength: clamp_score(strength),
        }
    }

    fn suggest(&self, caps: &Captures<'_>) -> String {
        let mut suggested = String::new();
        caps.expand(&self.replacement, &mut suggested);

        let starts_upper = caps
            .get(0)
            .and_then(|m| m.as_str().chars().next())
            .map_or(false, char::is_uppercase);
        if starts_upper {
            capitalize(&suggested)
        } else {
            suggested
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One applied substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub original: String,
    pub suggested: String,
    pub category: RewriteCategory,
    pub strength: f64,
}

/// Rewritten text and the substitutions that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteOutcome {
    pub text: String,
    pub transformations: Vec<Transformation>,
}

impl RewriteOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.transformations.is_empty()
    }

    /// Mean strength of the applied transformations; 0 when none applied.
    pub fn mean_strength(&self) -> f64 {
        if self.transformations.is_empty() {
            return 0.0;
        }
        let total: f64 = self.transformations.iter().map(|t| t.strength).sum();
        total / self.transformations.len() as f64
    }
}

static DEFAULT_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    use RewriteCategory::*;
    vec![
        RewriteRule::new(r"will\s+endeavou?r\s+to", "shall", Enforceability, 0.8),
        RewriteRule::new(r"agrees?\s+to\s+try\s+to", "shall", Enforceability, 0.8),
        RewriteRule::new(r"as\s+soon\s+as\s+possible", "within five (5) business days", Precision, 0.75),
        RewriteRule::new(r"promptly", "within five (5) business days", Precision, 0.6),
        RewriteRule::new(r"should", "shall", Precision, 0.9),
        RewriteRule::new(r"might", "shall", Enforceability, 0.7),
        RewriteRule::new(r"will", "shall", Precision, 0.6),
        RewriteRule::new(r"(?:sole|absolute)\s+discretion", "good faith discretion", RiskReduction, 0.85),
        RewriteRule::new(r"at\s+any\s+time", "upon thirty (30) days' written notice", RiskReduction, 0.8),
        RewriteRule::new(r"for\s+any\s+reason", "for cause", RiskReduction, 0.75),
        RewriteRule::new(r"without\s+notice", "upon written notice", RiskReduction, 0.8),
        RewriteRule::new(r"unlimited\s+liability", "liability capped at the fees paid hereunder", RiskReduction, 0.85),
        RewriteRule::new(r"(waives?)\s+all\s+rights", "$1 only the rights expressly stated herein", RiskReduction, 0.7),
    ]
});

/// Applies an ordered list of [`RewriteRule`]s.
#[derive(Debug, Clone)]
pub struct RewriteEngine {
    rules: Vec<RewriteRule>,
}

impl Default for RewriteEngine {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl RewriteEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with custom rules, applied in the given order.
    pub fn with_rules(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Rewrite `clause`. Text matching no rule comes back unchanged
    /// (after whitespace normalization) with no transformations.
    pub fn rewrite(&self, clause: &str) -> RewriteOutcome {
        let mut text = normalize(clause);
        let mut transformations = Vec::new();

        for rule in &self.rules {
            let mut applied = Vec::new();
            let replaced = rule.pattern.replace_all(&text, |caps: &Captures<'_>| {
                let suggested = rule.suggest(caps);
                applied.push(Transformation {
                    original: caps[0].to_string(),
                    suggested: suggested.clone(),
                    category: rule.category,
                    strength: rule.strength,
                });
                suggested
            });
            if !applied.is_empty() {
                text = replaced.into_owned();
                transformations.extend(applied);
            }
        }

        RewriteOutcome {
            text,
            transformations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(text: &str) -> RewriteOutcome {
        RewriteEngine::new().rewrite(text)
    }

    #[test]
    fn precision_rules() {
        let outcome = rewrite("The Vendor should deliver the goods promptly.");
        assert_eq!(
            outcome.text,
            "The Vendor shall deliver the goods within five (5) business days."
        );
        let applied: Vec<_> = outcome
            .transformations
            .iter()
            .map(|t| (t.original.as_str(), t.category))
            .collect();
        assert_eq!(
            applied,
            vec![
                ("promptly", RewriteCategory::Precision),
                ("should", RewriteCategory::Precision),
            ]
        );
        assert!((outcome.mean_strength() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn phrase_rule_claims_words_first() {
        let outcome = rewrite("Supplier will endeavor to ship and will invoice.");
        assert_eq!(outcome.text, "Supplier shall ship and shall invoice.");
        assert_eq!(outcome.transformations.len(), 2);
        assert_eq!(outcome.transformations[0].original, "will endeavor to");
        assert_eq!(outcome.transformations[0].category, RewriteCategory::Enforceability);
        assert_eq!(outcome.transformations[1].original, "will");
    }

    #[test]
    fn risk_reduction() {
        let outcome = rewrite(
            "The Company may terminate at any time in its sole discretion and the Employee waives all rights.",
        );
        assert_eq!(
            outcome.text,
            "The Company may terminate upon thirty (30) days' written notice in its good faith discretion and the Employee waives only the rights expressly stated herein."
        );
        assert!(outcome
            .transformations
            .iter()
            .all(|t| t.category == RewriteCategory::RiskReduction));
    }

    #[test]
    fn preserves_capitalization() {
        let outcome = rewrite("Should   the Tenant default, Landlord MIGHT  act.");
        assert_eq!(outcome.text, "Shall the Tenant default, Landlord Shall act.");
    }

    #[test]
    fn no_match_is_identity() {
        let outcome = rewrite("The Buyer shall pay the price.");
        assert_eq!(outcome.text, "The Buyer shall pay the price.");
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.mean_strength(), 0.0);
    }

    #[test]
    fn word_boundaries() {
        let outcome = rewrite("Goodwill and willful acts.");
        assert!(outcome.is_unchanged());
    }

    #[test]
    fn strength_is_clamped() {
        let rule = RewriteRule::new("foo", "bar", RewriteCategory::Precision, 1.7);
        assert_eq!(rule.strength, 1.0);
    }
}
