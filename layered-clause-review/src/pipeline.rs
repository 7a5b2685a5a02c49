//! The end-to-end clause analysis.
//!
//! [`ClauseAnalyzer::analyze`] runs, in order: tokenization and
//! classification, the four scorers, entity extraction, document-type
//! classification, logic compilation, the state mapper and, when requested,
//! the rewrite engine and word diff. Everything except the result cache is
//! stateless, so one analyzer can serve many threads.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use layered_clause::{normalize, ClassifiedClause, ClauseDisplay, SpanRef, Token};

use crate::cache::{CacheKey, CacheStats, ResultCache};
use crate::diff::{diff, WordDiff};
use crate::document_type::{DocumentType, DocumentTypeClassifier};
use crate::entities::{EntityExtractor, EntitySet};
use crate::logic::{compile, LogicFormula};
use crate::rewrite::{RewriteEngine, RewriteOutcome};
use crate::score::clamp_score;
use crate::scorers::{
    overall_quality, ClarityScorer, CompletenessScorer, EnforceabilityScorer, RiskScorer, Scorer,
};
use crate::state::{RuliadState, StateMapper};
use crate::{AnalysisConfig, ReviewResult, ScoreBands, ScoreResult};

/// Everything known about one clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whitespace-normalized input
    pub text: String,
    /// Tagged tokens and their counts
    pub clause: ClassifiedClause,
    pub clarity: ScoreResult,
    pub enforceability: ScoreResult,
    pub risk: ScoreResult,
    pub completeness: ScoreResult,
    /// `(clarity + enforceability + (1 - risk) + completeness) / 4`
    pub overall_quality: f64,
    pub entities: EntitySet,
    pub document_type: DocumentType,
    pub logic: LogicFormula,
    /// Present when a rewrite was requested
    pub rewrite: Option<RewriteOutcome>,
    pub diff: Option<WordDiff>,
    pub diff_markup: Option<String>,
    pub state: RuliadState,
}

impl AnalysisResult {
    pub fn tokens(&self) -> &[Token] {
        &self.clause.tokens
    }

    pub fn rewritten_text(&self) -> Option<&str> {
        self.rewrite.as_ref().map(|r| r.text.as_str())
    }

    pub fn to_json(&self) -> ReviewResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> ReviewResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Tagged-line rendering with one extra row per located party and obligation.
    pub fn display(&self) -> ClauseDisplay<'_> {
        let mut display = ClauseDisplay::new(&self.clause).with_tags();
        let labelled = self
            .entities
            .parties
            .iter()
            .map(|p| (p, "Party"))
            .chain(self.entities.obligations.iter().map(|o| (o, "Obligation")));
        for (phrase, label) in labelled {
            if let Some(span) = locate(&self.clause.tokens, phrase) {
                display.include_span(span, label);
            }
        }
        display
    }
}

/// First token window whose clean words equal the clean words of `phrase`.
fn locate(tokens: &[Token], phrase: &str) -> Option<SpanRef> {
    let words: Vec<&str> = phrase
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .collect();
    if words.is_empty() || words.len() > tokens.len() {
        return None;
    }
    (0..=tokens.len() - words.len())
        .find(|&start| {
            tokens[start..start + words.len()]
                .iter()
                .zip(&words)
                .all(|(token, word)| token.clean == *word)
        })
        .map(|start| SpanRef::new(start, start + words.len() - 1))
}

/// Runs the full analysis, optionally memoized by a [`ResultCache`].
#[derive(Debug)]
pub struct ClauseAnalyzer {
    config: AnalysisConfig,
    clarity: ClarityScorer,
    enforceability: EnforceabilityScorer,
    risk: RiskScorer,
    completeness: CompletenessScorer,
    extractor: EntityExtractor,
    classifier: DocumentTypeClassifier,
    rewriter: RewriteEngine,
    mapper: StateMapper,
    cache: Option<ResultCache<AnalysisResult>>,
}

impl Default for ClauseAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl ClauseAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            clarity: ClarityScorer::with_band(config.readability),
            enforceability: EnforceabilityScorer::new(),
            risk: RiskScorer::new(),
            completeness: CompletenessScorer::new(),
            extractor: EntityExtractor::new(),
            classifier: DocumentTypeClassifier::new(),
            rewriter: RewriteEngine::new(),
            mapper: StateMapper::new(config.state.threshold),
            cache: ResultCache::new(config.cache.max_size),
            config,
        }
    }

    /// Replace the rewrite rules.
    pub fn with_rewriter(mut self, rewriter: RewriteEngine) -> Self {
        self.rewriter = rewriter;
        // Cached results were produced by the old rules.
        if let Some(cache) = &self.cache {
            cache.clear();
        }
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one clause, serving repeated inputs from the cache.
    ///
    /// The result is identical to [`ClauseAnalyzer::analyze_uncached`] for
    /// the same input; the cache only changes latency.
    pub fn analyze(&self, clause: &str, with_rewrite: bool) -> Arc<AnalysisResult> {
        let Some(cache) = &self.cache else {
            return Arc::new(self.analyze_uncached(clause, with_rewrite));
        };

        let key = CacheKey::new(clause, with_rewrite);
        if let Some(hit) = cache.get(&key) {
            return hit;
        }
        let result = Arc::new(self.analyze_uncached(clause, with_rewrite));
        cache.set(key, Arc::clone(&result));
        result
    }

    /// Analyze one clause without consulting the cache.
    pub fn analyze_uncached(&self, clause: &str, with_rewrite: bool) -> AnalysisResult {
        let text = normalize(clause);
        let classified = ClassifiedClause::from_text(&text);
        let bands = &self.config.bands;

        let clarity = run_scorer(&self.clarity, &classified, bands);
        let enforceability = run_scorer(&self.enforceability, &classified, bands);
        let risk = run_scorer(&self.risk, &classified, bands);
        let completeness = run_scorer(&self.completeness, &classified, bands);
        let overall_quality =
            clamp_score(overall_quality(&clarity, &enforceability, &risk, &completeness));

        let entities = self.extractor.extract(&classified);
        let document_type = self.classifier.classify(&classified);
        let logic = compile(&classified);
        let state = self
            .mapper
            .map(clarity.score, enforceability.score, risk.score);

        let (rewrite, diff, diff_markup) = if with_rewrite {
            let outcome = self.rewriter.rewrite(&text);
            let word_diff = diff(&text, &outcome.text);
            let markup = word_diff.markup();
            (Some(outcome), Some(word_diff), Some(markup))
        } else {
            (None, None, None)
        };

        AnalysisResult {
            text,
            clause: classified,
            clarity,
            enforceability,
            risk,
            completeness,
            overall_quality,
            entities,
            document_type,
            logic,
            rewrite,
            diff,
            diff_markup,
            state,
        }
    }

    /// Cache counters; an analyzer without a cache reports `max_size == 0`.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .as_ref()
            .map_or_else(CacheStats::default, ResultCache::stats)
    }
}

fn run_scorer(scorer: &dyn Scorer, clause: &ClassifiedClause, bands: &ScoreBands) -> ScoreResult {
    let result = scorer.score(clause, bands);
    log::debug!("{}: {:.3} ({}): {}", scorer.name(), result.score, result.label, result.notes);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_phrases() {
        let clause = ClassifiedClause::from_text(r#"Acme Corp. (the "Supplier") shall ship goods, promptly."#);
        let tokens = &clause.tokens;
        assert_eq!(locate(tokens, "Acme Corp."), Some(SpanRef::new(0, 1)));
        assert_eq!(locate(tokens, "Supplier"), Some(SpanRef::new(3, 3)));
        assert_eq!(locate(tokens, "shall ship goods"), Some(SpanRef::new(4, 6)));
        assert_eq!(locate(tokens, "Buyer"), None);
        assert_eq!(locate(tokens, ""), None);
    }

    #[test]
    fn rewrite_is_optional() {
        let analyzer = ClauseAnalyzer::default();
        let plain = analyzer.analyze("The Vendor should deliver promptly.", false);
        assert!(plain.rewrite.is_none());
        assert!(plain.diff_markup.is_none());

        let rewritten = analyzer.analyze("The Vendor should deliver promptly.", true);
        assert_eq!(
            rewritten.rewritten_text(),
            Some("The Vendor shall deliver within five (5) business days.")
        );
        assert_eq!(
            rewritten.diff_markup.as_deref(),
            Some("The Vendor [-should-] {+shall+} deliver [-promptly.-] {+within five (5) business days.+}")
        );
    }

    #[test]
    fn cacheless_analyzer() {
        let analyzer = ClauseAnalyzer::new(AnalysisConfig::default().with_cache_size(0));
        analyzer.analyze("The Buyer shall pay.", false);
        assert_eq!(analyzer.cache_stats(), CacheStats::default());
    }
}
