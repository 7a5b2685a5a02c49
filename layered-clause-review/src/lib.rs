#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Heuristic review of a single legal clause, built on [`layered_clause`].
//!
//! ## Scoring
//!
//! - [`ClarityScorer`] - readability, modal precision and structure
//! - [`EnforceabilityScorer`] - binding language, consideration, parties, formality
//! - [`RiskScorer`] - ambiguity, one-sided discretion and unenforceable terms
//! - [`CompletenessScorer`] - a fixed checklist of [`EssentialElement`]s
//!
//! Every score is within `[0, 1]` and carries a band label, notes and a
//! per-component breakdown ([`ScoreResult`]).
//!
//! ## Extraction and Compilation
//!
//! - [`EntityExtractor`] - parties, dates, amounts and obligation phrases
//! - [`DocumentTypeClassifier`] - keyword signatures (NDA, lease, ...)
//! - [`compile`] - phrase/relator segments to a relational [`LogicFormula`]
//!
//! ## Rewriting
//!
//! - [`RewriteEngine`] - ordered pattern rules with category and strength
//! - [`diff()`] - word-level LCS alignment with `[-del-]{+ins+}` markup
//!
//! ## Pipeline
//!
//! [`ClauseAnalyzer`] runs all of the above, maps the scores to a
//! [`RuliadState`] and memoizes results in a bounded LRU [`ResultCache`].
//! Thresholds come from an [`AnalysisConfig`], loadable from TOML.
//!
//! ## Example
//!
//! ```
//! use layered_clause_review::ClauseAnalyzer;
//!
//! let analyzer = ClauseAnalyzer::default();
//! let result = analyzer.analyze("The Vendor should deliver the goods promptly.", true);
//!
//! assert!(result.overall_quality <= 1.0);
//! assert_eq!(
//!     result.rewritten_text(),
//!     Some("The Vendor shall deliver the goods within five (5) business days."),
//! );
//! ```

mod cache;
mod config;
mod diff;
mod document_type;
mod entities;
mod errors;
mod history;
mod logic;
mod pipeline;
mod rewrite;
mod score;
mod scorers;
mod signals;
mod state;

pub use cache::{CacheKey, CacheStats, ResultCache};
pub use config::{
    AnalysisConfig, CacheConfig, HistoryConfig, ReadabilityBand, ScoreBands, StateConfig,
};
pub use diff::{diff, DiffSpan, DiffStats, SpanKind, WordDiff};
pub use document_type::{DocumentType, DocumentTypeClassifier};
pub use entities::{EntityExtractor, EntitySet};
pub use errors::{ReviewError, ReviewResult};
pub use history::{AnalysisHistory, HistoryEntry};
pub use logic::{compile, entity_name, segment, LogicFormula, Segment, SegmentKind, EMPTY_FORMULA};
pub use pipeline::{AnalysisResult, ClauseAnalyzer};
pub use rewrite::{RewriteCategory, RewriteEngine, RewriteOutcome, RewriteRule, Transformation};
pub use score::{clamp_score, BandLabels, ScoreBand, ScoreResult};
pub use scorers::{
    overall_quality, ClarityScorer, CompletenessScorer, EnforceabilityScorer, EssentialElement,
    RiskScorer, Scorer,
};
pub use state::{RuliadState, StateBits, StateMapper};
