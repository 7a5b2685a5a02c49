use std::thread;

use crate::{AnalysisConfig, ClauseAnalyzer};

const CLAUSES: &[&str] = &[
    "The Client shall pay the Contractor a fee of $5,000 within thirty (30) days.",
    "The Company may terminate at any time in its sole discretion.",
    "The Tenant must not sublet the premises without the Landlord's consent.",
    "maybe something",
    "Licensee will endeavor to report usage promptly.",
];

#[test]
fn shared_analyzer_across_threads() {
    let analyzer = ClauseAnalyzer::default();

    thread::scope(|scope| {
        for worker in 0..8 {
            let analyzer = &analyzer;
            scope.spawn(move || {
                for round in 0..20 {
                    let clause = CLAUSES[(worker + round) % CLAUSES.len()];
                    let with_rewrite = round % 2 == 0;
                    let cached = analyzer.analyze(clause, with_rewrite);
                    assert_eq!(*cached, analyzer.analyze_uncached(clause, with_rewrite));
                }
            });
        }
    });

    let stats = analyzer.cache_stats();
    assert_eq!(stats.hits + stats.misses, 8 * 20);
    assert!(stats.size <= CLAUSES.len() * 2);
    assert!(stats.hits > 0);
}

#[test]
fn tiny_cache_under_contention() {
    let analyzer = ClauseAnalyzer::new(AnalysisConfig::default().with_cache_size(1));

    thread::scope(|scope| {
        for worker in 0..4 {
            let analyzer = &analyzer;
            scope.spawn(move || {
                for round in 0..10 {
                    let clause = CLAUSES[(worker * 3 + round) % CLAUSES.len()];
                    let result = analyzer.analyze(clause, true);
                    assert_eq!(*result, analyzer.analyze_uncached(clause, true));
                }
            });
        }
    });

    assert_eq!(analyzer.cache_stats().size, 1);
}
