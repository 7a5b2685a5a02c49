//! Runs the declarative scenarios in `fixtures/scenarios.toml`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{AnalysisResult, ClauseAnalyzer};

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    scenario: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    clause: String,
    #[serde(default)]
    rewrite: bool,
    clarity: Option<Bound>,
    enforceability: Option<Bound>,
    risk: Option<Bound>,
    completeness: Option<Bound>,
    overall: Option<Bound>,
    document_type: Option<String>,
    state: Option<u8>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Bound {
    min: Option<f64>,
    max: Option<f64>,
}

impl Bound {
    fn check(&self, scenario: &str, what: &str, value: f64, failures: &mut Vec<String>) {
        if let Some(min) = self.min {
            if value < min {
                failures.push(format!("{scenario}: {what} = {value:.3}, expected >= {min}"));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                failures.push(format!("{scenario}: {what} = {value:.3}, expected <= {max}"));
            }
        }
    }
}

fn load_scenarios() -> Vec<Scenario> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/scenarios.toml");
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    let file: ScenarioFile = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
    file.scenario
}

fn check(scenario: &Scenario, result: &AnalysisResult, failures: &mut Vec<String>) {
    let name = scenario.name.as_str();
    let bounds = [
        ("clarity", scenario.clarity, result.clarity.score),
        ("enforceability", scenario.enforceability, result.enforceability.score),
        ("risk", scenario.risk, result.risk.score),
        ("completeness", scenario.completeness, result.completeness.score),
        ("overall", scenario.overall, result.overall_quality),
    ];
    for (what, bound, value) in bounds {
        if let Some(bound) = bound {
            bound.check(name, what, value, failures);
        }
    }

    if let Some(expected) = &scenario.document_type {
        if result.document_type.label() != expected {
            failures.push(format!(
                "{name}: document type {:?}, expected {expected:?}",
                result.document_type.label()
            ));
        }
    }
    if let Some(expected) = scenario.state {
        if result.state.index != expected {
            failures.push(format!(
                "{name}: state {} ({}), expected {expected}",
                result.state.index, result.state.label
            ));
        }
    }
    if scenario.rewrite && result.rewrite.is_none() {
        failures.push(format!("{name}: rewrite requested but missing"));
    }
}

#[test]
fn scenarios_hold() {
    let scenarios = load_scenarios();
    assert!(!scenarios.is_empty());

    let analyzer = ClauseAnalyzer::default();
    let mut failures = Vec::new();
    for scenario in &scenarios {
        let result = analyzer.analyze(&scenario.clause, scenario.rewrite);
        check(scenario, &result, &mut failures);
    }

    assert!(failures.is_empty(), "\n{}", failures.join("\n"));
}
