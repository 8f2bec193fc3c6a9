//! Scoring engine scenarios and invariants

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use stock_risk::analysis::{best_stock, RiskScoringEngine, RuleTable};
use stock_risk::data::InMemoryRecordSource;
use stock_risk::models::{MetricValue, RiskCategory, RiskColor, RiskLevel, StockRecord};
use test_log::test;

use crate::common::test_data::{neutral_record, record_with, sample_source};

fn engine() -> RiskScoringEngine<'static> {
    RiskScoringEngine::new(RuleTable::standard())
}

#[test]
fn test_sample_portfolio_scores() {
    let assessment = engine().score_portfolio(&["RELIANCE", "TCS", "INFY"], &sample_source());

    assert_eq!(assessment.stock_scores.get("RELIANCE"), Some(3));
    assert_eq!(assessment.stock_scores.get("TCS"), Some(1));
    assert_eq!(assessment.stock_scores.get("INFY"), Some(-2));
    assert_eq!(assessment.portfolio_score, 2);
    assert_eq!(assessment.category_scores.get(RiskCategory::MarketRisk), 1);
    assert_eq!(assessment.category_scores.get(RiskCategory::FinancialRisk), 0);
    assert_eq!(assessment.category_scores.get(RiskCategory::LiquidityRisk), 1);
    assert_eq!(assessment.results.len(), 3 * RuleTable::standard().len());
}

#[test]
fn test_score_invariants() {
    let source = sample_source();
    let requests: [&[&str]; 4] = [
        &["RELIANCE"],
        &["INFY", "TCS"],
        &["TCS", "MISSING", "RELIANCE", "INFY"],
        &["INFY", "INFY"],
    ];

    for symbols in requests {
        let assessment = engine().score_portfolio(symbols, &source);
        assert_eq!(assessment.portfolio_score, assessment.stock_scores.total());
        assert_eq!(assessment.portfolio_score, assessment.category_scores.total());

        for category in RiskCategory::ALL {
            let from_results: i32 = assessment
                .results_for(category)
                .map(|r| r.risk_level.score_delta())
                .sum();
            assert_eq!(assessment.category_scores.get(category), from_results);
        }
    }
}

#[test]
fn test_two_stock_best_and_total() {
    let source = InMemoryRecordSource::from_records(vec![
        record_with("A", &[("Volatility", 0.0), ("Beta", 0.0), ("quickRatio", 0.0)]),
        record_with("B", &[("marketCap", 1.0)]),
    ]);
    let assessment = engine().score_portfolio(&["A", "B"], &source);

    assert_eq!(assessment.stock_scores.get("A"), Some(3));
    assert_eq!(assessment.stock_scores.get("B"), Some(1));
    assert_eq!(assessment.portfolio_score, 4);
    assert_eq!(best_stock(&assessment.stock_scores).map(|s| s.symbol.as_str()), Some("A"));
}

#[test]
fn test_best_stock_tie_uses_scoring_order() {
    let source = InMemoryRecordSource::from_records(vec![
        record_with("A", &[("Beta", 0.0)]),
        record_with("B", &[("Volatility", 0.0)]),
    ]);

    let assessment = engine().score_portfolio(&["B", "A"], &source);
    assert_eq!(assessment.best_stock().map(|s| s.symbol.as_str()), Some("B"));

    let assessment = engine().score_portfolio(&["A", "B"], &source);
    assert_eq!(assessment.best_stock().map(|s| s.symbol.as_str()), Some("A"));
}

#[test]
fn test_empty_symbol_list() {
    let symbols: [&str; 0] = [];
    let assessment = engine().score_portfolio(&symbols, &sample_source());

    assert!(assessment.results.is_empty());
    for category in RiskCategory::ALL {
        assert_eq!(assessment.category_scores.get(category), 0);
    }
    assert!(assessment.stock_scores.is_empty());
    assert_eq!(assessment.portfolio_score, 0);
    assert_matches!(assessment.best_stock(), None);
}

#[test]
fn test_missing_record_is_skipped() {
    let assessment = engine().score_portfolio(&["NOPE", "TCS"], &sample_source());

    assert_eq!(assessment.skipped_symbols, vec!["NOPE".to_string()]);
    assert_eq!(assessment.stock_scores.len(), 1);
    assert!(assessment.results.iter().all(|r| r.stock_symbol == "TCS"));
}

#[test]
fn test_missing_volatility_key() {
    let mut record = neutral_record("X");
    record.metrics.remove("Volatility");
    let source = InMemoryRecordSource::from_records(vec![record]);

    let assessment = engine().score_portfolio(&["X"], &source);
    let volatility = assessment
        .results
        .iter()
        .find(|r| r.parameter == "Volatility")
        .unwrap();

    assert_eq!(volatility.value, None);
    assert_eq!(volatility.display_value(), "Data not available");
    assert_eq!(volatility.risk_level, RiskLevel::DataNotAvailable);
    assert_eq!(volatility.color, RiskColor::Black);
    assert_eq!(assessment.portfolio_score, 0);
}

#[test]
fn test_unparseable_value_keeps_raw_text() {
    let source = InMemoryRecordSource::from_records(vec![StockRecord::new("X")
        .with_metric("Beta", MetricValue::parse("n/m"))]);

    let assessment = engine().score_portfolio(&["X"], &source);
    let beta = assessment.results.iter().find(|r| r.parameter == "Beta").unwrap();

    assert_eq!(beta.value, Some(MetricValue::Unparseable("n/m".to_string())));
    assert_eq!(beta.display_value(), "n/m");
    assert_eq!(beta.risk_level, RiskLevel::DataNotAvailable);
}

#[test]
fn test_scoring_is_idempotent() {
    let source = sample_source();
    let symbols = ["INFY", "RELIANCE", "TCS"];
    let first = engine().score_portfolio(&symbols, &source);
    let second = engine().score_portfolio(&symbols, &source);
    assert_eq!(first, second);
}

#[test]
fn test_results_follow_configuration_order() {
    let assessment = engine().score_portfolio(&["TCS"], &sample_source());
    let parameters: Vec<&str> = assessment.results.iter().map(|r| r.parameter.as_str()).collect();
    let configured: Vec<&str> = RiskCategory::ALL
        .iter()
        .flat_map(|c| RuleTable::standard().rules_for(*c))
        .map(|r| r.parameter.as_str())
        .collect();
    assert_eq!(parameters, configured);
}

#[test]
fn test_risk_distribution_and_level_summary() {
    let assessment = engine().score_portfolio(&["RELIANCE", "TCS", "INFY"], &sample_source());

    let market = assessment.risk_distribution(RiskCategory::MarketRisk);
    assert_eq!(market.len(), 3);
    let beta = market.iter().find(|d| d.parameter == "Beta").unwrap();
    assert_eq!(beta.counts.good, 1);
    assert_eq!(beta.counts.neutral, 1);
    assert_eq!(beta.counts.bad, 1);
    assert_eq!(beta.counts.total(), 3);

    let summary = assessment.level_summary("INFY");
    let (category, financial) = summary[1];
    assert_eq!(category, RiskCategory::FinancialRisk);
    assert_eq!(financial.bad, 1);
    assert_eq!(financial.neutral, 5);
}
