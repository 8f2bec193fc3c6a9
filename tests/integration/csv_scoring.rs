//! End-to-end scoring from CSV files on disk

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;

use stock_risk::analysis::{RiskScoringEngine, RuleTable, RuleTableError};
use stock_risk::data::{load_records_csv, DataError, MetricsTable, RecordSource};
use stock_risk::models::{RiskCategory, RiskLevel};
use stock_risk::report;

use crate::common::logging;

const STOCK_CSV: &str = "\
Stock Symbol,Volatility,Beta,Correlation with ^NSEI,debtToEquity,currentRatio,quickRatio,Profit Margins,returnOnAssets,returnOnEquity,Volume,Average Volume,marketCap
RELIANCE.NS,0.05,0.9,0.8,0.3,1.6,1.2,25,12,18,\"2,500,000\",800000,15000000000000
TCS.NS,0.25,2.1,0.75,,1.8,0.9,35,22,40,900000,450000,12000000000000
INFY.NS,abc,1.0,0.5,1.0,2.5,1.5,10,5,12,1200000,1200000,7000000000
";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_score_portfolio_from_csv() {
    logging::log_test_step("Scoring CSV portfolio");

    let file = write_temp(STOCK_CSV);
    let source = load_records_csv(file.path(), "Stock Symbol").unwrap();
    assert_eq!(source.symbols(), vec!["RELIANCE.NS", "TCS.NS", "INFY.NS"]);

    let assessment = RiskScoringEngine::new(RuleTable::standard())
        .score_portfolio(&source.symbols(), &source);

    // RELIANCE: Volatility Good, debtToEquity Good, Volume text with commas, rest Neutral
    assert_eq!(assessment.stock_scores.get("RELIANCE.NS"), Some(2));
    // TCS: Volatility, Beta, Profit Margins, returnOnAssets, returnOnEquity Bad;
    // quickRatio, Volume, Average Volume Good; debtToEquity empty
    assert_eq!(assessment.stock_scores.get("TCS.NS"), Some(-2));
    // INFY: Correlation, Profit Margins, returnOnAssets, returnOnEquity, marketCap Good;
    // currentRatio, Average Volume Bad; Volatility unparseable
    assert_eq!(assessment.stock_scores.get("INFY.NS"), Some(3));

    assert_eq!(assessment.portfolio_score, 3);
    assert_eq!(assessment.category_scores.total(), 3);
    assert_eq!(assessment.best_stock().map(|s| s.symbol.as_str()), Some("INFY.NS"));

    let tcs_debt = assessment
        .results
        .iter()
        .find(|r| r.stock_symbol == "TCS.NS" && r.parameter == "debtToEquity")
        .unwrap();
    assert_eq!(tcs_debt.risk_level, RiskLevel::DataNotAvailable);
    assert!(tcs_debt.value.is_some());

    let reliance_volume = assessment
        .results
        .iter()
        .find(|r| r.stock_symbol == "RELIANCE.NS" && r.parameter == "Volume")
        .unwrap();
    assert_eq!(reliance_volume.risk_level, RiskLevel::DataNotAvailable);
    assert_eq!(reliance_volume.display_value(), "2,500,000");

    let liquidity = assessment.risk_distribution(RiskCategory::LiquidityRisk);
    assert_eq!(liquidity.len(), 3);
    assert_eq!(liquidity.iter().map(|d| d.counts.total()).sum::<usize>(), 9);
}

#[test]
fn test_custom_rule_file() {
    let rules = write_temp(
        r#"[
            {"category": "MarketRisk", "parameter": "Beta", "low": 1.0, "high": 2.0},
            {"category": "LiquidityRisk", "parameter": "Volume", "low": 1000000, "high": null}
        ]"#,
    );
    let table = RuleTable::from_json_file(rules.path()).unwrap();
    assert_eq!(table.len(), 2);

    let data = write_temp(STOCK_CSV);
    let source = load_records_csv(data.path(), "Stock Symbol").unwrap();
    let assessment = RiskScoringEngine::new(&table).score_portfolio(&["RELIANCE.NS", "TCS.NS"], &source);

    // RELIANCE Beta 0.9 Good, Volume Neutral; TCS Beta 2.1 Bad, Volume Good
    assert_eq!(assessment.results.len(), 4);
    assert_eq!(assessment.stock_scores.get("RELIANCE.NS"), Some(1));
    assert_eq!(assessment.stock_scores.get("TCS.NS"), Some(0));
    assert_eq!(assessment.category_scores.get(RiskCategory::FinancialRisk), 0);
}

#[test]
fn test_malformed_rule_file_is_rejected() {
    let rules = write_temp(r#"[{"category": "MarketRisk", "parameter": "Beta", "low": 2.0, "high": 1.0}]"#);
    assert_matches!(
        RuleTable::from_json_file(rules.path()),
        Err(RuleTableError::InvertedBand { .. })
    );

    assert_matches!(
        RuleTable::from_json_file("/nonexistent/rules.json"),
        Err(RuleTableError::Io(_))
    );
}

#[test]
fn test_missing_data_file() {
    assert_matches!(
        load_records_csv("/nonexistent/stocks.csv", "Stock Symbol"),
        Err(DataError::Io { .. })
    );
}

#[test]
fn test_text_report_with_metrics() {
    let data = write_temp(STOCK_CSV);
    let metrics = write_temp(
        "Stock Symbol,Sharpe Ratio (Daily),Maximum Drawdown (Daily)\nTCS.NS,1.4,-0.21\nINFY.NS,0.7,-0.35\n",
    );

    let source = load_records_csv(data.path(), "Stock Symbol").unwrap();
    let metrics = MetricsTable::load(metrics.path(), "Stock Symbol").unwrap();
    let assessment = RiskScoringEngine::new(RuleTable::standard()).score_portfolio(&["TCS.NS"], &source);

    let text = report::render_text(&assessment, Some(&metrics));
    assert!(text.contains("Additional Stock Metrics"));
    assert!(text.contains("Sharpe Ratio (Daily)"));
    assert!(text.contains("1.4"));
    assert!(!text.contains("INFY.NS"));
    assert!(text.contains("Total Portfolio Score: -2"));
}
