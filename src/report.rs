//! Plain text and JSON rendering of a scoring run
use std::fmt::Write;

use crate::analysis::PortfolioAssessment;
use crate::data::MetricsTable;
use crate::models::{RiskCategory, RiskLevel};

const BAR_WIDTH: usize = 20;

/// Render the full dashboard as plain text
pub fn render_text(assessment: &PortfolioAssessment, metrics: Option<&MetricsTable>) -> String {
    let mut out = String::new();

    writeln!(out, "Stock Risk Analysis Dashboard").ok();
    writeln!(out, "=============================").ok();
    writeln!(out).ok();

    render_summary(&mut out, assessment);

    for category in RiskCategory::ALL {
        render_category_table(&mut out, assessment, category);
    }

    writeln!(out, "Best Stock").ok();
    match assessment.best_stock() {
        Some(best) => {
            writeln!(out, "  Stock Symbol: {}", best.symbol).ok();
            writeln!(out, "  Investment Score: {}", best.score).ok();
        }
        None => {
            writeln!(out, "  No stocks evaluated").ok();
        }
    }
    writeln!(out).ok();

    if let Some(metrics) = metrics {
        render_metrics(&mut out, assessment, metrics);
    }

    writeln!(out, "Risk Distribution by Parameter").ok();
    for category in RiskCategory::ALL {
        for distribution in assessment.risk_distribution(category) {
            writeln!(out, "  {} in {}", distribution.parameter, category).ok();
            for level in RiskLevel::ALL {
                let count = distribution.counts.get(level);
                writeln!(out, "    {:<20} {:>3} {}", level.label(), count, "#".repeat(count)).ok();
            }
        }
    }
    writeln!(out).ok();

    writeln!(out, "Investment Scores").ok();
    let max_abs = assessment
        .stock_scores
        .iter()
        .map(|s| s.score.unsigned_abs() as usize)
        .max()
        .unwrap_or(0)
        .max(1);
    for entry in assessment.stock_scores.iter() {
        let len = entry.score.unsigned_abs() as usize * BAR_WIDTH / max_abs;
        let bar = (if entry.score >= 0 { "+" } else { "-" }).repeat(len);
        writeln!(out, "  {:<12} {:>4} {}", entry.symbol, entry.score, bar).ok();
    }
    writeln!(out).ok();

    writeln!(out, "Total Portfolio Score: {}", assessment.portfolio_score).ok();
    out
}

fn render_summary(out: &mut String, assessment: &PortfolioAssessment) {
    writeln!(out, "Summary").ok();
    writeln!(out, "  Total Portfolio Score: {}", assessment.portfolio_score).ok();
    for (category, score) in assessment.category_scores.iter() {
        writeln!(out, "  {}: {}", category, score).ok();
    }
    if !assessment.skipped_symbols.is_empty() {
        writeln!(out, "  No data for: {}", assessment.skipped_symbols.join(", ")).ok();
    }
    writeln!(out).ok();
}

fn render_category_table(out: &mut String, assessment: &PortfolioAssessment, category: RiskCategory) {
    writeln!(out, "{}", category).ok();
    let rows: Vec<_> = assessment.results_for(category).collect();
    if rows.is_empty() {
        writeln!(out, "  (no results)").ok();
        writeln!(out).ok();
        return;
    }

    writeln!(
        out,
        "  {:<12} {:<24} {:>18} {:<20} {}",
        "Stock Symbol", "Parameter", "Value", "Risk Level", "Color"
    )
    .ok();
    for result in rows {
        writeln!(
            out,
            "  {:<12} {:<24} {:>18} {:<20} {}",
            result.stock_symbol,
            result.parameter,
            result.display_value(),
            result.risk_level.label(),
            result.color
        )
        .ok();
    }
    writeln!(out).ok();
}

fn render_metrics(out: &mut String, assessment: &PortfolioAssessment, metrics: &MetricsTable) {
    let symbols: Vec<&str> = assessment.stock_scores.iter().map(|s| s.symbol.as_str()).collect();
    let rows = metrics.rows_for(&symbols);
    if rows.is_empty() {
        return;
    }

    writeln!(out, "Additional Stock Metrics").ok();
    for (symbol, cells) in rows {
        writeln!(out, "  {}", symbol).ok();
        for (column, cell) in metrics.columns().iter().zip(cells) {
            writeln!(out, "    {:<32} {}", column, cell).ok();
        }
    }
    writeln!(out).ok();
}

/// Render the scoring run as pretty-printed JSON
pub fn render_json(assessment: &PortfolioAssessment) -> serde_json::Result<String> {
    serde_json::to_string_pretty(assessment)
}
