// Risk scoring engine
// Classifies every configured parameter of each requested stock and folds the
// Good(+1)/Bad(-1) deltas into category, stock and portfolio scores.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::analysis::classifier::{classify, color_for};
use crate::analysis::thresholds::RuleTable;
use crate::data::RecordSource;
use crate::models::{EvaluationResult, RiskCategory, RiskLevel, StockRecord};

/// Score per risk category, one entry for each category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    scores: [i32; 3],
}

impl CategoryScores {
    pub fn get(&self, category: RiskCategory) -> i32 {
        self.scores[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (RiskCategory, i32)> + '_ {
        RiskCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn total(&self) -> i32 {
        self.scores.iter().sum()
    }

    fn add(&mut self, category: RiskCategory, delta: i32) {
        self.scores[category.index()] += delta;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockScore {
    pub symbol: String,
    pub score: i32,
}

/// Per-stock scores in scoring order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockScores {
    entries: Vec<StockScore>,
}

impl StockScores {
    pub fn get(&self, symbol: &str) -> Option<i32> {
        self.entries.iter().find(|e| e.symbol == symbol).map(|e| e.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockScore> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> i32 {
        self.entries.iter().map(|e| e.score).sum()
    }

    fn push(&mut self, symbol: String, score: i32) {
        self.entries.push(StockScore { symbol, score });
    }
}

impl FromIterator<(String, i32)> for StockScores {
    fn from_iter<I: IntoIterator<Item = (String, i32)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(symbol, score)| StockScore { symbol, score })
                .collect(),
        }
    }
}

/// The stock with the highest score; the first in scoring order wins ties.
/// `None` when no stock was scored.
pub fn best_stock(scores: &StockScores) -> Option<&StockScore> {
    scores.iter().fold(None, |best: Option<&StockScore>, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}

/// Running counters updated together for each classification
#[derive(Debug, Default)]
struct ScoreTally {
    category_scores: CategoryScores,
    portfolio_score: i32,
}

impl ScoreTally {
    /// Apply one delta to the category, the current stock and the portfolio
    fn apply(&mut self, category: RiskCategory, delta: i32, stock_score: &mut i32) {
        if delta == 0 {
            return;
        }
        self.category_scores.add(category, delta);
        self.portfolio_score += delta;
        *stock_score += delta;
    }
}

/// Counts of each risk level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub good: usize,
    pub neutral: usize,
    pub bad: usize,
    pub data_not_available: usize,
}

impl LevelCounts {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Good => self.good += 1,
            RiskLevel::Neutral => self.neutral += 1,
            RiskLevel::Bad => self.bad += 1,
            RiskLevel::DataNotAvailable => self.data_not_available += 1,
        }
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Good => self.good,
            RiskLevel::Neutral => self.neutral,
            RiskLevel::Bad => self.bad,
            RiskLevel::DataNotAvailable => self.data_not_available,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.neutral + self.bad + self.data_not_available
    }
}

/// Risk level distribution of one parameter across the evaluated stocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDistribution {
    pub parameter: String,
    pub counts: LevelCounts,
}

/// Everything produced by one scoring run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAssessment {
    pub results: Vec<EvaluationResult>,
    pub category_scores: CategoryScores,
    pub stock_scores: StockScores,
    pub portfolio_score: i32,
    /// Requested symbols with no record in the source
    pub skipped_symbols: Vec<String>,
}

impl PortfolioAssessment {
    pub fn best_stock(&self) -> Option<&StockScore> {
        best_stock(&self.stock_scores)
    }

    pub fn results_for(&self, category: RiskCategory) -> impl Iterator<Item = &EvaluationResult> {
        self.results.iter().filter(move |r| r.category == category)
    }

    /// Per-parameter level counts for a category, parameters in first-seen order
    pub fn risk_distribution(&self, category: RiskCategory) -> Vec<ParameterDistribution> {
        let mut distributions: Vec<ParameterDistribution> = Vec::new();
        for result in self.results_for(category) {
            let index = match distributions.iter().position(|d| d.parameter == result.parameter) {
                Some(index) => index,
                None => {
                    distributions.push(ParameterDistribution {
                        parameter: result.parameter.clone(),
                        counts: LevelCounts::default(),
                    });
                    distributions.len() - 1
                }
            };
            distributions[index].counts.record(result.risk_level);
        }
        distributions
    }

    /// Level counts per category for one stock
    pub fn level_summary(&self, symbol: &str) -> Vec<(RiskCategory, LevelCounts)> {
        RiskCategory::ALL
            .iter()
            .map(|category| {
                let mut counts = LevelCounts::default();
                self.results
                    .iter()
                    .filter(|r| r.stock_symbol == symbol && r.category == *category)
                    .for_each(|r| counts.record(r.risk_level));
                (*category, counts)
            })
            .collect()
    }
}

/// Scores portfolios against a rule table
///
/// Holds no state between runs; every call is a pure function of the rule
/// table, the requested symbols and the record source.
pub struct RiskScoringEngine<'a> {
    rules: &'a RuleTable,
}

impl<'a> RiskScoringEngine<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Evaluate every configured parameter for each requested symbol
    pub fn score_portfolio<S, R>(&self, symbols: &[S], source: &R) -> PortfolioAssessment
    where
        S: AsRef<str>,
        R: RecordSource + ?Sized,
    {
        let mut tally = ScoreTally::default();
        let mut results = Vec::new();
        let mut stock_scores = StockScores::default();
        let mut skipped_symbols = Vec::new();
        let mut evaluated = HashSet::new();

        for symbol in symbols {
            let symbol = symbol.as_ref();

            if !evaluated.insert(symbol.to_string()) {
                debug!("Symbol {} requested more than once, using first evaluation", symbol);
                continue;
            }

            let Some(record) = source.get(symbol) else {
                warn!("No data found for stock symbol: {}", symbol);
                skipped_symbols.push(symbol.to_string());
                continue;
            };

            let mut stock_score = 0;
            for category in RiskCategory::ALL {
                for rule in self.rules.rules_for(category) {
                    let result = self.evaluate(record, category, &rule.parameter, rule.low, rule.high);
                    tally.apply(category, result.risk_level.score_delta(), &mut stock_score);
                    results.push(result);
                }
            }

            debug!("Scored {}: {}", symbol, stock_score);
            stock_scores.push(symbol.to_string(), stock_score);
        }

        info!(
            "Scored {} stocks ({} skipped), portfolio score {}",
            stock_scores.len(),
            skipped_symbols.len(),
            tally.portfolio_score
        );

        PortfolioAssessment {
            results,
            category_scores: tally.category_scores,
            stock_scores,
            portfolio_score: tally.portfolio_score,
            skipped_symbols,
        }
    }

    fn evaluate(
        &self,
        record: &StockRecord,
        category: RiskCategory,
        parameter: &str,
        low: f64,
        high: f64,
    ) -> EvaluationResult {
        let (value, risk_level) = match record.get(parameter) {
            Some(value) => (Some(value.clone()), classify(value, low, high)),
            None => (None, RiskLevel::DataNotAvailable),
        };

        EvaluationResult {
            stock_symbol: record.symbol.clone(),
            category,
            parameter: parameter.to_string(),
            value,
            risk_level,
            color: color_for(risk_level),
        }
    }
}
