// Threshold rule table
// Fixed (category, parameter) -> (low, high) bands used to classify metric values

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

use crate::analysis::classifier::{classify, in_band};
use crate::models::{MetricValue, RiskCategory, RiskLevel};

/// Configuration defects found while building a rule table
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleTableError {
    #[error("Empty parameter name in {category}")]
    EmptyParameter { category: RiskCategory },

    #[error("Invalid low bound for {category}/{parameter}: {low}")]
    InvalidLowBound { category: RiskCategory, parameter: String, low: f64 },

    #[error("Invalid high bound for {category}/{parameter}: {high}")]
    InvalidHighBound { category: RiskCategory, parameter: String, high: f64 },

    #[error("Inverted band for {category}/{parameter}: low {low} > high {high}")]
    InvertedBand { category: RiskCategory, parameter: String, low: f64, high: f64 },

    #[error("Duplicate rule for {category}/{parameter}")]
    DuplicateRule { category: RiskCategory, parameter: String },

    #[error("Failed to read rule file: {0}")]
    Io(String),

    #[error("Failed to parse rule file: {0}")]
    Parse(String),
}

/// A numeric band for one (category, parameter) pair
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRule {
    pub category: RiskCategory,
    pub parameter: String,
    pub low: f64,
    /// May be `f64::INFINITY` for bands unbounded above
    pub high: f64,
}

impl ThresholdRule {
    pub fn new(category: RiskCategory, parameter: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            category,
            parameter: parameter.into(),
            low,
            high,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    /// True for finite values inside the inclusive band
    pub fn contains(&self, value: f64) -> bool {
        in_band(value, self.low, self.high)
    }

    pub fn classify(&self, value: &MetricValue) -> RiskLevel {
        classify(value, self.low, self.high)
    }

    fn validate(&self) -> Result<(), RuleTableError> {
        if self.parameter.trim().is_empty() {
            return Err(RuleTableError::EmptyParameter { category: self.category });
        }
        if !self.low.is_finite() {
            return Err(RuleTableError::InvalidLowBound {
                category: self.category,
                parameter: self.parameter.clone(),
                low: self.low,
            });
        }
        if self.high.is_nan() || self.high == f64::NEG_INFINITY {
            return Err(RuleTableError::InvalidHighBound {
                category: self.category,
                parameter: self.parameter.clone(),
                high: self.high,
            });
        }
        if self.low > self.high {
            return Err(RuleTableError::InvertedBand {
                category: self.category,
                parameter: self.parameter.clone(),
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Serialized form of a rule; `high: null` means unbounded above
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleEntry {
    category: RiskCategory,
    parameter: String,
    low: f64,
    #[serde(default)]
    high: Option<f64>,
}

impl From<RuleEntry> for ThresholdRule {
    fn from(entry: RuleEntry) -> Self {
        ThresholdRule::new(
            entry.category,
            entry.parameter,
            entry.low,
            entry.high.unwrap_or(f64::INFINITY),
        )
    }
}

/// Immutable, validated set of threshold rules
///
/// Rules keep their configuration order, which is also the evaluation and
/// display order within a category.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<ThresholdRule>,
}

impl RuleTable {
    /// Validate and build a table; the whole table is rejected on the first defect
    pub fn new(rules: Vec<ThresholdRule>) -> Result<Self, RuleTableError> {
        {
            let mut seen = HashSet::new();
            for rule in &rules {
                rule.validate()?;
                if !seen.insert((rule.category, rule.parameter.as_str())) {
                    return Err(RuleTableError::DuplicateRule {
                        category: rule.category,
                        parameter: rule.parameter.clone(),
                    });
                }
            }
        }
        Ok(Self { rules })
    }

    /// The standard risk thresholds, built once per process
    pub fn standard() -> &'static RuleTable {
        static STANDARD: OnceLock<RuleTable> = OnceLock::new();
        STANDARD.get_or_init(|| RuleTable {
            rules: standard_rules(),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, RuleTableError> {
        let entries: Vec<RuleEntry> =
            serde_json::from_str(json).map_err(|e| RuleTableError::Parse(e.to_string()))?;
        Self::new(entries.into_iter().map(ThresholdRule::from).collect())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RuleTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RuleTableError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Bounds for a (category, parameter) pair
    pub fn lookup(&self, category: RiskCategory, parameter: &str) -> Option<(f64, f64)> {
        self.rules
            .iter()
            .find(|r| r.category == category && r.parameter == parameter)
            .map(ThresholdRule::bounds)
    }

    /// Rules configured under a category, in configuration order
    pub fn rules_for(&self, category: RiskCategory) -> impl Iterator<Item = &ThresholdRule> {
        self.rules.iter().filter(move |r| r.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThresholdRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn standard_rules() -> Vec<ThresholdRule> {
    use RiskCategory::*;

    vec![
        ThresholdRule::new(MarketRisk, "Volatility", 0.1, 0.2),
        ThresholdRule::new(MarketRisk, "Beta", 0.5, 1.5),
        ThresholdRule::new(MarketRisk, "Correlation with ^NSEI", 0.7, 1.0),
        ThresholdRule::new(FinancialRisk, "debtToEquity", 0.5, 1.5),
        ThresholdRule::new(FinancialRisk, "currentRatio", 1.5, 2.0),
        ThresholdRule::new(FinancialRisk, "quickRatio", 1.0, 1.5),
        ThresholdRule::new(FinancialRisk, "Profit Margins", 20.0, 30.0),
        ThresholdRule::new(FinancialRisk, "returnOnAssets", 10.0, 20.0),
        ThresholdRule::new(FinancialRisk, "returnOnEquity", 15.0, 25.0),
        ThresholdRule::new(LiquidityRisk, "Volume", 1_000_000.0, f64::INFINITY),
        ThresholdRule::new(LiquidityRisk, "Average Volume", 500_000.0, 1_000_000.0),
        ThresholdRule::new(LiquidityRisk, "marketCap", 10_000_000_000.0, f64::INFINITY),
    ]
}
