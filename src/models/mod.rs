use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Risk categories a parameter can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskCategory {
    MarketRisk,
    FinancialRisk,
    LiquidityRisk,
}

impl RiskCategory {
    /// All categories in display order
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::MarketRisk,
        RiskCategory::FinancialRisk,
        RiskCategory::LiquidityRisk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::MarketRisk => "Market Risk",
            RiskCategory::FinancialRisk => "Financial Risk",
            RiskCategory::LiquidityRisk => "Liquidity Risk",
        }
    }

    /// Position in `ALL`, used to index fixed-size score arrays
    pub fn index(&self) -> usize {
        match self {
            RiskCategory::MarketRisk => 0,
            RiskCategory::FinancialRisk => 1,
            RiskCategory::LiquidityRisk => 2,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of comparing a metric value against its threshold band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Good,
    Neutral,
    Bad,
    DataNotAvailable,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Good,
        RiskLevel::Neutral,
        RiskLevel::Bad,
        RiskLevel::DataNotAvailable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Good => "Good",
            RiskLevel::Neutral => "Neutral",
            RiskLevel::Bad => "Bad",
            RiskLevel::DataNotAvailable => "Data not available",
        }
    }

    /// Contribution of this level to category, stock and portfolio scores
    pub fn score_delta(&self) -> i32 {
        match self {
            RiskLevel::Good => 1,
            RiskLevel::Bad => -1,
            RiskLevel::Neutral | RiskLevel::DataNotAvailable => 0,
        }
    }

    pub fn color(&self) -> RiskColor {
        crate::analysis::classifier::color_for(*self)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display color attached to a risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Red,
    Black,
}

impl RiskColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskColor::Green => "green",
            RiskColor::Yellow => "yellow",
            RiskColor::Red => "red",
            RiskColor::Black => "black",
        }
    }
}

impl fmt::Display for RiskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric cell, resolved once at ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    Number(f64),
    /// Present in the record but the cell is empty
    Missing,
    /// Present but not a finite number; the raw text is kept for display
    Unparseable(String),
}

impl MetricValue {
    /// Resolve a raw cell into a tagged value
    ///
    /// Text such as `N/A`, `null` or `1,5` is not a number and keeps its raw form.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return MetricValue::Missing;
        }

        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => MetricValue::Number(number),
            _ => MetricValue::Unparseable(trimmed.to_string()),
        }
    }

    /// The numeric value if it is a finite number
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Missing => Ok(()),
            MetricValue::Unparseable(raw) => f.write_str(raw),
        }
    }
}

/// Named metric values available for one stock symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub symbol: String,
    pub metrics: HashMap<String, MetricValue>,
}

impl StockRecord {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            metrics: HashMap::new(),
        }
    }

    pub fn with_metric(mut self, parameter: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(parameter.into(), value.into());
        self
    }

    pub fn insert(&mut self, parameter: impl Into<String>, value: MetricValue) {
        self.metrics.insert(parameter.into(), value);
    }

    /// `None` means the parameter key is absent from the record
    pub fn get(&self, parameter: &str) -> Option<&MetricValue> {
        self.metrics.get(parameter)
    }
}

pub const DATA_NOT_AVAILABLE: &str = "Data not available";

/// One classified (stock, parameter) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub stock_symbol: String,
    pub category: RiskCategory,
    pub parameter: String,
    /// `None` when the record has no such parameter at all
    pub value: Option<MetricValue>,
    pub risk_level: RiskLevel,
    pub color: RiskColor,
}

impl EvaluationResult {
    pub fn display_value(&self) -> String {
        match &self.value {
            Some(value) => value.to_string(),
            None => DATA_NOT_AVAILABLE.to_string(),
        }
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: String,
    pub metrics_path: Option<String>,
    pub rules_path: Option<String>,
    pub symbol_column: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            data_path: std::env::var("STOCK_RISK_DATA_PATH")
                .unwrap_or_else(|_| "stock_data.csv".to_string()),
            metrics_path: non_empty_var("STOCK_RISK_METRICS_PATH"),
            rules_path: non_empty_var("STOCK_RISK_RULES_PATH"),
            symbol_column: std::env::var("STOCK_RISK_SYMBOL_COLUMN")
                .unwrap_or_else(|_| "Stock Symbol".to_string()),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
