pub mod classifier;
pub mod risk_engine;
pub mod thresholds;

pub use classifier::{classify, color_for};
pub use risk_engine::{
    best_stock, CategoryScores, LevelCounts, ParameterDistribution, PortfolioAssessment,
    RiskScoringEngine, StockScore, StockScores,
};
pub use thresholds::{RuleTable, RuleTableError, ThresholdRule};
