pub mod analysis;
pub mod data;
pub mod models;
pub mod report;
pub mod ui;

pub use analysis::{best_stock, classify, color_for, PortfolioAssessment, RiskScoringEngine, RuleTable};
pub use data::{InMemoryRecordSource, RecordSource};
pub use models::{EvaluationResult, MetricValue, RiskCategory, RiskColor, RiskLevel, StockRecord};
