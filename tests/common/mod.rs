//! Common test utilities and helpers

/// Test data utilities
pub mod test_data {
    use stock_risk::analysis::RuleTable;
    use stock_risk::data::InMemoryRecordSource;
    use stock_risk::models::StockRecord;

    /// A record with every standard parameter inside its band
    pub fn neutral_record(symbol: &str) -> StockRecord {
        RuleTable::standard()
            .iter()
            .fold(StockRecord::new(symbol), |record, rule| {
                record.with_metric(rule.parameter.clone(), rule.low)
            })
    }

    /// A neutral record with the given parameters overridden
    pub fn record_with(symbol: &str, overrides: &[(&str, f64)]) -> StockRecord {
        overrides
            .iter()
            .fold(neutral_record(symbol), |record, (parameter, value)| {
                record.with_metric(*parameter, *value)
            })
    }

    /// Three stocks: RELIANCE scores +3, TCS scores +1, INFY scores -2
    pub fn sample_source() -> InMemoryRecordSource {
        InMemoryRecordSource::from_records(vec![
            record_with(
                "RELIANCE",
                &[("Volatility", 0.05), ("debtToEquity", 0.2), ("Average Volume", 100_000.0)],
            ),
            record_with("TCS", &[("Beta", 0.3)]),
            record_with("INFY", &[("Beta", 2.0), ("returnOnEquity", 40.0)]),
        ])
    }
}

/// Logging utilities for tests
pub mod logging {
    use tracing::{debug, info};

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    /// Log test data
    #[allow(dead_code)]
    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}
