use crate::models::{MetricValue, RiskColor, RiskLevel};

/// Classify a metric value against a (low, high) band.
///
/// Values below `low` are Good, values inside the inclusive band are Neutral and
/// values above `high` are Bad. Anything that is not a finite number yields
/// `DataNotAvailable`; this never fails.
pub fn classify(value: &MetricValue, low: f64, high: f64) -> RiskLevel {
    let Some(value) = value.as_finite() else {
        return RiskLevel::DataNotAvailable;
    };

    if value < low {
        RiskLevel::Good
    } else if in_band(value, low, high) {
        RiskLevel::Neutral
    } else {
        RiskLevel::Bad
    }
}

/// Whether a finite value lies inside the inclusive `[low, high]` band
pub fn in_band(value: f64, low: f64, high: f64) -> bool {
    value.is_finite() && low <= value && value <= high
}

/// Display color for a risk level
pub fn color_for(level: RiskLevel) -> RiskColor {
    match level {
        RiskLevel::Good => RiskColor::Green,
        RiskLevel::Neutral => RiskColor::Yellow,
        RiskLevel::Bad => RiskColor::Red,
        RiskLevel::DataNotAvailable => RiskColor::Black,
    }
}
