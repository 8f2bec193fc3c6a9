/// UI helpers shared by the dashboard views
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::models::{RiskColor, RiskLevel};

/// Terminal color for a risk color. Black is shown as dark gray so it stays
/// readable on dark terminals.
pub fn terminal_color(color: RiskColor) -> Color {
    match color {
        RiskColor::Green => Color::Green,
        RiskColor::Yellow => Color::Yellow,
        RiskColor::Red => Color::Red,
        RiskColor::Black => Color::DarkGray,
    }
}

pub fn risk_level_span(level: RiskLevel) -> Span<'static> {
    Span::styled(level.label(), Style::default().fg(terminal_color(level.color())))
}

/// Span for a signed score, green when non-negative
pub fn styled_score_span(score: i32) -> Span<'static> {
    let formatted = if score > 0 {
        format!("+{}", score)
    } else {
        format!("{}", score)
    };

    if score >= 0 {
        Span::styled(formatted, Style::default().fg(Color::Green))
    } else {
        Span::styled(formatted, Style::default().fg(Color::Red))
    }
}

/// Format large numbers with suffixes
pub fn format_large_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000_000.0 {
        format!("{:.1}T", value / 1_000_000_000_000.0)
    } else if abs >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{}", value)
    }
}
