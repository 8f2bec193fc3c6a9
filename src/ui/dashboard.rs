use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

use super::components::{format_large_number, risk_level_span, styled_score_span, terminal_color};
use super::state::{DashboardState, DashboardTab};
use crate::analysis::PortfolioAssessment;
use crate::models::{EvaluationResult, MetricValue, RiskCategory, RiskLevel};

/// Risk dashboard over a finished scoring run
pub struct Dashboard<'a> {
    assessment: &'a PortfolioAssessment,
}

impl<'a> Dashboard<'a> {
    pub fn new(assessment: &'a PortfolioAssessment) -> Self {
        Self { assessment }
    }

    pub fn draw(&self, f: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status bar
            ])
            .split(f.area());

        self.render_tab_bar(f, chunks[0], state);

        match state.selected() {
            DashboardTab::Summary => self.render_summary(f, chunks[1]),
            DashboardTab::Category(category) => self.render_category(f, chunks[1], category),
            DashboardTab::Scores => self.render_scores(f, chunks[1]),
        }

        self.render_status_bar(f, chunks[2]);
    }

    fn render_tab_bar(&self, f: &mut Frame, area: Rect, state: &DashboardState) {
        let titles: Vec<&str> = DashboardTab::ALL.iter().map(|t| t.title()).collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Stock Risk Analysis Dashboard"))
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .select(state.selected_index());

        f.render_widget(tabs, area);
    }

    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let assessment = self.assessment;
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Total Portfolio Score: ", Style::default().fg(Color::Gray)),
                styled_score_span(assessment.portfolio_score),
            ]),
            Line::from(""),
        ];

        for (category, score) in assessment.category_scores.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", category), Style::default().fg(Color::Gray)),
                styled_score_span(score),
            ]));
        }

        lines.push(Line::from(""));
        match assessment.best_stock() {
            Some(best) => lines.push(Line::from(vec![
                Span::styled("Best Stock: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    best.symbol.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" (Investment Score "),
                styled_score_span(best.score),
                Span::raw(")"),
            ])),
            None => lines.push(Line::from("No stocks evaluated")),
        }

        if !assessment.skipped_symbols.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("No data for: {}", assessment.skipped_symbols.join(", ")),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Summary"));
        f.render_widget(paragraph, area);
    }

    fn render_category(&self, f: &mut Frame, area: Rect, category: RiskCategory) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let header = Row::new(vec!["Stock Symbol", "Parameter", "Value", "Risk Level"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .assessment
            .results_for(category)
            .map(|result| {
                Row::new(vec![
                    Cell::from(result.stock_symbol.clone()),
                    Cell::from(result.parameter.clone()),
                    Cell::from(display_value(result)),
                    Cell::from(risk_level_span(result.risk_level)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Length(26),
                Constraint::Length(18),
                Constraint::Min(18),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(category.label()));
        f.render_widget(table, chunks[0]);

        self.render_distribution(f, chunks[1], category);
    }

    fn render_distribution(&self, f: &mut Frame, area: Rect, category: RiskCategory) {
        let lines: Vec<Line> = self
            .assessment
            .risk_distribution(category)
            .into_iter()
            .map(|distribution| {
                let mut spans = vec![Span::styled(
                    format!("{:<24}", distribution.parameter),
                    Style::default().fg(Color::Gray),
                )];
                for level in RiskLevel::ALL {
                    spans.push(Span::styled(
                        format!(" {} {}", level.label(), distribution.counts.get(level)),
                        Style::default().fg(terminal_color(level.color())),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Risk Distribution by Parameter"));
        f.render_widget(paragraph, area);
    }

    fn render_scores(&self, f: &mut Frame, area: Rect) {
        let bars: Vec<Bar> = self
            .assessment
            .stock_scores
            .iter()
            .map(|entry| {
                let color = if entry.score >= 0 { Color::Green } else { Color::Red };
                Bar::default()
                    .label(Line::from(entry.symbol.clone()))
                    .value(u64::from(entry.score.unsigned_abs()))
                    .text_value(entry.score.to_string())
                    .style(Style::default().fg(color))
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Investment Scores for Selected Stocks"),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(8)
            .bar_gap(2);
        f.render_widget(chart, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = vec![Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled("Tab", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" to switch views • ", Style::default().fg(Color::Gray)),
            Span::styled("1-5", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" to jump • ", Style::default().fg(Color::Gray)),
            Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ])];

        let paragraph = Paragraph::new(status_text)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(paragraph, area);
    }
}

fn display_value(result: &EvaluationResult) -> String {
    match &result.value {
        Some(MetricValue::Number(n)) => format_large_number(*n),
        _ => result.display_value(),
    }
}
