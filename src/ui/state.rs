use crate::models::RiskCategory;

/// Dashboard tabs, in tab bar order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Summary,
    Category(RiskCategory),
    Scores,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 5] = [
        DashboardTab::Summary,
        DashboardTab::Category(RiskCategory::MarketRisk),
        DashboardTab::Category(RiskCategory::FinancialRisk),
        DashboardTab::Category(RiskCategory::LiquidityRisk),
        DashboardTab::Scores,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::Summary => "Summary",
            DashboardTab::Category(category) => category.label(),
            DashboardTab::Scores => "Investment Scores",
        }
    }
}

/// Tab selection and quit flag; no terminal needed
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    selected_tab: usize,
    pub should_quit: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_tab
    }

    pub fn selected(&self) -> DashboardTab {
        DashboardTab::ALL[self.selected_tab]
    }

    pub fn next_tab(&mut self) {
        self.selected_tab = (self.selected_tab + 1) % DashboardTab::ALL.len();
    }

    pub fn previous_tab(&mut self) {
        self.selected_tab = if self.selected_tab == 0 {
            DashboardTab::ALL.len() - 1
        } else {
            self.selected_tab - 1
        };
    }

    pub fn select_tab(&mut self, tab: usize) {
        if tab < DashboardTab::ALL.len() {
            self.selected_tab = tab;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
