use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use super::dashboard::Dashboard;
use super::state::DashboardState;
use crate::analysis::PortfolioAssessment;

/// Apply a key press to the dashboard state
pub fn handle_key_event(state: &mut DashboardState, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => state.quit(),
        KeyCode::Tab | KeyCode::Right => state.next_tab(),
        KeyCode::BackTab | KeyCode::Left => state.previous_tab(),
        KeyCode::Char(c @ '1'..='5') => state.select_tab(c as usize - '1' as usize),
        _ => {}
    }
}

/// Run the dashboard until the user quits
pub fn run_app(assessment: &PortfolioAssessment) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let dashboard = Dashboard::new(assessment);
    let mut state = DashboardState::new();

    let result = loop {
        if let Err(e) = terminal.draw(|f| dashboard.draw(f, &state)) {
            break Err(e.into());
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_key_event(&mut state, key.code);
                if state.should_quit {
                    break Ok(());
                }
            }
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
    };

    // Cleanup terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
