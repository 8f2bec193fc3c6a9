//! Terminal dashboard for a scoring run

pub mod app;
pub mod components;
pub mod dashboard;
pub mod state;

pub use app::run_app;
pub use dashboard::Dashboard;
pub use state::{DashboardState, DashboardTab};
