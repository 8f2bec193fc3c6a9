use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stock_risk::analysis::{RiskScoringEngine, RuleTable};
use stock_risk::data::{load_records_csv, suggest_symbol, MetricsTable, RecordSource};
use stock_risk::models::Config;
use stock_risk::{report, ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Tui,
}

#[derive(Parser, Debug)]
#[command(name = "stock-risk")]
#[command(about = "Score stocks against market, financial and liquidity risk thresholds")]
struct Cli {
    /// CSV file with one row per stock symbol
    #[arg(short, long)]
    data: Option<String>,

    /// CSV file with additional pre-computed metrics to display
    #[arg(short, long)]
    metrics: Option<String>,

    /// JSON file replacing the standard threshold rules
    #[arg(short, long)]
    rules: Option<String>,

    /// Name of the symbol column
    #[arg(long)]
    symbol_column: Option<String>,

    /// Stock symbols to score (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Score every symbol in the data file
    #[arg(short, long, conflicts_with = "symbols")]
    all: bool,

    /// List available symbols and exit
    #[arg(long)]
    list: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the terminal clean while the dashboard owns it
    let default_filter = if cli.format == OutputFormat::Tui {
        "stock_risk=error"
    } else {
        "stock_risk=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let data_path = cli.data.clone().unwrap_or(config.data_path);
    let symbol_column = cli.symbol_column.clone().unwrap_or(config.symbol_column);

    let owned_rules;
    let rules = match cli.rules.clone().or(config.rules_path) {
        Some(path) => {
            owned_rules = RuleTable::from_json_file(&path)
                .with_context(|| format!("Invalid threshold rules in {}", path))?;
            if owned_rules.is_empty() {
                warn!("No threshold rules in {}, every stock will score 0", path);
            } else {
                info!("Using {} threshold rules from {}", owned_rules.len(), path);
            }
            &owned_rules
        }
        None => RuleTable::standard(),
    };

    let source = load_records_csv(&data_path, &symbol_column)
        .with_context(|| format!("Failed to load stock data from {}", data_path))?;
    let available = source.symbols();

    if cli.list {
        for symbol in &available {
            println!("{}", symbol);
        }
        return Ok(());
    }

    let selected = select_symbols(&cli, &available);
    for symbol in &selected {
        if source.get(symbol).is_none() {
            match suggest_symbol(symbol, &available) {
                Some(suggestion) => warn!("Unknown symbol {} (did you mean {}?)", symbol, suggestion),
                None => warn!("Unknown symbol {}", symbol),
            }
        }
    }

    let metrics = match cli.metrics.clone().or(config.metrics_path) {
        Some(path) => {
            let table = MetricsTable::load(&path, &symbol_column)
                .with_context(|| format!("Failed to load metrics from {}", path))?;
            if table.is_empty() {
                warn!("No metric rows in {}", path);
            }
            Some(table)
        }
        None => None,
    };

    let engine = RiskScoringEngine::new(rules);
    let assessment = engine.score_portfolio(&selected, &source);

    match cli.format {
        OutputFormat::Text => print!("{}", report::render_text(&assessment, metrics.as_ref())),
        OutputFormat::Json => println!("{}", report::render_json(&assessment)?),
        OutputFormat::Tui => ui::run_app(&assessment)?,
    }

    Ok(())
}

/// Explicit symbols, every symbol, or the first available one
fn select_symbols(cli: &Cli, available: &[String]) -> Vec<String> {
    if cli.all {
        return available.to_vec();
    }

    let requested: Vec<String> = cli
        .symbols
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if requested.is_empty() {
        available.iter().take(1).cloned().collect()
    } else {
        requested
    }
}
