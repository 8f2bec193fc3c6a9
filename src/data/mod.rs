// Record sources and tabular ingestion
// Stock records are read once into memory; the scoring engine only sees the
// `RecordSource` trait.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{MetricValue, StockRecord};

pub mod metrics;

pub use metrics::MetricsTable;

/// Data loading errors
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Symbol column '{column}' not found in header")]
    MissingSymbolColumn { column: String },
}

/// Read-only lookup of stock records by symbol
pub trait RecordSource {
    /// `None` when there is no record for the symbol
    fn get(&self, symbol: &str) -> Option<&StockRecord>;

    /// Available symbols in source order
    fn symbols(&self) -> Vec<String>;
}

/// Records held in memory, in load order
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    records: Vec<StockRecord>,
    index: HashMap<String, usize>,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = StockRecord>) -> Self {
        let mut source = Self::new();
        for record in records {
            source.insert(record);
        }
        source
    }

    /// Add a record; the first record for a symbol wins
    pub fn insert(&mut self, record: StockRecord) -> bool {
        if self.index.contains_key(&record.symbol) {
            warn!("Duplicate row for {}, keeping the first one", record.symbol);
            return false;
        }
        self.index.insert(record.symbol.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for InMemoryRecordSource {
    fn get(&self, symbol: &str) -> Option<&StockRecord> {
        self.index.get(symbol).map(|&i| &self.records[i])
    }

    fn symbols(&self) -> Vec<String> {
        self.records.iter().map(|r| r.symbol.clone()).collect()
    }
}

/// Load stock records from a CSV file
pub fn load_records_csv(
    path: impl AsRef<Path>,
    symbol_column: &str,
) -> Result<InMemoryRecordSource, DataError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let source = read_records_csv(file, symbol_column)?;
    info!("Loaded {} stock records from {}", source.len(), path.display());
    Ok(source)
}

/// Parse stock records from CSV. Every column except the symbol column becomes
/// a metric; cells missing from short rows are left out of the record.
pub fn read_records_csv<R: Read>(
    reader: R,
    symbol_column: &str,
) -> Result<InMemoryRecordSource, DataError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let symbol_index = find_column(&headers, symbol_column)?;

    let mut source = InMemoryRecordSource::new();
    for row in reader.records() {
        let row = row?;
        let symbol = row.get(symbol_index).unwrap_or("").trim();
        if symbol.is_empty() {
            debug!("Skipping row {:?} without a symbol", row.position().map(|p| p.line()));
            continue;
        }

        let mut record = StockRecord::new(symbol);
        for (i, (column, cell)) in headers.iter().zip(row.iter()).enumerate() {
            if i == symbol_index {
                continue;
            }
            record.insert(column.trim(), MetricValue::parse(cell));
        }
        source.insert(record);
    }

    Ok(source)
}

pub(crate) fn find_column(headers: &csv::StringRecord, column: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| DataError::MissingSymbolColumn {
            column: column.to_string(),
        })
}

/// Closest available symbol to a query, for "did you mean" hints
pub fn suggest_symbol<'a>(query: &str, symbols: &'a [String]) -> Option<&'a str> {
    let matcher = SkimMatcherV2::default().ignore_case();
    symbols
        .iter()
        .filter_map(|s| matcher.fuzzy_match(s, query).map(|score| (score, s)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, s)| s.as_str())
}
