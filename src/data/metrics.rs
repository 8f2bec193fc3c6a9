use std::io::Read;
use std::path::Path;
use tracing::info;

use super::{find_column, DataError};

/// Pre-computed per-stock metrics shown alongside the risk tables.
/// Cells are kept as text; nothing here is scored.
#[derive(Debug, Clone, Default)]
pub struct MetricsTable {
    columns: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl MetricsTable {
    pub fn load(path: impl AsRef<Path>, symbol_column: &str) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_reader(file, symbol_column)?;
        info!("Loaded {} metric rows from {}", table.rows.len(), path.display());
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, symbol_column: &str) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let symbol_index = find_column(&headers, symbol_column)?;

        let columns = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != symbol_index)
            .map(|(_, h)| h.trim().to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for row in reader.records() {
            let row = row?;
            let symbol = row.get(symbol_index).unwrap_or("").trim().to_string();
            if symbol.is_empty() {
                continue;
            }
            let cells = (0..headers.len())
                .filter(|i| *i != symbol_index)
                .map(|i| row.get(i).unwrap_or("").trim().to_string())
                .collect();
            rows.push((symbol, cells));
        }

        Ok(Self { columns, rows })
    }

    /// Metric column names, without the symbol column
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows for the selected symbols, in table order
    pub fn rows_for<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<(&str, &[String])> {
        self.rows
            .iter()
            .filter(|(symbol, _)| symbols.iter().any(|s| s.as_ref() == symbol))
            .map(|(symbol, cells)| (symbol.as_str(), cells.as_slice()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
