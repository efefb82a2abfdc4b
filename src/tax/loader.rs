//! CSV-based tax table loader
//!
//! Bracket tables change every tax year, so they can be shipped as data files
//! instead of code. Each CSV has two columns, `upper_limit,marginal_rate`,
//! with `inf` accepted for the unbounded top bracket.

use std::fs::File;
use std::path::Path;

use log::debug;

use super::brackets::{Bracket, BracketTable};
use crate::error::EngineError;

/// Load one bracket table from a two-column CSV.
pub fn load_bracket_table(path: &Path, table: &'static str) -> Result<BracketTable, EngineError> {
    let file = File::open(path.join(format!("{table}.csv")))
        .map_err(|source| EngineError::TableOpen { table, source })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut brackets = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|source| EngineError::TableLoad { table, source })?;
        let limit = parse_limit(record.get(0).unwrap_or(""), table, row)?;
        let rate: f64 = record
            .get(1)
            .unwrap_or("")
            .trim()
            .parse()
            .map_err(|_| EngineError::TableRow {
                table,
                row,
                message: format!("invalid marginal rate: {:?}", record.get(1)),
            })?;
        brackets.push(Bracket::new(limit, rate));
    }

    debug!("loaded {} brackets for table {}", brackets.len(), table);
    BracketTable::new(brackets)
}

fn parse_limit(raw: &str, table: &'static str, row: usize) -> Result<f64, EngineError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("inf") || raw.eq_ignore_ascii_case("infinity") {
        return Ok(f64::INFINITY);
    }
    raw.parse().map_err(|_| EngineError::TableRow {
        table,
        row,
        message: format!("invalid upper limit: {raw:?}"),
    })
}

/// All year tables loaded from a directory of CSVs
#[derive(Debug, Clone)]
pub struct LoadedTaxTables {
    pub income_tax: BracketTable,
    pub purchase_tax_single: BracketTable,
    pub purchase_tax_additional: BracketTable,
}

impl LoadedTaxTables {
    /// Load the yearly bracket tables from `path`. The NI/health tiers and
    /// scalar constants are not loaded here; they change less often and are
    /// supplied when assembling a [`super::tables::TaxConfig`].
    pub fn load_from(path: &Path) -> Result<Self, EngineError> {
        Ok(Self {
            income_tax: load_bracket_table(path, "income_tax_brackets")?,
            purchase_tax_single: load_bracket_table(path, "purchase_tax_single")?,
            purchase_tax_additional: load_bracket_table(path, "purchase_tax_additional")?,
        })
    }
}
