//! Loading and validating the carbon-pool lookup table source.
//!
//! The source is a semicolon-delimited table keyed by land-cover class code
//! (`lucode`), with one numeric column per carbon pool plus the
//! `c_sequestration` rate column. Column names are trimmed and lowercased on
//! load, so `" C_Above "` and `c_above` are the same column. Any non-empty
//! subset of the four stock pool columns is accepted; a table with no stock
//! column at all is rejected.

use lucc_core::errors::{LuccError, LuccResult};
use lucc_core::lookup::{CarbonPool, LookupTable, PoolTables, RATE_COLUMN};
use lucc_core::raster::FloatValue;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Key column holding the land-cover class code.
pub const KEY_COLUMN: &str = "lucode";

const DELIMITER: char = ';';

/// Load and validate the lookup tables from a semicolon-delimited file.
pub fn load_pool_tables<P: AsRef<Path>>(path: P) -> LuccResult<PoolTables> {
    let content = fs::read_to_string(path)?;
    parse_pool_tables(&content)
}

/// Parse lookup tables from semicolon-delimited text.
///
/// Fails with [`LuccError::Schema`] if the key column is missing, no stock
/// pool column is present, the rate column is missing, or a cell cannot be
/// parsed as a number.
pub fn parse_pool_tables(content: &str) -> LuccResult<PoolTables> {
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| LuccError::Schema("lookup table source is empty".to_string()))?;
    let columns: Vec<String> = header
        .split(DELIMITER)
        .map(|c| c.trim().to_lowercase())
        .collect();

    let key_index = find_column(&columns, KEY_COLUMN)?;
    let pool_indexes: Vec<(CarbonPool, usize)> = CarbonPool::ALL
        .iter()
        .filter_map(|&pool| {
            columns
                .iter()
                .position(|c| c == pool.column_name())
                .map(|i| (pool, i))
        })
        .collect();
    if pool_indexes.is_empty() {
        return Err(LuccError::Schema(format!(
            "no stock pool column present (expected at least one of {})",
            CarbonPool::ALL.map(|p| p.column_name()).join(", ")
        )));
    }
    let rate_index = find_column(&columns, RATE_COLUMN)?;

    let mut pools: Vec<(CarbonPool, HashMap<i32, FloatValue>)> = pool_indexes
        .iter()
        .map(|&(pool, _)| (pool, HashMap::new()))
        .collect();
    let mut rate: HashMap<i32, FloatValue> = HashMap::new();

    for (line_number, line) in lines {
        let cells: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
        let code = parse_cell::<i32>(&cells, key_index, KEY_COLUMN, line_number)?;
        for ((_, values), &(pool, index)) in pools.iter_mut().zip(&pool_indexes) {
            let value =
                parse_cell::<FloatValue>(&cells, index, pool.column_name(), line_number)?;
            values.insert(code, value);
        }
        let value = parse_cell::<FloatValue>(&cells, rate_index, RATE_COLUMN, line_number)?;
        rate.insert(code, value);
    }

    Ok(PoolTables {
        stocks: pools
            .into_iter()
            .map(|(pool, values)| (pool, LookupTable::new(pool.column_name(), values)))
            .collect(),
        rate: LookupTable::new(RATE_COLUMN, rate),
    })
}

fn find_column(columns: &[String], name: &str) -> LuccResult<usize> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| LuccError::Schema(format!("required column '{name}' not found")))
}

fn parse_cell<T: std::str::FromStr>(
    cells: &[&str],
    index: usize,
    column: &str,
    line_number: usize,
) -> LuccResult<T> {
    let cell = cells.get(index).copied().unwrap_or("");
    cell.parse().map_err(|_| {
        LuccError::Schema(format!(
            "could not parse '{}' in column '{}' on line {}",
            cell,
            column,
            line_number + 1
        ))
    })
}
