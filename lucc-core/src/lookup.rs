//! Class-code lookup tables and the carbon pool set.
//!
//! A [`LookupTable`] maps land-cover class codes to one numeric value, e.g.
//! the above-ground carbon density of each class. Tables are built once per
//! run and read-only thereafter, so they can be shared freely across
//! reclassification calls.

use crate::raster::FloatValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One additive carbon reservoir category.
///
/// Pools are independent and additive: the total stock of a pixel is the sum
/// over all configured pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CarbonPool {
    /// Above-ground biomass.
    Above,
    /// Below-ground biomass.
    Below,
    /// Soil carbon.
    Soil,
    /// Dead organic matter.
    Dead,
}

impl CarbonPool {
    /// All pools, in canonical column order.
    pub const ALL: [CarbonPool; 4] = [
        CarbonPool::Above,
        CarbonPool::Below,
        CarbonPool::Soil,
        CarbonPool::Dead,
    ];

    /// The normalized source column name for this pool.
    pub fn column_name(&self) -> &'static str {
        match self {
            CarbonPool::Above => "c_above",
            CarbonPool::Below => "c_below",
            CarbonPool::Soil => "c_soil",
            CarbonPool::Dead => "c_dead",
        }
    }
}

impl fmt::Display for CarbonPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// The normalized source column name for the annual sequestration rate.
pub const RATE_COLUMN: &str = "c_sequestration";

/// An immutable mapping from land-cover class code to a numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    name: String,
    values: HashMap<i32, FloatValue>,
}

impl LookupTable {
    /// Create a named lookup table from class-code/value pairs.
    pub fn new(name: impl Into<String>, values: HashMap<i32, FloatValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Name of this table, used in error messages (typically the column name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value mapped to `code`, if any.
    pub fn get(&self, code: i32) -> Option<FloatValue> {
        self.values.get(&code).copied()
    }

    /// Whether `code` has an entry.
    pub fn contains(&self, code: i32) -> bool {
        self.values.contains_key(&code)
    }

    /// Number of class codes with an entry.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The validated set of lookup tables for one run.
///
/// Holds one table per configured stock pool (any non-empty subset of
/// [`CarbonPool::ALL`], in canonical order) plus the sequestration-rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolTables {
    /// Stock tables for the pools present in the source, in canonical order.
    pub stocks: Vec<(CarbonPool, LookupTable)>,
    /// Sequestration-rate table.
    pub rate: LookupTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_column_names() {
        assert_eq!(CarbonPool::Above.column_name(), "c_above");
        assert_eq!(CarbonPool::Below.column_name(), "c_below");
        assert_eq!(CarbonPool::Soil.column_name(), "c_soil");
        assert_eq!(CarbonPool::Dead.column_name(), "c_dead");
    }

    #[test]
    fn lookup_access() {
        let table = LookupTable::new("c_above", HashMap::from([(1, 10.0), (2, 20.0)]));
        assert_eq!(table.name(), "c_above");
        assert_eq!(table.get(1), Some(10.0));
        assert_eq!(table.get(7), None);
        assert!(table.contains(2));
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
