//! Dense raster grids with a reserved nodata sentinel.
//!
//! A [`Raster`] is a rectangular, row-major grid of values together with one
//! reserved value marking "no valid data" at a pixel. Land-cover inputs are
//! grids of integer class codes ([`ClassRaster`]); every derived product is a
//! grid of floating-point values ([`ValueRaster`]). A pixel is always either a
//! regular value or exactly the sentinel, never ambiguous between the two.
//!
//! Rasters are write-once artifacts: they are produced whole by one stage,
//! consumed by the next and never mutated after creation. Persistence uses
//! bincode so that a saved raster reloads bit-identically.

use crate::errors::LuccResult;
use ndarray::Array2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Floating point value used for all derived rasters.
pub type FloatValue = f64;

/// A land-cover raster of integer class codes.
pub type ClassRaster = Raster<i32>;

/// A raster of continuous values (stocks, rates, differences).
pub type ValueRaster = Raster<FloatValue>;

/// Nodata sentinel used for derived value rasters unless configured otherwise.
pub const DEFAULT_NODATA: FloatValue = -1.0;

/// A grid of values with a reserved nodata sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster<T> {
    data: Array2<T>,
    nodata: T,
}

impl<T: Copy + PartialEq> Raster<T> {
    /// Create a raster from a grid of values and its nodata sentinel.
    pub fn new(data: Array2<T>, nodata: T) -> Self {
        Self { data, nodata }
    }

    /// Grid shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// The reserved nodata sentinel for this raster.
    pub fn nodata(&self) -> T {
        self.nodata
    }

    /// Whether `value` is this raster's nodata sentinel.
    pub fn is_nodata(&self, value: T) -> bool {
        value == self.nodata
    }

    /// The underlying grid.
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[[row, col]]
    }
}

impl<T: Copy + PartialEq + Serialize + DeserializeOwned> Raster<T> {
    /// Save this raster to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> LuccResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a raster from a file previously written by [`Raster::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> LuccResult<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let raster = bincode::deserialize_from(&mut reader)?;
        Ok(raster)
    }
}
