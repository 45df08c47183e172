//! Temporal accumulation of a rate difference over an elapsed time span.

use crate::algebra::scale;
use crate::errors::{LuccError, LuccResult};
use crate::raster::{FloatValue, ValueRaster};
use serde::{Deserialize, Serialize};

/// A validated time span between two land-cover snapshots.
///
/// Construction fails if the duration is not a positive whole number of
/// years, so a `Period` in hand always has `end_year > start_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    start_year: i32,
    end_year: i32,
}

impl Period {
    /// Create a period, rejecting zero or negative durations.
    pub fn new(start_year: i32, end_year: i32) -> LuccResult<Self> {
        if end_year <= start_year {
            return Err(LuccError::InvalidPeriod {
                start_year,
                end_year,
            });
        }
        Ok(Self {
            start_year,
            end_year,
        })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Elapsed years, always positive.
    pub fn duration(&self) -> i32 {
        self.end_year - self.start_year
    }
}

/// Scale a rate-difference raster by the period's elapsed years.
///
/// Nodata pixels stay nodata; everything else becomes `value * duration`.
pub fn accumulate(
    rate_difference: &ValueRaster,
    period: Period,
    nodata: FloatValue,
) -> LuccResult<ValueRaster> {
    scale(rate_difference, period.duration() as FloatValue, nodata)
}
