//! Nodata-aware elementwise raster algebra.
//!
//! [`apply`] is the single engine behind every arithmetic step in the
//! pipeline: it applies a pure numeric function elementwise over N aligned
//! rasters with strict nodata propagation. A pixel that is nodata in any
//! input is nodata in the output; everything else is `op(values...)`.
//!
//! The grid is processed in fixed-size bands of rows so that peak working
//! set stays bounded on large grids. Bands are visited in row-major order,
//! so the output is reproducible regardless of the band size chosen.
//!
//! Operations are expressed as explicit functions taking the nodata sentinel
//! as a parameter; the engine itself holds no state.

use crate::errors::{LuccError, LuccResult};
use crate::raster::{FloatValue, Raster, ValueRaster};
use ndarray::{s, Array2};

/// Number of grid rows processed per band.
pub const BLOCK_ROWS: usize = 256;

/// Apply a pure elementwise operation over N aligned rasters.
///
/// Validates that every input shares one grid shape before any pixel is
/// touched; a mismatch fails with [`LuccError::ShapeMismatch`]. The output
/// raster uses `nodata` as its sentinel.
pub fn apply<F>(op: F, inputs: &[&ValueRaster], nodata: FloatValue) -> LuccResult<ValueRaster>
where
    F: Fn(&[FloatValue]) -> FloatValue,
{
    let first = inputs.first().ok_or_else(|| {
        LuccError::Config("raster algebra requires at least one input raster".to_string())
    })?;
    let shape = first.shape();
    for raster in inputs {
        if raster.shape() != shape {
            return Err(LuccError::ShapeMismatch {
                expected: shape,
                found: raster.shape(),
            });
        }
    }

    let (rows, _) = shape;
    let mut out = Array2::from_elem(shape, nodata);
    let mut values = vec![0.0; inputs.len()];

    for band_start in (0..rows).step_by(BLOCK_ROWS) {
        let band_end = usize::min(band_start + BLOCK_ROWS, rows);
        let bands: Vec<_> = inputs
            .iter()
            .map(|raster| raster.data().slice(s![band_start..band_end, ..]))
            .collect();
        let mut out_band = out.slice_mut(s![band_start..band_end, ..]);

        for ((row, col), target) in out_band.indexed_iter_mut() {
            let mut masked = false;
            for ((slot, band), raster) in values.iter_mut().zip(&bands).zip(inputs) {
                let value = band[[row, col]];
                if raster.is_nodata(value) {
                    masked = true;
                    break;
                }
                *slot = value;
            }
            if !masked {
                *target = op(&values);
            }
        }
    }

    Ok(Raster::new(out, nodata))
}

/// Pixelwise difference `a - b`.
pub fn difference(
    a: &ValueRaster,
    b: &ValueRaster,
    nodata: FloatValue,
) -> LuccResult<ValueRaster> {
    apply(|v| v[0] - v[1], &[a, b], nodata)
}

/// Pixelwise sum `a + b`.
pub fn sum(a: &ValueRaster, b: &ValueRaster, nodata: FloatValue) -> LuccResult<ValueRaster> {
    apply(|v| v[0] + v[1], &[a, b], nodata)
}

/// Pixelwise scaling `value * factor`.
pub fn scale(
    raster: &ValueRaster,
    factor: FloatValue,
    nodata: FloatValue,
) -> LuccResult<ValueRaster> {
    apply(move |v| v[0] * factor, &[raster], nodata)
}
