//! Reclassification of categorical land-cover grids into continuous values.

use crate::errors::{LuccError, LuccResult};
use crate::lookup::LookupTable;
use crate::raster::{ClassRaster, FloatValue, Raster, ValueRaster};
use ndarray::Array2;

/// Map a categorical raster through a lookup table into a value raster.
///
/// Every pixel holding the source raster's nodata code maps to `nodata` in
/// the output; every other pixel maps to the table's value for its class
/// code. The output shares the input's grid shape.
///
/// A non-nodata class code without an entry in `lookup` fails with
/// [`LuccError::Lookup`]: silently substituting a default would corrupt
/// every downstream total.
pub fn reclassify(
    raster: &ClassRaster,
    lookup: &LookupTable,
    nodata: FloatValue,
) -> LuccResult<ValueRaster> {
    let mut out = Array2::from_elem(raster.shape(), nodata);
    for ((row, col), &code) in raster.data().indexed_iter() {
        if raster.is_nodata(code) {
            continue;
        }
        let value = lookup.get(code).ok_or_else(|| LuccError::Lookup {
            code,
            table: lookup.name().to_string(),
        })?;
        out[[row, col]] = value;
    }
    Ok(Raster::new(out, nodata))
}
