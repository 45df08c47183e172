//! Aggregation of per-pool stock rasters into one total-stock raster.

use crate::algebra::apply;
use crate::errors::{LuccError, LuccResult};
use crate::raster::{FloatValue, ValueRaster};

/// Sum N per-pool rasters of identical shape into one total-stock raster.
///
/// The nodata policy is strict nodata-any: a pixel that is nodata in any
/// pool raster is nodata in the total. Pools are not optional once counted;
/// a skip-and-sum policy would report partial stocks as full totals.
pub fn aggregate_stock(rasters: &[ValueRaster], nodata: FloatValue) -> LuccResult<ValueRaster> {
    if rasters.is_empty() {
        return Err(LuccError::Config(
            "stock aggregation requires at least one pool raster".to_string(),
        ));
    }
    let inputs: Vec<&ValueRaster> = rasters.iter().collect();
    apply(|values| values.iter().sum(), &inputs, nodata)
}
