//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

mod gdal_crs;
mod gdal_raster;
mod gdal_writer;

pub use crate::gdal_crs::{spatial_ref, GdalTransformer};
pub use crate::gdal_raster::{rasterize_layer, GdalRasterOutput};
pub use crate::gdal_writer::GdalOutput;

#[cfg(test)]
mod gdal_raster_test;

use nhg_core::core::Error;

pub(crate) fn gdal_error(err: gdal::errors::GdalError) -> Error {
    Error::persistence(err.to_string())
}

/// GDAL release as `VERSION_NUM` (e.g. 3040100)
pub fn gdal_version() -> i32 {
    gdal::version::version_info("VERSION_NUM")
        .parse::<i32>()
        .unwrap_or(0)
}
