//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::gdal_crs::spatial_ref;
use crate::gdal_error;
use gdal::raster::{rasterize, Buffer};
use gdal::vector::{FieldValue, LayerAccess};
use gdal::{Dataset, DriverManager};
use nhg_core::core::{Crs, Error, Result};
use nhg_core::output::RasterOutput;
use nhg_grid::{AlignedGrid, CellNumberGrid, RowOrder};
use std::convert::TryFrom;
use std::path::Path;

/// Single band Int32 GeoTIFF
pub struct GdalRasterOutput {
    path: String,
    crs: Crs,
}

impl GdalRasterOutput {
    pub fn new(path: &str, crs: &Crs) -> GdalRasterOutput {
        GdalRasterOutput {
            path: path.to_string(),
            crs: crs.clone(),
        }
    }
}

/// Empty GeoTIFF covering `grid`, every cell set to `nodata`
fn create_geotiff(path: &str, grid: &AlignedGrid, crs: &Crs, nodata: i32) -> Result<Dataset> {
    let driver = DriverManager::get_driver_by_name("GTiff").map_err(gdal_error)?;
    let (cols, rows) = (grid.cols as usize, grid.rows as usize);
    let mut dataset = driver
        .create_with_band_type::<i32, _>(path, cols, rows, 1)
        .map_err(gdal_error)?;
    dataset
        .set_geo_transform(&grid.geo_transform())
        .map_err(gdal_error)?;
    dataset
        .set_spatial_ref(&spatial_ref(crs)?)
        .map_err(gdal_error)?;
    {
        let mut band = dataset.rasterband(1).map_err(gdal_error)?;
        band.set_no_data_value(Some(nodata as f64))
            .map_err(gdal_error)?;
        let mut buffer = Buffer::new((cols, rows), vec![nodata; cols * rows]);
        band.write((0, 0), (cols, rows), &mut buffer)
            .map_err(gdal_error)?;
    }
    Ok(dataset)
}

fn int32(value: i64) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::persistence(format!("{} exceeds Int32 raster range", value)))
}

impl RasterOutput for GdalRasterOutput {
    fn write_raster(
        &mut self,
        numbers: &CellNumberGrid,
        grid: &AlignedGrid,
        nodata: i64,
    ) -> Result<()> {
        // rows are written north to south
        let numbers = match numbers.order() {
            RowOrder::TopDown => numbers.clone(),
            RowOrder::BottomUp => numbers.flipped(),
        };
        let (cols, rows) = (numbers.cols() as usize, numbers.rows() as usize);
        let mut data = Vec::with_capacity(cols * rows);
        for nr in numbers.values() {
            data.push(int32(*nr as i64)?);
        }
        info!("Writing {} x {} raster {}", cols, rows, self.path);
        let dataset = create_geotiff(&self.path, grid, &self.crs, int32(nodata)?)?;
        let mut band = dataset.rasterband(1).map_err(gdal_error)?;
        let mut buffer = Buffer::new((cols, rows), data);
        band.write((0, 0), (cols, rows), &mut buffer)
            .map_err(gdal_error)?;
        Ok(())
    }
}

fn burn_value(value: Option<FieldValue>) -> Option<f64> {
    match value {
        Some(FieldValue::IntegerValue(v)) => Some(v as f64),
        Some(FieldValue::Integer64Value(v)) => Some(v as f64),
        Some(FieldValue::RealValue(v)) => Some(v),
        _ => None,
    }
}

/// Burn `attribute` of a polygon layer into a new GeoTIFF aligned to `grid`
pub fn rasterize_layer(
    vector_path: &str,
    layer_name: &str,
    attribute: &str,
    grid: &AlignedGrid,
    crs: &Crs,
    raster_path: &str,
    nodata: i64,
) -> Result<()> {
    let source = Dataset::open(Path::new(vector_path)).map_err(gdal_error)?;
    let mut layer = source.layer_by_name(layer_name).map_err(gdal_error)?;
    let mut geometries = Vec::new();
    let mut burn_values = Vec::new();
    for feature in layer.features() {
        let value = feature.field(attribute).map_err(gdal_error)?;
        match (feature.geometry(), burn_value(value)) {
            (Some(geometry), Some(value)) => {
                geometries.push(geometry.clone());
                burn_values.push(value);
            }
            _ => warn!("Skipping feature without geometry or '{}'", attribute),
        }
    }
    info!(
        "Rasterizing {} features of '{}' into {}",
        geometries.len(),
        layer_name,
        raster_path
    );
    let mut dataset = create_geotiff(raster_path, grid, crs, int32(nodata)?)?;
    rasterize(&mut dataset, &[1], &geometries, &burn_values, None).map_err(gdal_error)?;
    Ok(())
}
