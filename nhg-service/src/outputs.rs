//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use nhg_core::core::{CoordTransformer, Crs, CrsSpec, Error, Result};
use nhg_core::output::{
    AsciiGridOutput, CsvOutput, OutputSpec, RasterFormat, RasterOutput, RasterSpec, VectorFormat,
    VectorOutput,
};
#[cfg(feature = "with-gdal")]
use nhg_gdal::{GdalOutput, GdalRasterOutput, GdalTransformer};
use nhg_grid::{AlignedGrid, Cell, CellNumberGrid};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Coordinate transformation between two CRS
pub fn transformer(source: &Crs, target: &Crs) -> Result<Box<dyn CoordTransformer>> {
    #[cfg(feature = "with-gdal")]
    let transformer: Result<Box<dyn CoordTransformer>> =
        GdalTransformer::new(source, target).map(|t| Box::new(t) as Box<dyn CoordTransformer>);
    #[cfg(not(feature = "with-gdal"))]
    let transformer = Err(Error::Crs(format!(
        "Transformation {} -> {} not supported in this build",
        source, target
    )));
    transformer
}

pub enum VectorSink {
    Csv(CsvOutput<File>),
    #[cfg(feature = "with-gdal")]
    Gdal(GdalOutput),
}

impl VectorSink {
    pub fn create(spec: &OutputSpec, crs: &CrsSpec) -> Result<VectorSink> {
        let path = spec.path();
        // sqlite and gpkg layers are replaced inside the existing data source
        let file_output = matches!(spec.format, VectorFormat::Csv | VectorFormat::Shapefile);
        if !spec.overwrite && file_output {
            let mut paths = vec![path.clone()];
            if spec.labels {
                paths.push(spec.label_path());
            }
            if let Some(existing) = paths.iter().find(|p| Path::new(p).exists()) {
                return Err(Error::persistence(format!("{} already exists", existing)));
            }
        }
        match spec.format {
            VectorFormat::Csv => {
                let mut output = CsvOutput::create(&path)?;
                if spec.labels {
                    output = output.with_label_file(&spec.label_path())?;
                }
                if let Some(target) = crs.reproject_target() {
                    output = output.with_transformer(transformer(&crs.grid, target)?);
                }
                Ok(VectorSink::Csv(output))
            }
            #[cfg(feature = "with-gdal")]
            _ => Ok(VectorSink::Gdal(GdalOutput::new(spec, crs)?)),
            #[cfg(not(feature = "with-gdal"))]
            format => Err(Error::Config(format!(
                "{} output not supported in this build",
                format.driver_name()
            ))),
        }
    }
}

impl VectorOutput for VectorSink {
    fn write_cells(
        &mut self,
        grid: &AlignedGrid,
        cells: &mut dyn Iterator<Item = Cell>,
    ) -> Result<u64> {
        match self {
            &mut VectorSink::Csv(ref mut output) => output.write_cells(grid, cells),
            #[cfg(feature = "with-gdal")]
            &mut VectorSink::Gdal(ref mut output) => output.write_cells(grid, cells),
        }
    }
}

pub enum RasterSink {
    Ascii(AsciiGridOutput<BufWriter<File>>),
    #[cfg(feature = "with-gdal")]
    Gdal(GdalRasterOutput),
}

impl RasterSink {
    /// Raster in the reference grid CRS
    pub fn create(spec: &RasterSpec, crs: &CrsSpec) -> Result<RasterSink> {
        match spec.format {
            RasterFormat::AaiGrid => Ok(RasterSink::Ascii(AsciiGridOutput::create(&spec.path)?)),
            #[cfg(feature = "with-gdal")]
            RasterFormat::GTiff => Ok(RasterSink::Gdal(GdalRasterOutput::new(
                &spec.path, &crs.grid,
            ))),
            #[cfg(not(feature = "with-gdal"))]
            RasterFormat::GTiff => {
                debug!("raster CRS: {}", crs.grid);
                Err(Error::Config(
                    "GeoTIFF output not supported in this build".to_string(),
                ))
            }
        }
    }
}

impl RasterOutput for RasterSink {
    fn write_raster(
        &mut self,
        numbers: &CellNumberGrid,
        grid: &AlignedGrid,
        nodata: i64,
    ) -> Result<()> {
        match self {
            &mut RasterSink::Ascii(ref mut output) => output.write_raster(numbers, grid, nodata),
            #[cfg(feature = "with-gdal")]
            &mut RasterSink::Gdal(ref mut output) => output.write_raster(numbers, grid, nodata),
        }
    }
}

/// Burn an attribute of the written vector layer into the raster
pub fn rasterize(
    output: &OutputSpec,
    raster: &RasterSpec,
    grid: &AlignedGrid,
    crs: &CrsSpec,
) -> Result<()> {
    if output.format == VectorFormat::Csv || raster.format != RasterFormat::GTiff {
        return Err(Error::Config(
            "Rasterizing needs an OGR vector output and a GeoTIFF raster".to_string(),
        ));
    }
    if crs.reproject_target().is_some() {
        return Err(Error::Crs(
            "Rasterizing needs cells written in the grid CRS".to_string(),
        ));
    }
    #[cfg(feature = "with-gdal")]
    let result = nhg_gdal::rasterize_layer(
        &output.path(),
        &output.layer,
        &raster.attribute,
        grid,
        &crs.grid,
        &raster.path,
        raster.nodata,
    );
    #[cfg(not(feature = "with-gdal"))]
    let result = {
        debug!("{} x {} grid", grid.rows, grid.cols);
        Err(Error::Config(
            "Rasterizing not supported in this build".to_string(),
        ))
    };
    result
}
