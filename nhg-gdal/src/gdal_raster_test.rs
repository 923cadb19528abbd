//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::gdal_raster::{rasterize_layer, GdalRasterOutput};
use crate::gdal_writer::GdalOutput;
use gdal::Dataset;
use nhg_core::core::{Crs, CrsSpec};
use nhg_core::output::{OutputSpec, RasterOutput, VectorFormat, VectorOutput};
use nhg_grid::{
    AlignedGrid, CellNumberGrid, Extent, Fishnet, GridAligner, Numbering, ReferenceGrid,
    ResolutionFactor, RowOrder,
};
use std::env;
use std::fs;
use std::path::Path;

fn test_grid() -> AlignedGrid {
    GridAligner::new(ReferenceGrid::national())
        .fit_to_national(
            &Extent::from_bounds(-2000100.0, 1000200.0, -1995900.0, 1003800.0),
            ResolutionFactor::Multiple(1),
        )
        .unwrap()
}

fn temp_path(name: &str) -> String {
    env::temp_dir().join(name).to_string_lossy().to_string()
}

fn read_values(path: &str, grid: &AlignedGrid) -> Vec<i32> {
    let dataset = Dataset::open(Path::new(path)).unwrap();
    assert_eq!(
        dataset.raster_size(),
        (grid.cols as usize, grid.rows as usize)
    );
    assert_eq!(dataset.geo_transform().unwrap(), grid.geo_transform());
    let band = dataset.rasterband(1).unwrap();
    band.read_band_as::<i32>().unwrap().data().to_vec()
}

#[test]
fn test_write_geotiff() {
    let grid = test_grid();
    let path = temp_path("nhg_raster_test.tif");
    let numbers = CellNumberGrid::build(&grid, Numbering::Local, RowOrder::BottomUp);
    let mut output = GdalRasterOutput::new(&path, &Crs::national());
    output.write_raster(&numbers, &grid, -1).unwrap();

    let values = read_values(&path, &grid);
    assert_eq!(values, (1..=30).collect::<Vec<i32>>());
    let dataset = Dataset::open(Path::new(&path)).unwrap();
    assert_eq!(dataset.rasterband(1).unwrap().no_data_value(), Some(-1.0));
    let _ = fs::remove_file(&path);
}

#[test]
fn test_rasterize_layer() {
    let grid = test_grid();
    let spec = OutputSpec {
        format: VectorFormat::GeoPackage,
        name: temp_path("nhg_rasterize_test"),
        layer: "cells".to_string(),
        overwrite: true,
        labels: false,
    };
    let _ = fs::remove_file(spec.path());
    let mut output = GdalOutput::new(&spec, &CrsSpec::default()).unwrap();
    output
        .write_cells(&grid, &mut Fishnet::new(&grid, 0.0).cells())
        .unwrap();

    let path = temp_path("nhg_rasterize_test.tif");
    rasterize_layer(
        &spec.path(),
        "cells",
        "natlCellNum",
        &grid,
        &Crs::national(),
        &path,
        0,
    )
    .unwrap();
    let expected = CellNumberGrid::build(&grid, Numbering::National, RowOrder::TopDown);
    let values = read_values(&path, &grid);
    assert_eq!(
        values,
        expected
            .values()
            .iter()
            .map(|v| *v as i32)
            .collect::<Vec<i32>>()
    );
    let _ = fs::remove_file(&path);
    let _ = fs::remove_file(spec.path());
}
