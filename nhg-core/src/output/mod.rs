//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Vector and raster output collaborators

mod ascii;
mod csv;

pub use self::ascii::AsciiGridOutput;
pub use self::csv::CsvOutput;

use crate::core::config::{OutputCfg, RasterCfg};
use crate::core::error::Result;
use crate::core::Config;
use nhg_grid::{AlignedGrid, Cell, CellNumberGrid, Numbering};
use std::path::{Path, PathBuf};
use std::str::FromStr;


/// Attribute names of a written cell
pub const FIELDS: [&str; 6] = ["natlRow", "natlCol", "natlCellNum", "irow", "icol", "cellnum"];

/// Attribute values in `FIELDS` order
pub fn field_values(cell: &Cell) -> [i64; 6] {
    [
        cell.national_row as i64,
        cell.national_col as i64,
        cell.national_cell_number as i64,
        cell.row as i64,
        cell.col as i64,
        cell.cell_number as i64,
    ]
}

pub trait VectorOutput {
    /// Consume `cells` and return the number of features written
    fn write_cells(&mut self, grid: &AlignedGrid, cells: &mut dyn Iterator<Item = Cell>)
        -> Result<u64>;
}

pub trait RasterOutput {
    fn write_raster(&mut self, numbers: &CellNumberGrid, grid: &AlignedGrid, nodata: i64)
        -> Result<()>;
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum VectorFormat {
    Shapefile,
    Sqlite,
    GeoPackage,
    Csv,
}

impl VectorFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            VectorFormat::Shapefile => "shp",
            VectorFormat::Sqlite => "sqlite",
            VectorFormat::GeoPackage => "gpkg",
            VectorFormat::Csv => "csv",
        }
    }
    /// GDAL/OGR driver name
    pub fn driver_name(&self) -> &'static str {
        match self {
            VectorFormat::Shapefile => "ESRI Shapefile",
            VectorFormat::Sqlite => "SQLite",
            VectorFormat::GeoPackage => "GPKG",
            VectorFormat::Csv => "CSV",
        }
    }
}

impl FromStr for VectorFormat {
    type Err = String;

    fn from_str(val: &str) -> std::result::Result<VectorFormat, String> {
        match &val.to_lowercase() as &str {
            "shp" | "shapefile" => Ok(VectorFormat::Shapefile),
            "sqlite" | "spatialite" => Ok(VectorFormat::Sqlite),
            "gpkg" | "geopackage" => Ok(VectorFormat::GeoPackage),
            "csv" => Ok(VectorFormat::Csv),
            _ => Err(format!("Unsupported output format '{}'", val)),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum RasterFormat {
    GTiff,
    AaiGrid,
}

impl FromStr for RasterFormat {
    type Err = String;

    fn from_str(val: &str) -> std::result::Result<RasterFormat, String> {
        match &val.to_lowercase() as &str {
            "gtiff" | "tif" | "tiff" => Ok(RasterFormat::GTiff),
            "aaigrid" | "asc" => Ok(RasterFormat::AaiGrid),
            _ => Err(format!("Unsupported raster format '{}'", val)),
        }
    }
}

/// Where raster cell values come from
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum RasterSource {
    /// Numbers computed from the aligned grid
    Cells,
    /// Burn an attribute of the written vector layer
    Vector,
}

#[derive(PartialEq, Clone, Debug)]
pub struct OutputSpec {
    pub format: VectorFormat,
    pub name: String,
    pub layer: String,
    pub overwrite: bool,
    pub labels: bool,
}

impl OutputSpec {
    /// Data source path, `name` with the format extension
    pub fn path(&self) -> String {
        let ext = self.format.extension();
        match Path::new(&self.name).extension() {
            Some(e) if e.to_string_lossy().eq_ignore_ascii_case(ext) => self.name.clone(),
            _ => format!("{}.{}", self.name, ext),
        }
    }
    /// Layer of the cell center points
    pub fn label_layer(&self) -> String {
        format!("{}_label", self.layer)
    }
    /// Data source of the cell center points.
    ///
    /// Single layer formats get a sibling file, sqlite and gpkg share `path()`.
    pub fn label_path(&self) -> String {
        let path = PathBuf::from(self.path());
        match self.format {
            VectorFormat::Shapefile | VectorFormat::Csv => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                path.with_file_name(format!("{}_label.{}", stem, self.format.extension()))
                    .to_string_lossy()
                    .to_string()
            }
            VectorFormat::Sqlite | VectorFormat::GeoPackage => self.path(),
        }
    }
}

impl<'a> Config<'a, OutputCfg> for OutputSpec {
    fn from_config(output_cfg: &OutputCfg) -> std::result::Result<Self, String> {
        if output_cfg.name.is_empty() {
            return Err("Output name missing".to_string());
        }
        Ok(OutputSpec {
            format: output_cfg.format.parse()?,
            name: output_cfg.name.clone(),
            layer: output_cfg.layer.clone(),
            overwrite: output_cfg.overwrite,
            labels: output_cfg.labels,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[output]
# shp | sqlite | gpkg | csv
format = "gpkg"
name = "modelgrid"
layer = "modelgrid"
overwrite = true
# cell center points in layer `<layer>_label`
labels = false
"#;
        toml.to_string()
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct RasterSpec {
    pub path: String,
    pub format: RasterFormat,
    pub nodata: i64,
    pub numbering: Numbering,
    pub source: RasterSource,
    pub attribute: String,
}

impl RasterSpec {
    /// Raster with local cell numbers from the aligned grid
    pub fn new(path: &str) -> std::result::Result<RasterSpec, String> {
        Ok(RasterSpec {
            path: path.to_string(),
            format: format_from_path(path)?,
            nodata: 0,
            numbering: Numbering::Local,
            source: RasterSource::Cells,
            attribute: FIELDS[5].to_string(),
        })
    }
}

fn format_from_path(path: &str) -> std::result::Result<RasterFormat, String> {
    match Path::new(path).extension() {
        Some(ext) => ext.to_string_lossy().parse(),
        None => Err(format!("Raster format of '{}' unknown", path)),
    }
}

impl<'a> Config<'a, RasterCfg> for RasterSpec {
    fn from_config(raster_cfg: &RasterCfg) -> std::result::Result<Self, String> {
        let format = match raster_cfg.format {
            Some(ref format) => format.parse()?,
            None => format_from_path(&raster_cfg.path)?,
        };
        let numbering = match raster_cfg.numbering.as_ref().map(|s| s.to_lowercase()) {
            None => Numbering::Local,
            Some(ref s) if s == "local" => Numbering::Local,
            Some(ref s) if s == "national" => Numbering::National,
            Some(s) => return Err(format!("Unexpected enum value '{}'", s)),
        };
        let source = match raster_cfg.source.as_ref().map(|s| s.to_lowercase()) {
            None => RasterSource::Cells,
            Some(ref s) if s == "cells" => RasterSource::Cells,
            Some(ref s) if s == "vector" => RasterSource::Vector,
            Some(s) => return Err(format!("Unexpected enum value '{}'", s)),
        };
        Ok(RasterSpec {
            path: raster_cfg.path.clone(),
            format,
            nodata: raster_cfg.nodata,
            numbering,
            source,
            attribute: raster_cfg
                .attribute
                .clone()
                .unwrap_or_else(|| FIELDS[5].to_string()),
        })
    }
    fn gen_config() -> String {
        let toml = r#"
#[raster]
#path = "modelgrid.tif"
# gtiff | aaigrid
#format = "gtiff"
#nodata = 0
# local | national
#numbering = "local"
# cells: computed numbers, vector: rasterize the written layer
#source = "cells"
#attribute = "cellnum"
"#;
        toml.to_string()
    }
}
