//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{CrsCfg, CrsValueCfg};
use crate::core::error::{Error, Result};
use crate::core::Config;
use nhg_grid::{Cell, Extent, Point, NATIONAL_EPSG};
use std::fmt;
use std::str::FromStr;

/// Coordinate reference system
#[derive(PartialEq, Clone, Debug)]
pub enum Crs {
    Epsg(u32),
    Proj4(String),
}

impl Crs {
    /// CRS of the national reference grid (CONUS Albers, NAD83)
    pub fn national() -> Crs {
        Crs::Epsg(NATIONAL_EPSG)
    }
    pub fn from_config(cfg: &CrsValueCfg) -> Result<Crs> {
        match cfg {
            CrsValueCfg::Epsg(code) => Ok(Crs::Epsg(*code)),
            CrsValueCfg::Text(text) => text.parse(),
        }
    }
}

impl FromStr for Crs {
    type Err = Error;

    fn from_str(val: &str) -> Result<Crs> {
        let val = val.trim();
        if val.starts_with('+') {
            return Ok(Crs::Proj4(val.to_string()));
        }
        let code = if val.len() > 5 && val[..5].eq_ignore_ascii_case("epsg:") {
            &val[5..]
        } else {
            val
        };
        code.parse::<u32>()
            .map(Crs::Epsg)
            .map_err(|_| Error::Crs(format!("Unsupported CRS definition '{}'", val)))
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{}", code),
            Crs::Proj4(def) => f.write_str(def),
        }
    }
}

/// Point transformation between two CRS
pub trait CoordTransformer {
    fn transform(&self, point: Point) -> Result<Point>;
    /// Transform all four corners
    fn transform_extent(&self, extent: &Extent) -> Result<Extent> {
        Ok(Extent::new(
            self.transform(extent.ll)?,
            self.transform(extent.lr)?,
            self.transform(extent.ur)?,
            self.transform(extent.ul)?,
        ))
    }
    fn transform_cell(&self, cell: &Cell) -> Result<Cell> {
        let mut transformed = cell.clone();
        for corner in transformed.corners.iter_mut() {
            *corner = self
                .transform(*corner)
                .map_err(|e| Error::cell(cell.cell_number, e.to_string()))?;
        }
        Ok(transformed)
    }
}

/// CRS of the reference grid, the input extent and the written cells
#[derive(PartialEq, Clone, Debug)]
pub struct CrsSpec {
    pub grid: Crs,
    pub source: Option<Crs>,
    pub target: Option<Crs>,
}

impl Default for CrsSpec {
    fn default() -> CrsSpec {
        CrsSpec {
            grid: Crs::national(),
            source: None,
            target: None,
        }
    }
}

impl CrsSpec {
    /// Input extent has to be reprojected
    pub fn reproject_source(&self) -> Option<&Crs> {
        self.source.as_ref().filter(|crs| **crs != self.grid)
    }
    /// Cells have to be reprojected before writing
    pub fn reproject_target(&self) -> Option<&Crs> {
        self.target.as_ref().filter(|crs| **crs != self.grid)
    }
    /// CRS the cells are written in
    pub fn output_crs(&self) -> &Crs {
        self.target.as_ref().unwrap_or(&self.grid)
    }
}

impl<'a> Config<'a, CrsCfg> for CrsSpec {
    fn from_config(crs_cfg: &CrsCfg) -> std::result::Result<Self, String> {
        let parse = |cfg: &Option<CrsValueCfg>| {
            cfg.as_ref()
                .map(Crs::from_config)
                .transpose()
                .map_err(|e| e.to_string())
        };
        Ok(CrsSpec {
            grid: parse(&crs_cfg.grid)?.unwrap_or_else(Crs::national),
            source: parse(&crs_cfg.source)?,
            target: parse(&crs_cfg.target)?,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
#[crs]
# CRS of the reference grid (EPSG code or PROJ4 string)
#grid = 5070
# CRS of the input extent
#source = 4326
# CRS the cells are written in
#target = 4269
"#;
        toml.to_string()
    }
}
