//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Reference grids

use crate::error::{GridError, Result};
use crate::extent::{Extent, Point};

/// Fixed lattice all local grids are aligned to.
///
/// Rows are numbered from the top (row 1 touches `extent.ul`), columns from
/// the left.
#[derive(PartialEq, Clone, Debug)]
pub struct ReferenceGrid {
    /// Corners of the reference grid
    pub extent: Extent,
    /// Native cell size in ground units
    pub cell_size: f64,
    /// Native number of rows
    pub rows: u32,
    /// Native number of columns
    pub cols: u32,
}

/// National Hydrogeologic Grid (NAD83 / Conus Albers, EPSG:5070)
pub static NATIONAL: ReferenceGrid = ReferenceGrid {
    extent: Extent {
        ll: Point {
            x: -2553045.0,
            y: -92715.0,
        },
        lr: Point {
            x: 2426955.0,
            y: -92715.0,
        },
        ur: Point {
            x: 2426955.0,
            y: 3907285.0,
        },
        ul: Point {
            x: -2553045.0,
            y: 3907285.0,
        },
    },
    cell_size: 1000.0,
    rows: 4000,
    cols: 4980,
};

/// EPSG code of the national reference grid
pub const NATIONAL_EPSG: u32 = 5070;

impl ReferenceGrid {
    /// The national reference grid
    pub fn national() -> &'static ReferenceGrid {
        &NATIONAL
    }
    /// User defined reference grid with lower left corner `origin`
    pub fn new(origin: Point, cell_size: f64, rows: u32, cols: u32) -> Result<ReferenceGrid> {
        if !(cell_size > 0.0) || rows == 0 || cols == 0 {
            return Err(GridError::InvalidGeometry(format!(
                "reference grid needs a positive cell size and at least one row and column \
                 (cell size {}, {} rows, {} cols)",
                cell_size, rows, cols
            )));
        }
        let ur = Point::new(
            origin.x + cols as f64 * cell_size,
            origin.y + rows as f64 * cell_size,
        );
        Ok(ReferenceGrid {
            extent: Extent::from_corners(origin, ur),
            cell_size,
            rows,
            cols,
        })
    }
    /// Reference grid from explicit corners. Row and column counts are rounded.
    pub fn from_extent(extent: Extent, cell_size: f64) -> Result<ReferenceGrid> {
        let (rows, cols) = extent.row_col_count(cell_size)?;
        Ok(ReferenceGrid {
            extent,
            cell_size,
            rows,
            cols,
        })
    }
    pub fn width(&self) -> f64 {
        self.extent.width()
    }
    pub fn height(&self) -> f64 {
        self.extent.height()
    }
    pub fn cell_count(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }
    /// Row-major cell number of 1-based (row, col) at native resolution
    pub fn cell_number(&self, row: u32, col: u32) -> u64 {
        (row as u64).saturating_sub(1) * self.cols as u64 + col as u64
    }
}
