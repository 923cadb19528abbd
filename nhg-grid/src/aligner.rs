//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Alignment of local grids to the reference grid

use crate::error::{GridError, Result};
use crate::extent::{Extent, Point, EPSILON};
use crate::reference::ReferenceGrid;
use crate::resolution::ResolutionFactor;

/// Allowed deviation of a national offset from an integer, in cells
const OFFSET_TOLERANCE: f64 = 0.000001;

/// Rounding of the upper right corner
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SnapPolicy {
    /// Round up to the next grid line; aligned corners stay where they are
    Contain,
    /// `floor(offset) + 1`: always adds a cell, even to aligned corners
    Legacy,
}

impl Default for SnapPolicy {
    fn default() -> SnapPolicy {
        SnapPolicy::Contain
    }
}

/// Local grid snapped to the reference lattice
#[derive(PartialEq, Clone, Debug)]
pub struct AlignedGrid {
    /// Snapped, axis-aligned extent
    pub extent: Extent,
    /// Working cell size
    pub cell_size: f64,
    pub rows: u32,
    pub cols: u32,
    /// 1-based reference row of the top row
    pub national_row: u32,
    /// 1-based reference column of the left column
    pub national_col: u32,
    /// Columns of the reference grid at the working cell size
    pub national_cols: u32,
}

impl AlignedGrid {
    /// Lower left corner, the origin of the fishnet
    pub fn origin(&self) -> Point {
        self.extent.ll
    }
    pub fn upper_left(&self) -> Point {
        self.extent.ul
    }
    pub fn cell_count(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }
    /// Row-major cell number from the top left, 1-based
    pub fn cell_number(&self, row: u32, col: u32) -> u64 {
        (row as u64).saturating_sub(1) * self.cols as u64 + col as u64
    }
    /// National (row, col) of local (row, col)
    pub fn to_national(&self, row: u32, col: u32) -> (u32, u32) {
        (self.national_row + row - 1, self.national_col + col - 1)
    }
    /// Local (row, col) of national (row, col), if inside this grid
    pub fn to_local(&self, national_row: u32, national_col: u32) -> Option<(u32, u32)> {
        if national_row < self.national_row || national_col < self.national_col {
            return None;
        }
        let row = national_row - self.national_row + 1;
        let col = national_col - self.national_col + 1;
        if row > self.rows || col > self.cols {
            None
        } else {
            Some((row, col))
        }
    }
    /// Row-major cell number within the reference grid at the working cell size
    pub fn national_cell_number(&self, national_row: u32, national_col: u32) -> u64 {
        (national_row as u64).saturating_sub(1) * self.national_cols as u64 + national_col as u64
    }
    /// North-up GDAL geotransform of the grid
    pub fn geo_transform(&self) -> [f64; 6] {
        let ul = self.upper_left();
        [ul.x, self.cell_size, 0.0, ul.y, 0.0, -self.cell_size]
    }
}

/// Snaps arbitrary extents to a reference grid
#[derive(Clone, Debug)]
pub struct GridAligner<'a> {
    reference: &'a ReferenceGrid,
    snap: SnapPolicy,
}

impl<'a> GridAligner<'a> {
    pub fn new(reference: &'a ReferenceGrid) -> GridAligner<'a> {
        GridAligner {
            reference,
            snap: SnapPolicy::default(),
        }
    }
    pub fn with_snap(mut self, snap: SnapPolicy) -> GridAligner<'a> {
        self.snap = snap;
        self
    }
    /// Snap `extent` outward to reference grid lines at the resolution of `factor`.
    ///
    /// The lower left is rounded down and the upper right up, so the snapped
    /// extent always contains `extent`. Rotated input is snapped by its bounding box.
    pub fn fit_to_national(&self, extent: &Extent, factor: ResolutionFactor) -> Result<AlignedGrid> {
        let res = factor.cell_size(self.reference.cell_size);
        if !(res > 0.0) || !res.is_finite() {
            return Err(GridError::InvalidResolution(factor.to_string()));
        }
        check_extent(extent)?;

        let origin = self.reference.extent.ll;
        let (minx, miny, maxx, maxy) = extent.bounds();
        let snap_down = |v: f64, o: f64| o + ((v - o) / res + EPSILON).floor() * res;
        let snap_up = |v: f64, o: f64| match self.snap {
            SnapPolicy::Contain => o + ((v - o) / res - EPSILON).ceil() * res,
            SnapPolicy::Legacy => o + (((v - o) / res + EPSILON).floor() + 1.0) * res,
        };
        let ll = Point::new(snap_down(minx, origin.x), snap_down(miny, origin.y));
        let ur = Point::new(snap_up(maxx, origin.x), snap_up(maxy, origin.y));

        self.aligned(Extent::from_corners(ll, ur), res)
    }
    /// Aligned grid covering the whole reference grid
    pub fn national(&self, factor: ResolutionFactor) -> Result<AlignedGrid> {
        GridAligner::new(self.reference).fit_to_national(&self.reference.extent, factor)
    }
    fn aligned(&self, extent: Extent, res: f64) -> Result<AlignedGrid> {
        let ref_ul = self.reference.extent.ul;
        let col_off = (extent.ul.x - ref_ul.x) / res;
        let row_off = (ref_ul.y - extent.ul.y) / res;
        if col_off < -EPSILON || row_off < -EPSILON {
            return Err(GridError::OutsideReference(format!(
                "upper left ({}, {}) is {} columns and {} rows off the reference upper left ({}, {})",
                extent.ul.x, extent.ul.y, col_off, row_off, ref_ul.x, ref_ul.y
            )));
        }
        let national_col = integral_offset(col_off, "column")? + 1;
        let national_row = integral_offset(row_off, "row")? + 1;
        let (rows, cols) = extent.row_col_count(res)?;
        let national_cols = (self.reference.width() / res - EPSILON).ceil() as u32;
        let national_rows = (self.reference.height() / res - EPSILON).ceil() as u32;
        let last_row = national_row as u64 + rows as u64 - 1;
        let last_col = national_col as u64 + cols as u64 - 1;
        if last_row > national_rows as u64 || last_col > national_cols as u64 {
            return Err(GridError::OutsideReference(format!(
                "lower right ({}, {}) reaches national row {} col {}, the reference has {} rows and {} cols",
                extent.lr.x, extent.lr.y, last_row, last_col, national_rows, national_cols
            )));
        }

        Ok(AlignedGrid {
            extent,
            cell_size: res,
            rows,
            cols,
            national_row,
            national_col,
            national_cols,
        })
    }
}

fn check_extent(extent: &Extent) -> Result<()> {
    if extent
        .corners()
        .iter()
        .any(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(GridError::InvalidGeometry(format!(
            "non-finite extent coordinate in {:?}",
            extent
        )));
    }
    let (minx, miny, maxx, maxy) = extent.bounds();
    if !(maxx - minx > 0.0) || !(maxy - miny > 0.0) {
        return Err(GridError::InvalidGeometry(format!(
            "degenerate extent ({} {}, {} {})",
            minx, miny, maxx, maxy
        )));
    }
    Ok(())
}

fn integral_offset(offset: f64, axis: &str) -> Result<u32> {
    let rounded = offset.round();
    if (offset - rounded).abs() > OFFSET_TOLERANCE {
        return Err(GridError::MisalignedReference(format!(
            "{} offset {} is not a whole number of cells",
            axis, offset
        )));
    }
    if rounded >= u32::MAX as f64 {
        return Err(GridError::OutsideReference(format!(
            "{} offset {} out of range",
            axis, offset
        )));
    }
    Ok(rounded as u32)
}
