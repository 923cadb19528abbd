//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Fishnet generation

use crate::aligner::AlignedGrid;
use crate::extent::Point;
use std::fmt::Write;

/// Single fishnet cell with local and national addressing
#[derive(PartialEq, Clone, Debug)]
pub struct Cell {
    /// Local row, 1-based from the top
    pub row: u32,
    /// Local column, 1-based from the left
    pub col: u32,
    /// Local row-major cell number from the top left
    pub cell_number: u64,
    pub national_row: u32,
    pub national_col: u32,
    pub national_cell_number: u64,
    /// Corners in the order upper left, upper right, lower right, lower left
    pub corners: [Point; 4],
}

impl Cell {
    /// Closed polygon ring starting and ending at the upper left corner
    pub fn ring(&self) -> [Point; 5] {
        let [ul, ur, lr, ll] = self.corners;
        [ul, ur, lr, ll, ul]
    }
    /// Center of the cell, the geometry of its label point
    pub fn center(&self) -> Point {
        let [ul, _, lr, _] = self.corners;
        Point::new((ul.x + lr.x) / 2.0, (ul.y + lr.y) / 2.0)
    }
    /// Polygon as WKT
    pub fn wkt(&self) -> String {
        let mut wkt = String::from("POLYGON ((");
        for (i, p) in self.ring().iter().enumerate() {
            if i > 0 {
                wkt.push_str(", ");
            }
            let _ = write!(wkt, "{} {}", p.x, p.y);
        }
        wkt.push_str("))");
        wkt
    }
}

/// Rectangular cells covering an aligned grid, rotated as a rigid body about
/// the grid origin (lower left corner).
#[derive(Clone, Debug)]
pub struct Fishnet<'a> {
    grid: &'a AlignedGrid,
    angle: f64,
    cos: f64,
    sin: f64,
}

impl<'a> Fishnet<'a> {
    /// Fishnet rotated counter-clockwise by `angle` degrees
    pub fn new(grid: &'a AlignedGrid, angle: f64) -> Fishnet<'a> {
        let (sin, cos) = if angle == 0.0 {
            (0.0, 1.0)
        } else {
            angle.to_radians().sin_cos()
        };
        Fishnet {
            grid,
            angle,
            cos,
            sin,
        }
    }
    pub fn grid(&self) -> &AlignedGrid {
        self.grid
    }
    pub fn angle(&self) -> f64 {
        self.angle
    }
    pub fn len(&self) -> u64 {
        self.grid.cell_count()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Offset vector rotated and moved to the grid origin
    fn place(&self, dx: f64, dy: f64) -> Point {
        let origin = self.grid.origin();
        Point::new(
            origin.x + dx * self.cos - dy * self.sin,
            origin.y + dx * self.sin + dy * self.cos,
        )
    }
    /// Cell at 1-based local (row, col)
    pub fn cell(&self, row: u32, col: u32) -> Option<Cell> {
        let grid = self.grid;
        if row == 0 || col == 0 || row > grid.rows || col > grid.cols {
            return None;
        }
        let size = grid.cell_size;
        let left = (col - 1) as f64 * size;
        let right = col as f64 * size;
        let bottom = (grid.rows - row) as f64 * size;
        let top = (grid.rows - row + 1) as f64 * size;
        let (national_row, national_col) = grid.to_national(row, col);
        Some(Cell {
            row,
            col,
            cell_number: grid.cell_number(row, col),
            national_row,
            national_col,
            national_cell_number: grid.national_cell_number(national_row, national_col),
            corners: [
                self.place(left, top),
                self.place(right, top),
                self.place(right, bottom),
                self.place(left, bottom),
            ],
        })
    }
    /// Cells row by row from the top, left to right within a row
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            fishnet: self,
            row: 1,
            col: 1,
            remaining: self.len(),
        }
    }
}

impl<'f> IntoIterator for &'f Fishnet<'_> {
    type Item = Cell;
    type IntoIter = Cells<'f>;

    fn into_iter(self) -> Cells<'f> {
        self.cells()
    }
}

/// Lazy cell iterator
pub struct Cells<'a> {
    fishnet: &'a Fishnet<'a>,
    row: u32,
    col: u32,
    remaining: u64,
}

impl<'a> Iterator for Cells<'a> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.remaining == 0 {
            return None;
        }
        let cell = self.fishnet.cell(self.row, self.col);
        self.remaining -= 1;
        if self.col < self.fishnet.grid.cols {
            self.col += 1;
        } else {
            self.col = 1;
            self.row += 1;
        }
        cell
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for Cells<'a> {}
