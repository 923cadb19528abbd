//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Dense cell number arrays for rasters

use crate::aligner::AlignedGrid;

/// Orientation of the array rows
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum RowOrder {
    /// Element row 0 is the top grid row (north-up rasters)
    TopDown,
    /// Element row 0 is the bottom grid row
    BottomUp,
}

impl Default for RowOrder {
    fn default() -> RowOrder {
        RowOrder::TopDown
    }
}

/// Value stamped into each element
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Numbering {
    /// Local cell number, identical to `Cell::cell_number`
    Local,
    /// National cell number, identical to `Cell::national_cell_number`
    National,
}

impl Default for Numbering {
    fn default() -> Numbering {
        Numbering::Local
    }
}

/// rows x cols array of cell numbers, row-major
#[derive(PartialEq, Clone, Debug)]
pub struct CellNumberGrid {
    rows: u32,
    cols: u32,
    order: RowOrder,
    values: Vec<u64>,
}

impl CellNumberGrid {
    /// Local cell numbers in top-down order
    pub fn new(grid: &AlignedGrid) -> CellNumberGrid {
        CellNumberGrid::build(grid, Numbering::Local, RowOrder::TopDown)
    }
    pub fn build(grid: &AlignedGrid, numbering: Numbering, order: RowOrder) -> CellNumberGrid {
        let mut values = Vec::with_capacity(grid.cell_count() as usize);
        for r in 0..grid.rows {
            let row = match order {
                RowOrder::TopDown => r + 1,
                RowOrder::BottomUp => grid.rows - r,
            };
            values.extend((1..=grid.cols).map(|col| match numbering {
                Numbering::Local => grid.cell_number(row, col),
                Numbering::National => {
                    let (nrow, ncol) = grid.to_national(row, col);
                    grid.national_cell_number(nrow, ncol)
                }
            }));
        }
        CellNumberGrid {
            rows: grid.rows,
            cols: grid.cols,
            order,
            values,
        }
    }
    pub fn rows(&self) -> u32 {
        self.rows
    }
    pub fn cols(&self) -> u32 {
        self.cols
    }
    pub fn order(&self) -> RowOrder {
        self.order
    }
    /// Element at 0-based array (row, col)
    pub fn get(&self, row: u32, col: u32) -> Option<u64> {
        if row >= self.rows || col >= self.cols {
            None
        } else {
            Some(self.values[(row as usize) * self.cols as usize + col as usize])
        }
    }
    /// Elements of 0-based array row `row`
    pub fn row(&self, row: u32) -> Option<&[u64]> {
        if row >= self.rows {
            return None;
        }
        let start = row as usize * self.cols as usize;
        self.values.get(start..start + self.cols as usize)
    }
    pub fn values(&self) -> &[u64] {
        &self.values
    }
    pub fn into_values(self) -> Vec<u64> {
        self.values
    }
    /// Vertically flipped copy
    pub fn flipped(&self) -> CellNumberGrid {
        let values = self
            .values
            .chunks(self.cols.max(1) as usize)
            .rev()
            .flat_map(|row| row.iter().cloned())
            .collect();
        CellNumberGrid {
            rows: self.rows,
            cols: self.cols,
            order: match self.order {
                RowOrder::TopDown => RowOrder::BottomUp,
                RowOrder::BottomUp => RowOrder::TopDown,
            },
            values,
        }
    }
}
