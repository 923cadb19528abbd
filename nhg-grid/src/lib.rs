//! A library for fishnet grids aligned to a national reference grid
//!
//! ## Aligning an extent
//!
//! ```rust
//! use nhg_grid::{Extent, GridAligner, ReferenceGrid, ResolutionFactor};
//!
//! let extent = Extent::from_bounds(-2552500.0, 3903700.0, -2549045.0, 3907000.0);
//! let grid = GridAligner::new(ReferenceGrid::national())
//!     .fit_to_national(&extent, ResolutionFactor::Multiple(1))
//!     .unwrap();
//! assert_eq!(
//!     grid.extent,
//!     Extent::from_bounds(-2553045.0, 3903285.0, -2549045.0, 3907285.0)
//! );
//! assert_eq!((grid.rows, grid.cols), (4, 4));
//! assert_eq!((grid.national_row, grid.national_col), (1, 1));
//! ```
//!
//! ## Fishnet cells
//!
//! ```rust
//! use nhg_grid::{Extent, Fishnet, GridAligner, ReferenceGrid, ResolutionFactor};
//!
//! let extent = Extent::from_bounds(-2553045.0, 3903285.0, -2549045.0, 3907285.0);
//! let grid = GridAligner::new(ReferenceGrid::national())
//!     .fit_to_national(&extent, ResolutionFactor::Multiple(1))
//!     .unwrap();
//! let fishnet = Fishnet::new(&grid, 0.0);
//! for cell in &fishnet {
//!     println!("{} {}/{} {}", cell.cell_number, cell.row, cell.col, cell.wkt());
//! }
//! let last = fishnet.cells().last().unwrap();
//! assert_eq!((last.row, last.col, last.cell_number), (4, 4, 16));
//! assert_eq!(last.national_cell_number, 3 * 4980 + 4);
//! ```
//!
//! ## Raster cell numbers
//!
//! ```rust
//! use nhg_grid::{CellNumberGrid, Extent, GridAligner, ReferenceGrid, ResolutionFactor};
//!
//! let extent = Extent::from_bounds(-2553045.0, 3905285.0, -2550045.0, 3907285.0);
//! let grid = GridAligner::new(ReferenceGrid::national())
//!     .fit_to_national(&extent, ResolutionFactor::Multiple(1))
//!     .unwrap();
//! let numbers = CellNumberGrid::new(&grid);
//! assert_eq!(numbers.row(0), Some(&[1, 2, 3][..]));
//! assert_eq!(numbers.row(1), Some(&[4, 5, 6][..]));
//! ```

mod aligner;
mod error;
mod extent;
mod fishnet;
mod numbering;
mod reference;
mod resolution;

#[cfg(test)]
mod fishnet_test;

pub use aligner::{AlignedGrid, GridAligner, SnapPolicy};
pub use error::{GridError, Result};
pub use extent::{max_extent, rotation_angle, row_col_count, Extent, Point};
pub use fishnet::{Cell, Cells, Fishnet};
pub use numbering::{CellNumberGrid, Numbering, RowOrder};
pub use reference::{ReferenceGrid, NATIONAL, NATIONAL_EPSG};
pub use resolution::ResolutionFactor;
