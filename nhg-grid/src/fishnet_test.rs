//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::aligner::{AlignedGrid, GridAligner};
use crate::extent::{Extent, Point};
use crate::fishnet::{Cell, Fishnet};
use crate::reference::ReferenceGrid;
use crate::resolution::ResolutionFactor;

fn aligned(minx: f64, miny: f64, maxx: f64, maxy: f64, factor: ResolutionFactor) -> AlignedGrid {
    GridAligner::new(ReferenceGrid::national())
        .fit_to_national(&Extent::from_bounds(minx, miny, maxx, maxy), factor)
        .unwrap()
}

fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
        "{:?} != {:?}",
        a,
        b
    );
}

#[test]
fn test_cell_order() {
    // upper left corner of the national grid, 4 x 4 cells
    let grid = aligned(
        -2553045.0,
        3903285.0,
        -2549045.0,
        3907285.0,
        ResolutionFactor::Multiple(1),
    );
    let fishnet = Fishnet::new(&grid, 0.0);
    let cells: Vec<Cell> = fishnet.cells().collect();
    assert_eq!(cells.len(), 16);
    let ids: Vec<(u32, u32, u64)> = cells
        .iter()
        .map(|c| (c.row, c.col, c.cell_number))
        .collect();
    assert_eq!(&ids[..5], &[(1, 1, 1), (1, 2, 2), (1, 3, 3), (1, 4, 4), (2, 1, 5)]);
    assert_eq!(ids[15], (4, 4, 16));
    assert_eq!(
        cells.iter().map(|c| c.cell_number).collect::<Vec<_>>(),
        (1..=16).collect::<Vec<u64>>()
    );

    let first = &cells[0];
    assert_eq!((first.national_row, first.national_col), (1, 1));
    assert_eq!(first.national_cell_number, 1);
    let last = &cells[15];
    assert_eq!((last.national_row, last.national_col), (4, 4));
    assert_eq!(last.national_cell_number, 3 * 4980 + 4);
}

#[test]
fn test_cell_geometry() {
    let grid = aligned(
        -2553045.0,
        -92715.0,
        -2549045.0,
        -88715.0,
        ResolutionFactor::Multiple(1),
    );
    let fishnet = Fishnet::new(&grid, 0.0);

    // top left cell
    let cell = fishnet.cell(1, 1).unwrap();
    assert_eq!(
        cell.corners,
        [
            Point::new(-2553045.0, -88715.0),
            Point::new(-2552045.0, -88715.0),
            Point::new(-2552045.0, -89715.0),
            Point::new(-2553045.0, -89715.0),
        ]
    );
    assert_eq!(cell.ring()[0], cell.ring()[4]);
    assert_eq!(cell.center(), Point::new(-2552545.0, -89215.0));
    assert_eq!(cell.center().wkt(), "POINT (-2552545 -89215)");
    assert_eq!(
        cell.wkt(),
        "POLYGON ((-2553045 -88715, -2552045 -88715, -2552045 -89715, -2553045 -89715, -2553045 -88715))"
    );
    assert_eq!((cell.national_row, cell.national_col), (3997, 1));
    assert_eq!(cell.national_cell_number, 3996 * 4980 + 1);

    // bottom right cell touches the grid's lower right corner
    let cell = fishnet.cell(4, 4).unwrap();
    assert_eq!(cell.corners[2], grid.extent.lr);
    assert_eq!(cell.national_cell_number, 3999 * 4980 + 4);

    assert!(fishnet.cell(0, 1).is_none());
    assert!(fishnet.cell(1, 5).is_none());
    assert!(fishnet.cell(5, 1).is_none());
}

#[test]
fn test_cells_cover_grid() {
    let grid = aligned(
        -2000100.0,
        1000200.0,
        -1995900.0,
        1003800.0,
        ResolutionFactor::Half,
    );
    let fishnet = Fishnet::new(&grid, 0.0);
    let mut area = 0.0;
    for cell in &fishnet {
        let [ul, _, lr, _] = cell.corners;
        area += (lr.x - ul.x) * (ul.y - lr.y);
        assert!(grid
            .extent
            .contains(&Extent::from_corners(cell.corners[3], cell.corners[1])));
    }
    assert_eq!(area, grid.extent.width() * grid.extent.height());
}

#[test]
fn test_national_numbers_gap_free() {
    let grid = aligned(
        -2000100.0,
        1000200.0,
        -1995900.0,
        1003800.0,
        ResolutionFactor::Quarter,
    );
    let fishnet = Fishnet::new(&grid, 0.0);
    let cells: Vec<Cell> = fishnet.cells().collect();
    assert_eq!(cells.len() as u64, grid.cell_count());
    for pair in cells.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(b.national_cell_number > a.national_cell_number);
        if a.row == b.row {
            assert_eq!(b.national_cell_number, a.national_cell_number + 1);
            assert_eq!(b.national_col, a.national_col + 1);
        } else {
            assert_eq!(b.national_row, a.national_row + 1);
            assert_eq!(
                b.national_cell_number,
                a.national_cell_number + grid.national_cols as u64 - grid.cols as u64 + 1
            );
        }
        assert_eq!(
            grid.to_local(b.national_row, b.national_col),
            Some((b.row, b.col))
        );
    }
}

#[test]
fn test_restartable() {
    let grid = aligned(
        -2000100.0,
        1000200.0,
        -1995900.0,
        1003800.0,
        ResolutionFactor::Multiple(1),
    );
    let fishnet = Fishnet::new(&grid, 0.0);
    let mut cells = fishnet.cells();
    assert_eq!(cells.len(), 30);
    cells.next();
    cells.next();
    assert_eq!(cells.len(), 28);
    let partial: Vec<Cell> = cells.take(3).collect();
    assert_eq!(partial[0].cell_number, 3);

    let first: Vec<Cell> = fishnet.cells().collect();
    let second: Vec<Cell> = (&fishnet).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(fishnet.len(), 30);
    assert!(!fishnet.is_empty());
}

#[test]
fn test_rotated_fishnet() {
    let grid = aligned(
        -2000100.0,
        1000200.0,
        -1995900.0,
        1003800.0,
        ResolutionFactor::Multiple(1),
    );
    let origin = grid.origin();
    let fishnet = Fishnet::new(&grid, 90.0);
    assert_eq!(fishnet.angle(), 90.0);

    // bottom left cell: lower left corner stays at the origin
    let cell = fishnet.cell(grid.rows, 1).unwrap();
    assert_close(cell.corners[3], origin);
    // (dx, dy) rotated by 90 degrees is (-dy, dx)
    assert_close(cell.corners[2], Point::new(origin.x, origin.y + 1000.0));
    assert_close(cell.corners[0], Point::new(origin.x - 1000.0, origin.y));

    // top right cell: rigid body rotation of the whole grid
    let cell = fishnet.cell(1, grid.cols).unwrap();
    let (w, h) = (grid.extent.width(), grid.extent.height());
    assert_close(cell.corners[1], Point::new(origin.x - h, origin.y + w));

    // numbering is independent of the rotation
    let unrotated = Fishnet::new(&grid, 0.0);
    for (a, b) in fishnet.cells().zip(unrotated.cells()) {
        assert_eq!(a.cell_number, b.cell_number);
        assert_eq!(a.national_cell_number, b.national_cell_number);
    }
}

#[test]
fn test_small_rotation_keeps_cell_size() {
    let grid = aligned(
        -2000100.0,
        1000200.0,
        -1995900.0,
        1003800.0,
        ResolutionFactor::Multiple(1),
    );
    let fishnet = Fishnet::new(&grid, 12.5);
    for cell in &fishnet {
        let [ul, ur, lr, ll] = cell.corners;
        assert!((ul.distance(&ur) - 1000.0).abs() < 1e-6);
        assert!((ur.distance(&lr) - 1000.0).abs() < 1e-6);
        assert!((lr.distance(&ll) - 1000.0).abs() < 1e-6);
        let angle = crate::extent::rotation_angle(&ll, &lr).unwrap();
        assert!((angle - 12.5).abs() < 1e-6);
    }
}
