//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Extents and extent calculations

use crate::error::{GridError, Result};

/// Tolerance for coordinate comparisons, in ground units
pub(crate) const EPSILON: f64 = 0.0000001;

/// 2D point in ground units
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
    /// Euclidean distance
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
    pub fn wkt(&self) -> String {
        format!("POINT ({} {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from(xy: (f64, f64)) -> Point {
        Point::new(xy.0, xy.1)
    }
}

/// Rectangular extent given by its four corners.
///
/// Unrotated extents have `ll.x == ul.x`, `ll.y == lr.y`, `ur.x == lr.x` and
/// `ur.y == ul.y`. A rotated extent is a parallelogram rotated about `ll`.
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    /// Lower left
    pub ll: Point,
    /// Lower right
    pub lr: Point,
    /// Upper right
    pub ur: Point,
    /// Upper left
    pub ul: Point,
}

impl Extent {
    pub fn new(ll: Point, lr: Point, ur: Point, ul: Point) -> Extent {
        Extent { ll, lr, ur, ul }
    }
    /// Axis-aligned extent from lower left and upper right corner
    pub fn from_corners(ll: Point, ur: Point) -> Extent {
        Extent {
            ll,
            lr: Point::new(ur.x, ll.y),
            ur,
            ul: Point::new(ll.x, ur.y),
        }
    }
    pub fn from_bounds(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Extent {
        Extent::from_corners(Point::new(minx, miny), Point::new(maxx, maxy))
    }
    /// Corners in the order ll, lr, ur, ul
    pub fn corners(&self) -> [Point; 4] {
        [self.ll, self.lr, self.ur, self.ul]
    }
    /// Length of the bottom edge
    pub fn width(&self) -> f64 {
        self.ll.distance(&self.lr)
    }
    /// Length of the right edge
    pub fn height(&self) -> f64 {
        self.lr.distance(&self.ur)
    }
    /// (minx, miny, maxx, maxy) over all corners
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.corners().iter().fold(
            (
                f64::INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::NEG_INFINITY,
            ),
            |(minx, miny, maxx, maxy), p| {
                (minx.min(p.x), miny.min(p.y), maxx.max(p.x), maxy.max(p.y))
            },
        )
    }
    /// True if all corners of `other` lie within or on the bounds of this extent
    pub fn contains(&self, other: &Extent) -> bool {
        let (minx, miny, maxx, maxy) = self.bounds();
        other.corners().iter().all(|p| {
            p.x >= minx - EPSILON
                && p.x <= maxx + EPSILON
                && p.y >= miny - EPSILON
                && p.y <= maxy + EPSILON
        })
    }
    /// Apply `f` to every corner
    pub fn map<F>(&self, mut f: F) -> Extent
    where
        F: FnMut(Point) -> Point,
    {
        Extent {
            ll: f(self.ll),
            lr: f(self.lr),
            ur: f(self.ur),
            ul: f(self.ul),
        }
    }
    /// Number of (rows, cols) of size `cell_size` fitting into this extent
    pub fn row_col_count(&self, cell_size: f64) -> Result<(u32, u32)> {
        row_col_count(&self.ll, &self.lr, &self.ur, cell_size)
    }
    /// Rotation of the bottom edge in degrees
    pub fn rotation_angle(&self) -> Result<f64> {
        rotation_angle(&self.ll, &self.lr)
    }
    /// Maximal bounding extent of `self` and `other`
    pub fn max_extent(&self, other: &Extent) -> Extent {
        max_extent(self, other)
    }
}

/// Number of (rows, cols) of a grid with edges ll-lr (columns) and lr-ur (rows).
///
/// Counts are rounded half away from zero.
pub fn row_col_count(ll: &Point, lr: &Point, ur: &Point, cell_size: f64) -> Result<(u32, u32)> {
    if !(cell_size > 0.0) {
        return Err(GridError::InvalidGeometry(format!(
            "cell size must be positive, got {}",
            cell_size
        )));
    }
    let width = ll.distance(lr);
    let height = lr.distance(ur);
    if !(width > 0.0) || !(height > 0.0) {
        return Err(GridError::InvalidGeometry(format!(
            "zero-length extent edge (width {}, height {})",
            width, height
        )));
    }
    let cols = (width / cell_size).round();
    let rows = (height / cell_size).round();
    if rows > u32::MAX as f64 || cols > u32::MAX as f64 {
        return Err(GridError::InvalidGeometry(format!(
            "{} x {} cells exceed the supported grid size",
            rows, cols
        )));
    }
    Ok((rows as u32, cols as u32))
}

/// Angle of the bottom edge ll-lr from horizontal, in degrees.
///
/// When `lr` lies west of `ll` the bare arctangent is shifted by 90 degrees.
/// A vertical bottom edge has no defined slope and fails with `InvalidGeometry`.
pub fn rotation_angle(ll: &Point, lr: &Point) -> Result<f64> {
    let dx = ll.x - lr.x;
    let dy = ll.y - lr.y;
    if dx == 0.0 {
        return Err(GridError::InvalidGeometry(format!(
            "vertical bottom edge ({}, {}) - ({}, {})",
            ll.x, ll.y, lr.x, lr.y
        )));
    }
    let theta = (dy / dx).atan().to_degrees();
    if lr.x < ll.x {
        Ok(90.0 - (theta * -1.0))
    } else {
        Ok(theta)
    }
}

/// Component-wise min of the lower left and max of the upper right corners.
///
/// Only meaningful for axis-aligned extents; the result for rotated input is
/// the axis-aligned box spanned by the two `ll`/`ur` corners, which does not
/// necessarily cover the rotated corners.
pub fn max_extent(a: &Extent, b: &Extent) -> Extent {
    let ll = Point::new(a.ll.x.min(b.ll.x), a.ll.y.min(b.ll.y));
    let ur = Point::new(a.ur.x.max(b.ur.x), a.ur.y.max(b.ur.y));
    Extent::from_corners(ll, ur)
}
