//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{CrsCfg, CrsValueCfg};
use crate::core::crs::{CoordTransformer, Crs, CrsSpec};
use crate::core::error::{Error, Result};
use crate::core::Config;
use nhg_grid::{Extent, Fishnet, GridAligner, Point, ReferenceGrid, ResolutionFactor};

struct Shift(f64, f64);

impl CoordTransformer for Shift {
    fn transform(&self, point: Point) -> Result<Point> {
        Ok(Point::new(point.x + self.0, point.y + self.1))
    }
}

struct EastOnly;

impl CoordTransformer for EastOnly {
    fn transform(&self, point: Point) -> Result<Point> {
        if point.x < 0.0 {
            Err(Error::Crs(format!("{} out of range", point.x)))
        } else {
            Ok(point)
        }
    }
}

#[test]
fn test_parse_crs() {
    assert_eq!("EPSG:5070".parse::<Crs>().unwrap(), Crs::Epsg(5070));
    assert_eq!("epsg:4326".parse::<Crs>().unwrap(), Crs::Epsg(4326));
    assert_eq!(" 4269 ".parse::<Crs>().unwrap(), Crs::Epsg(4269));
    assert_eq!(
        "+proj=utm +zone=15 +datum=NAD83".parse::<Crs>().unwrap(),
        Crs::Proj4("+proj=utm +zone=15 +datum=NAD83".to_string())
    );
    match "WGS84".parse::<Crs>() {
        Err(Error::Crs(_)) => {}
        other => panic!("unexpected {:?}", other),
    }
    assert!("EPSG:".parse::<Crs>().is_err());
    assert_eq!(Crs::national().to_string(), "EPSG:5070");
}

#[test]
fn test_crs_spec() {
    let spec = CrsSpec::from_config(&CrsCfg::default()).unwrap();
    assert_eq!(spec, CrsSpec::default());
    assert_eq!(spec.output_crs(), &Crs::national());

    let cfg = CrsCfg {
        grid: Some(CrsValueCfg::Text("EPSG:5070".to_string())),
        source: Some(CrsValueCfg::Epsg(5070)),
        target: Some(CrsValueCfg::Epsg(4269)),
    };
    let spec = CrsSpec::from_config(&cfg).unwrap();
    assert!(spec.reproject_source().is_none());
    assert_eq!(spec.reproject_target(), Some(&Crs::Epsg(4269)));
    assert_eq!(spec.output_crs(), &Crs::Epsg(4269));

    let cfg = CrsCfg {
        source: Some(CrsValueCfg::Text("lat/lon".to_string())),
        ..CrsCfg::default()
    };
    assert!(CrsSpec::from_config(&cfg).is_err());
}

#[test]
fn test_transform_extent() {
    let extent = Extent::from_bounds(0.0, 0.0, 10.0, 5.0);
    let shifted = Shift(1.0, -1.0).transform_extent(&extent).unwrap();
    assert_eq!(shifted, Extent::from_bounds(1.0, -1.0, 11.0, 4.0));
}

#[test]
fn test_transform_cell() {
    let grid = GridAligner::new(ReferenceGrid::national())
        .fit_to_national(
            &Extent::from_bounds(-2553045.0, 3906285.0, -2552045.0, 3907285.0),
            ResolutionFactor::Multiple(1),
        )
        .unwrap();
    let cell = Fishnet::new(&grid, 0.0).cell(1, 1).unwrap();
    let moved = Shift(2553045.0, 0.0).transform_cell(&cell).unwrap();
    assert_eq!(moved.corners[0], Point::new(0.0, 3907285.0));
    assert_eq!(moved.cell_number, cell.cell_number);

    match EastOnly.transform_cell(&cell) {
        Err(Error::Persistence { cell: Some(1), .. }) => {}
        other => panic!("unexpected {:?}", other),
    }
}
