//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::runtime_config::{config_from_args, parse_extent, service_from_args};
use clap::{App, AppSettings, ArgMatches};
use nhg_core::core::config::CrsValueCfg;
use nhg_core::core::gridcfg::FactorCfg;
use nhg_core::core::Crs;
use nhg_grid::{ResolutionFactor, SnapPolicy};

fn matches(args: &[&str]) -> ArgMatches<'static> {
    App::new("nhg_fishnet")
        .setting(AppSettings::AllowLeadingHyphen)
        .args_from_usage(
            "-c, --config=[FILE] 'Load from custom config file'
             --extent=[minx,miny,maxx,maxy] 'Extent to align'
             --national 'Cover the whole reference grid'
             --factor=[N|1/2|1/4|1/8] 'Resolution factor'
             --rotation=[DEGREES] 'Rotation angle'
             --snap=[contain|legacy] 'Upper right snapping'
             --format=[shp|sqlite|gpkg|csv] 'Vector output format'
             --name=[NAME] 'Output name'
             --layer=[NAME] 'Output layer'
             --labels 'Write cell center points'
             --raster=[FILE] 'Raster output'
             --source-crs=[CRS] 'CRS of the extent'
             --target-crs=[CRS] 'CRS of the written cells'",
        )
        .get_matches_from(args.iter())
}

#[test]
fn test_parse_extent() {
    let extent = parse_extent("-2000100, 1000200,-1995900,1003800").unwrap();
    assert_eq!(extent.ll, (-2000100.0, 1000200.0));
    assert_eq!(extent.ur, (-1995900.0, 1003800.0));
    assert!(parse_extent("1,2,3").is_err());
    assert!(parse_extent("1,2,3,x").is_err());
}

#[test]
fn test_config_from_args() {
    let args = matches(&[
        "nhg_fishnet",
        "--extent=-2000100,1000200,-1995900,1003800",
        "--factor=1/4",
        "--rotation=12.5",
        "--snap=legacy",
        "--format=csv",
        "--name=fromargs",
        "--labels",
        "--raster=fromargs.asc",
        "--target-crs=EPSG:4269",
    ]);
    let config = config_from_args(&args).unwrap();
    assert!(!config.grid.national);
    assert_eq!(config.grid.factor, FactorCfg::Text("1/4".to_string()));
    assert_eq!(config.grid.rotation, 12.5);
    assert_eq!(config.output.format, "csv");
    assert_eq!(config.output.layer, "modelgrid");
    assert_eq!(
        config.crs.as_ref().unwrap().target,
        Some(CrsValueCfg::Text("EPSG:4269".to_string()))
    );

    let service = service_from_args(&config).unwrap();
    assert_eq!(service.grid.factor, ResolutionFactor::Quarter);
    assert_eq!(service.grid.snap, SnapPolicy::Legacy);
    assert_eq!(service.crs.output_crs(), &Crs::Epsg(4269));
    assert_eq!(service.output.path(), "fromargs.csv");
    assert!(service.output.labels);
    assert_eq!(service.output.label_path(), "fromargs_label.csv");
    assert_eq!(service.raster.unwrap().path, "fromargs.asc");
}

#[test]
fn test_national_args() {
    let args = matches(&["nhg_fishnet", "--national", "--factor=2"]);
    let config = config_from_args(&args).unwrap();
    assert!(config.grid.national);
    assert!(config.crs.is_none());
    assert!(config.raster.is_none());
    assert!(!config.output.labels);
    let service = service_from_args(&config).unwrap();
    assert!(service.grid.extent.is_none());
    let grid = service.align().unwrap();
    assert_eq!((grid.rows, grid.cols), (2000, 2490));
}

#[test]
fn test_args_errors() {
    let args = matches(&["nhg_fishnet", "--factor=2"]);
    assert!(config_from_args(&args).is_err());

    let args = matches(&["nhg_fishnet", "--national", "--rotation=steep"]);
    assert!(config_from_args(&args).is_err());

    let args = matches(&["nhg_fishnet", "--national", "--factor=3/4"]);
    let config = config_from_args(&args).unwrap();
    assert!(service_from_args(&config).is_err());

    let args = matches(&["nhg_fishnet", "-c", "nonexistent.toml", "--national"]);
    assert_eq!(
        config_from_args(&args).err(),
        Some("Could not find config file!".to_string())
    );
}
