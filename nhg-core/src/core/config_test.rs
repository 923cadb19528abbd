//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{read_config, ApplicationCfg, CrsValueCfg, DEFAULT_CONFIG};
use crate::core::gridcfg::FactorCfg;
use crate::core::parse_config;
use std::env;

#[test]
fn test_load_config() {
    let config = read_config("../nhg-service/src/test/example.toml");
    println!("{:#?}", config);
    let config: ApplicationCfg = config.expect("load_config returned Err");
    assert_eq!(config.reference.predefined, Some("nhg".to_string()));
    assert!(!config.grid.national);
    let extent = config.grid.extent.expect("extent");
    assert_eq!(extent.ll, (-2000100.0, 1000200.0));
    assert_eq!(extent.ur, (-1995900.0, 1003800.0));
    assert!(extent.lr.is_none());
    assert_eq!(config.grid.factor, FactorCfg::Text("1/2".to_string()));
    assert_eq!(config.grid.snap, Some("contain".to_string()));
    let crs = config.crs.expect("crs");
    assert_eq!(crs.grid, Some(CrsValueCfg::Text("EPSG:5070".to_string())));
    assert!(crs.source.is_none());
    assert_eq!(config.output.format, "csv");
    assert_eq!(config.output.layer, "cells");
    assert!(config.output.overwrite);
    let raster = config.raster.expect("raster");
    assert_eq!(raster.path, "modelgrid.asc");
    assert_eq!(raster.nodata, 0);
    assert_eq!(raster.numbering, Some("national".to_string()));
}

#[test]
fn test_parse_error() {
    let config: Result<ApplicationCfg, _> = read_config("src/core/mod.rs");
    assert!(config.err().unwrap().starts_with("src/core/mod.rs - "));

    let config: Result<ApplicationCfg, _> = read_config("wrongfile");
    assert_eq!("Could not find config file!", config.err().unwrap());
}

#[test]
fn test_defaults() {
    let config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "default.toml").unwrap();
    assert!(config.reference.predefined.is_none());
    assert!(config.reference.user.is_none());
    assert_eq!(config.grid.factor, FactorCfg::Int(1));
    assert_eq!(config.grid.rotation, 0.0);
    assert!(config.crs.is_none());
    assert_eq!(config.output.format, "gpkg");
    assert_eq!(config.output.layer, "modelgrid");
    assert!(config.raster.is_none());

    let toml = r#"
        [grid]
        national = true
        factor = 4

        [crs]
        grid = 5070
        target = "+proj=longlat +datum=NAD83 +no_defs"

        [output]
        name = "national"
        overwrite = false
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "test.toml").unwrap();
    assert!(config.grid.national);
    assert!(config.grid.extent.is_none());
    assert_eq!(config.grid.factor, FactorCfg::Int(4));
    let crs = config.crs.unwrap();
    assert_eq!(crs.grid, Some(CrsValueCfg::Epsg(5070)));
    assert_eq!(
        crs.target,
        Some(CrsValueCfg::Text(
            "+proj=longlat +datum=NAD83 +no_defs".to_string()
        ))
    );
    assert!(!config.output.overwrite);
}

#[test]
fn test_user_reference() {
    let toml = r#"
        [reference]
        user = { origin = [0.0, 0.0], cell_size = 250.0, rows = 40, cols = 60 }

        [grid]
        extent = { ll = [0.0, 0.0], lr = [1000.0, 0.0], ur = [1000.0, 500.0], ul = [0.0, 500.0] }

        [output]
        name = "user"
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "test.toml").unwrap();
    let user = config.reference.user.unwrap();
    assert_eq!(user.origin, (0.0, 0.0));
    assert_eq!(user.cell_size, 250.0);
    assert_eq!((user.rows, user.cols), (40, 60));
    assert_eq!(config.grid.extent.unwrap().ul, Some((0.0, 500.0)));
}

#[test]
fn test_template() {
    env::set_var("NHG_GRID_NAME", "from_env");
    let toml = r#"
        [grid]
        national = true

        [output]
        name = "{{ env.NHG_GRID_NAME }}"
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "test.toml").unwrap();
    assert_eq!(config.output.name, "from_env");

    let toml = r#"
        [output]
        name = "${NHG_GRID_NAME}"
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "test.toml");
    assert_eq!(
        config.err(),
        Some(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`"
                .to_string()
        )
    );
}
