//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::fishnet_service::FishnetService;
use clap::ArgMatches;
use nhg_core::core::config::{CrsCfg, CrsValueCfg, RasterCfg, DEFAULT_CONFIG};
use nhg_core::core::gridcfg::{ExtentCfg, FactorCfg};
use nhg_core::core::{parse_config, read_config, ApplicationCfg, Config, Error};
use std::str::FromStr;

const GRID_ARGS: [&str; 12] = [
    "extent",
    "national",
    "factor",
    "rotation",
    "snap",
    "format",
    "name",
    "layer",
    "labels",
    "raster",
    "source-crs",
    "target-crs",
];

/// Parse `minx,miny,maxx,maxy`
pub fn parse_extent(numlist: &str) -> Result<ExtentCfg, String> {
    let arr = numlist
        .split(',')
        .map(|v| f64::from_str(v.trim()))
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| format!("Error parsing 'extent' as list of float values: {}", numlist))?;
    if arr.len() != 4 {
        return Err(format!(
            "Expected 'extent' as minx,miny,maxx,maxy, got {}",
            numlist
        ));
    }
    Ok(ExtentCfg {
        ll: (arr[0], arr[1]),
        ur: (arr[2], arr[3]),
        lr: None,
        ul: None,
    })
}

/// Configuration from config file or command line arguments
pub fn config_from_args(args: &ArgMatches) -> Result<ApplicationCfg, String> {
    if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        for argname in GRID_ARGS.iter() {
            if args.is_present(argname) {
                warn!("Ignoring argument `{}`", argname);
            }
        }
        return read_config(cfgpath);
    }
    let mut config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "args")?;
    config.grid.national = args.is_present("national");
    config.grid.extent = match args.value_of("extent") {
        Some(numlist) => Some(parse_extent(numlist)?),
        None => None,
    };
    if !config.grid.national && config.grid.extent.is_none() {
        return Err("Either 'config', 'extent' or 'national' is required".to_string());
    }
    if let Some(factor) = args.value_of("factor") {
        config.grid.factor = FactorCfg::Text(factor.to_string());
    }
    if let Some(rotation) = args.value_of("rotation") {
        config.grid.rotation = f64::from_str(rotation)
            .map_err(|_| format!("Error parsing 'rotation' as float value: {}", rotation))?;
    }
    config.grid.snap = args.value_of("snap").map(|s| s.to_string());
    let source = args.value_of("source-crs");
    let target = args.value_of("target-crs");
    if source.is_some() || target.is_some() {
        config.crs = Some(CrsCfg {
            grid: None,
            source: source.map(|s| CrsValueCfg::Text(s.to_string())),
            target: target.map(|s| CrsValueCfg::Text(s.to_string())),
        });
    }
    if let Some(format) = args.value_of("format") {
        config.output.format = format.to_string();
    }
    if let Some(name) = args.value_of("name") {
        config.output.name = name.to_string();
    }
    if let Some(layer) = args.value_of("layer") {
        config.output.layer = layer.to_string();
    }
    config.output.labels = args.is_present("labels");
    config.raster = args.value_of("raster").map(|path| RasterCfg {
        path: path.to_string(),
        format: None,
        nodata: 0,
        numbering: None,
        source: None,
        attribute: None,
    });
    Ok(config)
}

pub fn service_from_args(config: &ApplicationCfg) -> Result<FishnetService, Error> {
    FishnetService::from_config(config).map_err(Error::Config)
}
