//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use nhg_core::core::{Config, Error};
use nhg_grid::AlignedGrid;
use nhg_service::{config_from_args, service_from_args, FishnetService};
use std::env;
use std::io::Write;
use std::process;
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t)
                .map(|tm| tm.to_string())
                .unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => loglevel.unwrap_or("info").to_string(),
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn exit_on_error<T>(result: Result<T, Error>) -> T {
    result.unwrap_or_else(|err| {
        error!("{}", err);
        println!("Error - {}", err);
        process::exit(1)
    })
}

fn service(args: &ArgMatches<'_>) -> FishnetService {
    let config = config_from_args(args).unwrap_or_else(|err| {
        println!("Error reading configuration - {} ", err);
        process::exit(1)
    });
    exit_on_error(service_from_args(&config))
}

fn print_grid(grid: &AlignedGrid) {
    let (minx, miny, maxx, maxy) = grid.extent.bounds();
    println!("extent: {} {} {} {}", minx, miny, maxx, maxy);
    println!("cell size: {}", grid.cell_size);
    println!("rows: {}", grid.rows);
    println!("cols: {}", grid.cols);
    println!("national row: {}", grid.national_row);
    println!("national col: {}", grid.national_col);
}

fn fishnet(args: &ArgMatches<'_>) {
    let service = service(args);
    let progress = args.value_of("progress").map_or(true, |s| {
        s.parse::<bool>().unwrap_or_else(|_| {
            println!("Error parsing 'progress' as boolean value");
            process::exit(1)
        })
    });
    let summary = exit_on_error(service.generate(progress));
    if progress {
        println!("");
    }
    print_grid(&summary.grid);
    println!("cells written: {}", summary.cells);
    if let Some(path) = summary.vector_path {
        println!("vector: {}", path);
    }
    if let Some(path) = summary.raster_path {
        println!("raster: {}", path);
    }
}

fn raster(args: &ArgMatches<'_>) {
    let summary = exit_on_error(service(args).generate_raster());
    print_grid(&summary.grid);
    if let Some(path) = summary.raster_path {
        println!("raster: {}", path);
    }
}

fn align(args: &ArgMatches<'_>) {
    let grid = exit_on_error(service(args).align());
    print_grid(&grid);
}

#[cfg(feature = "with-gdal")]
extern crate nhg_gdal;

fn version_info() -> String {
    #[cfg(feature = "with-gdal")]
    let version = format!(
        "{} (GDAL version {})",
        crate_version!(),
        nhg_gdal::gdal_version()
    );
    #[cfg(not(feature = "with-gdal"))]
    let version = crate_version!().to_string();
    version
}

const GRID_ARGS: &str = "-c, --config=[FILE] 'Load from custom config file'
                         --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                         --extent=[minx,miny,maxx,maxy] 'Extent to align to the reference grid'
                         --national 'Cover the whole reference grid'
                         --factor=[N|1/2|1/4|1/8] 'Resolution factor (Default: 1)'
                         --rotation=[DEGREES] 'Counter-clockwise rotation about the lower left corner'
                         --snap=[contain|legacy] 'Upper right snapping (Default: contain)'
                         --source-crs=[CRS] 'CRS of the extent (EPSG code or PROJ4 string)'
                         --target-crs=[CRS] 'CRS of the written cells'";

const OUTPUT_ARGS: &str = "--format=[shp|sqlite|gpkg|csv] 'Vector output format (Default: gpkg)'
                           --name=[NAME] 'Output file name'
                           --layer=[NAME] 'Output layer name (Default: modelgrid)'
                           --labels 'Write cell center points to layer <layer>_label'
                           --raster=[FILE] 'Raster of cell numbers (.tif or .asc)'";

fn main() {
    dotenv().ok();
    let version_info = version_info();
    let mut app = App::new("nhg_fishnet")
        .version(&version_info as &str)
        .author("Brian Clark, Katherine Knierim")
        .about("Fishnet grids aligned to the national hydrogeologic grid")
        .subcommand(
            SubCommand::with_name("fishnet")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(GRID_ARGS)
                .args_from_usage(OUTPUT_ARGS)
                .args_from_usage("--progress=[true|false] 'Show progress bar'")
                .about("Generate fishnet cells"),
        )
        .subcommand(
            SubCommand::with_name("raster")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(GRID_ARGS)
                .args_from_usage(OUTPUT_ARGS)
                .about("Generate raster of cell numbers"),
        )
        .subcommand(
            SubCommand::with_name("align")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(GRID_ARGS)
                .about("Print the extent aligned to the reference grid"),
        )
        .subcommand(
            SubCommand::with_name("genconfig")
                .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                .about("Generate configuration template"),
        );

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("fishnet", Some(sub_m)) => {
                init_logger(sub_m);
                fishnet(sub_m);
            }
            ("raster", Some(sub_m)) => {
                init_logger(sub_m);
                raster(sub_m);
            }
            ("align", Some(sub_m)) => {
                init_logger(sub_m);
                align(sub_m);
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", FishnetService::gen_config());
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
