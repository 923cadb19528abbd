//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::gridcfg::{ExtentCfg, FactorCfg};
use regex::Regex;
use serde::Deserialize;
use std;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    #[serde(default)]
    pub reference: ReferenceCfg,
    pub grid: GridCfg,
    pub crs: Option<CrsCfg>,
    pub output: OutputCfg,
    pub raster: Option<RasterCfg>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ReferenceCfg {
    pub predefined: Option<String>,
    pub user: Option<UserReferenceCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UserReferenceCfg {
    /// Lower left corner of the reference grid
    pub origin: (f64, f64),
    /// Reference cell size in CRS units
    pub cell_size: f64,
    pub rows: u32,
    pub cols: u32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GridCfg {
    /// Cover the whole reference grid instead of `extent`
    #[serde(default)]
    pub national: bool,
    pub extent: Option<ExtentCfg>,
    #[serde(default)]
    pub factor: FactorCfg,
    /// Degrees, counter-clockwise about the lower left corner
    #[serde(default)]
    pub rotation: f64,
    /// `contain` or `legacy`
    pub snap: Option<String>,
}

/// EPSG code or PROJ4 string
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum CrsValueCfg {
    Epsg(u32),
    Text(String),
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct CrsCfg {
    /// CRS of the reference grid
    pub grid: Option<CrsValueCfg>,
    /// CRS of the input extent
    pub source: Option<CrsValueCfg>,
    /// CRS the cells are written in
    pub target: Option<CrsValueCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputCfg {
    #[serde(default = "default_format")]
    pub format: String,
    pub name: String,
    #[serde(default = "default_layer")]
    pub layer: String,
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
    /// Write cell center points
    #[serde(default)]
    pub labels: bool,
}

pub fn default_format() -> String {
    "gpkg".to_string()
}

pub const DEFAULT_LAYER: &str = "modelgrid";

pub fn default_layer() -> String {
    DEFAULT_LAYER.to_string()
}

pub fn default_overwrite() -> bool {
    true
}

#[derive(Deserialize, Clone, Debug)]
pub struct RasterCfg {
    pub path: String,
    /// `gtiff` or `aaigrid` (Default: derived from the path extension)
    pub format: Option<String>,
    #[serde(default)]
    pub nodata: i64,
    /// `local` or `national`
    pub numbering: Option<String>,
    /// `cells` or `vector`
    pub source: Option<String>,
    /// Attribute burnt when rasterizing the vector output
    pub attribute: Option<String>,
}

pub const DEFAULT_CONFIG: &'static str = r#"
[grid]
national = false
extent = { ll = [-2553045.0, 3903285.0], ur = [-2549045.0, 3907285.0] }
factor = 1

[output]
format = "gpkg"
name = "modelgrid"
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]_]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
