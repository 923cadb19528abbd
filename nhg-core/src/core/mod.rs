//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod config;
pub mod crs;
pub mod error;
pub mod gridcfg;

pub use self::config::{parse_config, read_config, ApplicationCfg, Config};
pub use self::crs::{CoordTransformer, Crs, CrsSpec};
pub use self::error::{Error, Result};
pub use self::gridcfg::GridSpec;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod crs_test;
