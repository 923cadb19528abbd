//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

#[cfg(feature = "with-gdal")]
extern crate nhg_gdal;

pub mod fishnet_service;
pub mod outputs;
pub mod runtime_config;

pub use crate::fishnet_service::{FishnetService, Summary};
pub use crate::runtime_config::{config_from_args, service_from_args};

#[cfg(test)]
mod runtime_config_test;
