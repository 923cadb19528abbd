//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Resolution factors

use crate::error::{GridError, Result};
use std::fmt;
use std::str::FromStr;

/// Scale applied to the reference cell size
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ResolutionFactor {
    /// Reference cell size times n (n >= 1)
    Multiple(u32),
    Half,
    Quarter,
    Eighth,
}

impl Default for ResolutionFactor {
    fn default() -> ResolutionFactor {
        ResolutionFactor::Multiple(1)
    }
}

impl ResolutionFactor {
    pub fn multiple(n: u32) -> Result<ResolutionFactor> {
        if n == 0 {
            Err(GridError::InvalidResolution(n.to_string()))
        } else {
            Ok(ResolutionFactor::Multiple(n))
        }
    }
    /// Integer factor as found in configuration files
    pub fn from_int(n: i64) -> Result<ResolutionFactor> {
        if n < 1 || n > u32::MAX as i64 {
            Err(GridError::InvalidResolution(n.to_string()))
        } else {
            Ok(ResolutionFactor::Multiple(n as u32))
        }
    }
    /// Working cell size for a reference cell size
    pub fn cell_size(&self, reference_cell_size: f64) -> f64 {
        match *self {
            ResolutionFactor::Multiple(n) => reference_cell_size * n as f64,
            ResolutionFactor::Half => reference_cell_size / 2.0,
            ResolutionFactor::Quarter => reference_cell_size / 4.0,
            ResolutionFactor::Eighth => reference_cell_size / 8.0,
        }
    }
}

impl FromStr for ResolutionFactor {
    type Err = GridError;

    fn from_str(val: &str) -> Result<ResolutionFactor> {
        match val.trim() {
            "1/2" => Ok(ResolutionFactor::Half),
            "1/4" => Ok(ResolutionFactor::Quarter),
            "1/8" => Ok(ResolutionFactor::Eighth),
            s => match s.parse::<u32>() {
                Ok(n) if n > 0 => Ok(ResolutionFactor::Multiple(n)),
                _ => Err(GridError::InvalidResolution(val.to_string())),
            },
        }
    }
}

impl fmt::Display for ResolutionFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ResolutionFactor::Multiple(n) => write!(f, "{}", n),
            ResolutionFactor::Half => f.write_str("1/2"),
            ResolutionFactor::Quarter => f.write_str("1/4"),
            ResolutionFactor::Eighth => f.write_str("1/8"),
        }
    }
}
