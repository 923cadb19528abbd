//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use nhg_grid::GridError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("CRS error: {0}")]
    Crs(String),
    #[error("write error{}: {}", at_cell(.cell), .message)]
    Persistence { cell: Option<u64>, message: String },
    #[error("configuration error: {0}")]
    Config(String),
}

fn at_cell(cell: &Option<u64>) -> String {
    match cell {
        Some(nr) => format!(" at cell {}", nr),
        None => String::new(),
    }
}

impl Error {
    pub fn persistence<S: Into<String>>(message: S) -> Error {
        Error::Persistence {
            cell: None,
            message: message.into(),
        }
    }
    /// Failure while writing the cell with local number `cell`
    pub fn cell<S: Into<String>>(cell: u64, message: S) -> Error {
        Error::Persistence {
            cell: Some(cell),
            message: message.into(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
