//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid errors

use thiserror::Error;

/// Failures detected before any cell is generated
#[derive(Error, Clone, PartialEq, Debug)]
pub enum GridError {
    /// Degenerate extent, zero-length edge or non-positive cell size
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Resolution factor outside of the legal set
    #[error("invalid resolution factor '{0}' (expected a positive integer, 1/2, 1/4 or 1/8)")]
    InvalidResolution(String),
    /// Snapped grid does not start on an integral reference row/column
    #[error("misaligned reference: {0}")]
    MisalignedReference(String),
    /// Snapped grid starts west or north of the reference grid
    #[error("extent lies outside of the reference grid: {0}")]
    OutsideReference(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
