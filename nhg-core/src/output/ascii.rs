//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::{Error, Result};
use crate::output::RasterOutput;
use nhg_grid::{AlignedGrid, CellNumberGrid, RowOrder};
use std::fs::File;
use std::io::{BufWriter, Write};

/// ESRI ASCII grid
pub struct AsciiGridOutput<W: Write> {
    writer: W,
}

impl AsciiGridOutput<BufWriter<File>> {
    pub fn create(path: &str) -> Result<AsciiGridOutput<BufWriter<File>>> {
        let file = File::create(path)
            .map_err(|e| Error::persistence(format!("Could not create {}: {}", path, e)))?;
        Ok(AsciiGridOutput::new(BufWriter::new(file)))
    }
}

impl<W: Write> AsciiGridOutput<W> {
    pub fn new(writer: W) -> AsciiGridOutput<W> {
        AsciiGridOutput { writer }
    }
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RasterOutput for AsciiGridOutput<W> {
    fn write_raster(
        &mut self,
        numbers: &CellNumberGrid,
        grid: &AlignedGrid,
        nodata: i64,
    ) -> Result<()> {
        if numbers.rows() != grid.rows || numbers.cols() != grid.cols {
            return Err(Error::persistence(format!(
                "cell numbers ({} x {}) do not match grid ({} x {})",
                numbers.rows(),
                numbers.cols(),
                grid.rows,
                grid.cols
            )));
        }
        // rows are written north to south
        let numbers = match numbers.order() {
            RowOrder::TopDown => numbers.clone(),
            RowOrder::BottomUp => numbers.flipped(),
        };
        let origin = grid.origin();
        writeln!(self.writer, "ncols {}", grid.cols)?;
        writeln!(self.writer, "nrows {}", grid.rows)?;
        writeln!(self.writer, "xllcorner {}", origin.x)?;
        writeln!(self.writer, "yllcorner {}", origin.y)?;
        writeln!(self.writer, "cellsize {}", grid.cell_size)?;
        writeln!(self.writer, "NODATA_value {}", nodata)?;
        for row in (0..numbers.rows()).filter_map(|r| numbers.row(r)) {
            let line = row
                .iter()
                .map(|nr| nr.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
