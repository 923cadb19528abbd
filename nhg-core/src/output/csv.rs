//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::crs::CoordTransformer;
use crate::core::error::{Error, Result};
use crate::output::VectorOutput;
use nhg_grid::{AlignedGrid, Cell};
use std::fs::File;
use std::io::Write;

pub const CSV_HEADER_FIELDS: [&str; 7] = [
    "cellnum",
    "irow",
    "icol",
    "natlRow",
    "natlCol",
    "natlCellNum",
    "wkt",
];

/// Cells as CSV rows with a WKT polygon column
pub struct CsvOutput<W: Write> {
    writer: ::csv::Writer<W>,
    /// Cell center points, same columns
    labels: Option<::csv::Writer<W>>,
    transformer: Option<Box<dyn CoordTransformer>>,
}

fn create_file(path: &str) -> Result<File> {
    File::create(path).map_err(|e| Error::persistence(format!("Could not create {}: {}", path, e)))
}

impl CsvOutput<File> {
    pub fn create(path: &str) -> Result<CsvOutput<File>> {
        Ok(CsvOutput::new(create_file(path)?))
    }
    /// Also write label points into `path`
    pub fn with_label_file(self, path: &str) -> Result<CsvOutput<File>> {
        Ok(self.with_labels(create_file(path)?))
    }
}

fn csv_writer<W: Write>(writer: W) -> ::csv::Writer<W> {
    ::csv::WriterBuilder::new().from_writer(writer)
}

fn record(cell: &Cell, wkt: String) -> [String; 7] {
    [
        cell.cell_number.to_string(),
        cell.row.to_string(),
        cell.col.to_string(),
        cell.national_row.to_string(),
        cell.national_col.to_string(),
        cell.national_cell_number.to_string(),
        wkt,
    ]
}

fn into_writer<W: Write>(writer: ::csv::Writer<W>) -> Result<W> {
    writer
        .into_inner()
        .map_err(|e| Error::persistence(e.error().to_string()))
}

impl<W: Write> CsvOutput<W> {
    pub fn new(writer: W) -> CsvOutput<W> {
        CsvOutput {
            writer: csv_writer(writer),
            labels: None,
            transformer: None,
        }
    }
    pub fn with_labels(mut self, writer: W) -> CsvOutput<W> {
        self.labels = Some(csv_writer(writer));
        self
    }
    /// Reproject cell corners before writing
    pub fn with_transformer(mut self, transformer: Box<dyn CoordTransformer>) -> CsvOutput<W> {
        self.transformer = Some(transformer);
        self
    }
    /// Flushed cell and label writers
    pub fn into_inner(self) -> Result<(W, Option<W>)> {
        let labels = match self.labels {
            Some(labels) => Some(into_writer(labels)?),
            None => None,
        };
        Ok((into_writer(self.writer)?, labels))
    }
}

impl<W: Write> VectorOutput for CsvOutput<W> {
    fn write_cells(
        &mut self,
        grid: &AlignedGrid,
        cells: &mut dyn Iterator<Item = Cell>,
    ) -> Result<u64> {
        debug!("Writing {} cells as CSV", grid.cell_count());
        self.writer
            .write_record(&CSV_HEADER_FIELDS)
            .map_err(|e| Error::persistence(e.to_string()))?;
        if let Some(ref mut labels) = self.labels {
            labels
                .write_record(&CSV_HEADER_FIELDS)
                .map_err(|e| Error::persistence(e.to_string()))?;
        }
        let mut count = 0;
        for cell in cells {
            let cell = match self.transformer {
                Some(ref transformer) => transformer.transform_cell(&cell)?,
                None => cell,
            };
            let nr = cell.cell_number;
            self.writer
                .write_record(&record(&cell, cell.wkt()))
                .map_err(|e| Error::cell(nr, e.to_string()))?;
            if let Some(ref mut labels) = self.labels {
                labels
                    .write_record(&record(&cell, cell.center().wkt()))
                    .map_err(|e| Error::cell(nr, e.to_string()))?;
            }
            count += 1;
        }
        self.writer.flush()?;
        if let Some(ref mut labels) = self.labels {
            labels.flush()?;
        }
        Ok(count)
    }
}
