//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::outputs::{self, RasterSink, VectorSink};
use nhg_core::core::{ApplicationCfg, Config, CrsSpec, Error, GridSpec, Result};
use nhg_core::output::{OutputSpec, RasterOutput, RasterSource, RasterSpec, VectorOutput};
use nhg_grid::{
    AlignedGrid, Cell, CellNumberGrid, Extent, Fishnet, GridAligner, ReferenceGrid, RowOrder,
};
use pbr::ProgressBar;
use std::io::{stderr, Stderr};
use std::time::Instant;

/// Fishnet generation from an extent aligned to the reference grid
#[derive(Clone, Debug)]
pub struct FishnetService {
    pub reference: ReferenceGrid,
    pub grid: GridSpec,
    pub crs: CrsSpec,
    pub output: OutputSpec,
    pub raster: Option<RasterSpec>,
}

/// Result of a generation run
#[derive(Clone, Debug)]
pub struct Summary {
    pub grid: AlignedGrid,
    /// Number of written cells
    pub cells: u64,
    pub vector_path: Option<String>,
    pub raster_path: Option<String>,
}

/// Counts finished rows on a progress bar
struct RowProgress<I> {
    cells: I,
    cols: u32,
    pb: Option<ProgressBar<Stderr>>,
}

impl<I: Iterator<Item = Cell>> Iterator for RowProgress<I> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let cell = self.cells.next();
        if let (Some(pb), Some(cell)) = (self.pb.as_mut(), cell.as_ref()) {
            if cell.col == self.cols {
                pb.inc();
            }
        }
        cell
    }
}

impl FishnetService {
    pub fn aligner(&self) -> GridAligner<'_> {
        GridAligner::new(&self.reference).with_snap(self.grid.snap)
    }
    /// Input extent in the reference grid CRS
    pub fn grid_extent(&self) -> Result<Option<Extent>> {
        let extent = match self.grid.extent {
            Some(ref extent) => extent,
            None => return Ok(None),
        };
        match self.crs.reproject_source() {
            Some(source) => {
                let projected =
                    outputs::transformer(source, &self.crs.grid)?.transform_extent(extent)?;
                debug!("Input extent {:?} projected to {:?}", extent, projected);
                Ok(Some(projected))
            }
            None => Ok(Some(extent.clone())),
        }
    }
    /// Snap the input extent (or the whole reference grid) to the reference grid
    pub fn align(&self) -> Result<AlignedGrid> {
        let grid = match self.grid_extent()? {
            Some(extent) => self.aligner().fit_to_national(&extent, self.grid.factor)?,
            None => self.aligner().national(self.grid.factor)?,
        };
        info!(
            "Aligned grid: {} rows x {} cols of {}, upper left {:?}, national row/col {}/{}",
            grid.rows,
            grid.cols,
            grid.cell_size,
            grid.upper_left(),
            grid.national_row,
            grid.national_col
        );
        debug!("Aligned extent {:?}", grid.extent);
        Ok(grid)
    }
    fn progress_bar(&self, rows: u32) -> ProgressBar<Stderr> {
        let mut pb = ProgressBar::on(stderr(), rows as u64);
        pb.message("Row ");
        pb.show_speed = false;
        pb.show_percent = false;
        pb.show_time_left = false;
        pb
    }
    /// Write all fishnet cells, returns the number of written cells
    pub fn write_fishnet(&self, grid: &AlignedGrid, progress: bool) -> Result<u64> {
        let fishnet = Fishnet::new(grid, self.grid.rotation);
        let mut sink = VectorSink::create(&self.output, &self.crs)?;
        let mut cells = RowProgress {
            cells: fishnet.cells(),
            cols: grid.cols,
            pb: if progress {
                Some(self.progress_bar(grid.rows))
            } else {
                None
            },
        };
        let count = sink.write_cells(grid, &mut cells)?;
        if let Some(ref mut pb) = cells.pb {
            pb.finish();
        }
        info!("{} cells written to {}", count, self.output.path());
        if self.output.labels {
            info!(
                "Label points written to {} layer '{}'",
                self.output.label_path(),
                self.output.label_layer()
            );
        }
        Ok(count)
    }
    /// Write the configured raster
    pub fn write_raster(&self, grid: &AlignedGrid, raster: &RasterSpec) -> Result<()> {
        if self.grid.rotation != 0.0 {
            warn!(
                "Raster {} is north-up, rotation of {} degrees ignored",
                raster.path, self.grid.rotation
            );
        }
        match raster.source {
            RasterSource::Cells => {
                let numbers = CellNumberGrid::build(grid, raster.numbering, RowOrder::TopDown);
                RasterSink::create(raster, &self.crs)?.write_raster(&numbers, grid, raster.nodata)?
            }
            RasterSource::Vector => outputs::rasterize(&self.output, raster, grid, &self.crs)?,
        }
        info!("Raster written to {}", raster.path);
        Ok(())
    }
    /// Align, write the fishnet and the optional raster
    pub fn generate(&self, progress: bool) -> Result<Summary> {
        let start = Instant::now();
        let grid = self.align()?;
        let cells = self.write_fishnet(&grid, progress)?;
        let raster_path = match self.raster {
            Some(ref raster) => {
                self.write_raster(&grid, raster)?;
                Some(raster.path.clone())
            }
            None => None,
        };
        info!("Fishnet generated in {:.1?}", start.elapsed());
        Ok(Summary {
            grid,
            cells,
            vector_path: Some(self.output.path()),
            raster_path,
        })
    }
    /// Align and write the raster only
    pub fn generate_raster(&self) -> Result<Summary> {
        let raster = self
            .raster
            .as_ref()
            .ok_or_else(|| Error::Config("Raster output missing".to_string()))?;
        let grid = self.align()?;
        self.write_raster(&grid, raster)?;
        Ok(Summary {
            grid,
            cells: 0,
            vector_path: None,
            raster_path: Some(raster.path.clone()),
        })
    }
}

impl<'a> Config<'a, ApplicationCfg> for FishnetService {
    fn from_config(config: &ApplicationCfg) -> std::result::Result<Self, String> {
        let reference = ReferenceGrid::from_config(&config.reference)?;
        let grid = GridSpec::from_config(&config.grid)?;
        let crs = match config.crs {
            Some(ref crs_cfg) => CrsSpec::from_config(crs_cfg)?,
            None => CrsSpec::default(),
        };
        let output = OutputSpec::from_config(&config.output)?;
        let raster = match config.raster {
            Some(ref raster_cfg) => Some(RasterSpec::from_config(raster_cfg)?),
            None => None,
        };
        Ok(FishnetService {
            reference,
            grid,
            crs,
            output,
            raster,
        })
    }
    fn gen_config() -> String {
        let mut config = String::new();
        config.push_str(TOML_HEADER);
        config.push_str(&ReferenceGrid::gen_config());
        config.push_str(&GridSpec::gen_config());
        config.push_str(&CrsSpec::gen_config());
        config.push_str(&OutputSpec::gen_config());
        config.push_str(&RasterSpec::gen_config());
        config
    }
}

const TOML_HEADER: &'static str = "# NHG fishnet configuration\n";
