//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::gdal_crs::{spatial_ref, GdalTransformer};
use crate::gdal_error;
use gdal::vector::{
    FieldValue, Geometry, Layer, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType,
};
use gdal::{Dataset, DatasetOptions, DriverManager, GdalOpenFlags};
use nhg_core::core::{CoordTransformer, Crs, CrsSpec, Error, Result};
use nhg_core::output::{field_values, OutputSpec, VectorFormat, VectorOutput, FIELDS};
use nhg_grid::{AlignedGrid, Cell};
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

const SHAPEFILE_PARTS: [&str; 5] = ["shp", "shx", "dbf", "prj", "cpg"];

/// Fishnet polygons written with OGR
pub struct GdalOutput {
    spec: OutputSpec,
    crs: Crs,
    transformer: Option<GdalTransformer>,
}

impl GdalOutput {
    pub fn new(spec: &OutputSpec, crs: &CrsSpec) -> Result<GdalOutput> {
        let transformer = match crs.reproject_target() {
            Some(target) => Some(GdalTransformer::new(&crs.grid, target)?),
            None => None,
        };
        Ok(GdalOutput {
            spec: spec.clone(),
            crs: crs.output_crs().clone(),
            transformer,
        })
    }
    pub fn path(&self) -> String {
        self.spec.path()
    }
    /// Open or create the data source at `path`, shapefiles are recreated
    fn open_dataset(&self, path: &str) -> Result<Dataset> {
        let driver =
            DriverManager::get_driver_by_name(self.spec.format.driver_name()).map_err(gdal_error)?;
        if self.spec.format == VectorFormat::Shapefile {
            remove_shapefile(path)?;
            return driver.create_vector_only(path).map_err(gdal_error);
        }
        if !Path::new(path).exists() {
            info!("Creating {}", path);
            return driver.create_vector_only(path).map_err(gdal_error);
        }
        Dataset::open_ex(
            path,
            DatasetOptions {
                open_flags: GdalOpenFlags::GDAL_OF_UPDATE | GdalOpenFlags::GDAL_OF_VECTOR,
                ..Default::default()
            },
        )
        .map_err(gdal_error)
    }
    /// Create layer `name` with the cell attributes
    fn create_layer(
        &self,
        dataset: &mut Dataset,
        name: &str,
        ty: OGRwkbGeometryType::Type,
    ) -> Result<()> {
        let srs = spatial_ref(&self.crs)?;
        let overwrite = ["OVERWRITE=YES"];
        let mut layer = dataset
            .create_layer(LayerOptions {
                name,
                srs: Some(&srs),
                ty,
                options: if self.spec.overwrite {
                    Some(&overwrite[..])
                } else {
                    None
                },
            })
            .map_err(gdal_error)?;
        let fields: Vec<(&str, OGRFieldType::Type)> = FIELDS
            .iter()
            .map(|name| (*name, OGRFieldType::OFTInteger))
            .collect();
        layer.create_defn_fields(&fields).map_err(gdal_error)?;
        Ok(())
    }
    fn write_features(
        &self,
        polygons: &mut Layer,
        mut points: Option<&mut Layer>,
        cells: &mut dyn Iterator<Item = Cell>,
    ) -> Result<u64> {
        let mut count = 0;
        for cell in cells {
            let cell = match self.transformer {
                Some(ref transformer) => transformer.transform_cell(&cell)?,
                None => cell,
            };
            let nr = cell.cell_number;
            let mut values = Vec::with_capacity(FIELDS.len());
            for value in field_values(&cell).iter() {
                let value = i32::try_from(*value)
                    .map_err(|_| Error::cell(nr, format!("{} exceeds integer field", value)))?;
                values.push(FieldValue::IntegerValue(value));
            }
            let geometry =
                Geometry::from_wkt(&cell.wkt()).map_err(|e| Error::cell(nr, e.to_string()))?;
            polygons
                .create_feature_fields(geometry, &FIELDS, &values)
                .map_err(|e| Error::cell(nr, e.to_string()))?;
            if let Some(ref mut points) = points {
                let center = Geometry::from_wkt(&cell.center().wkt())
                    .map_err(|e| Error::cell(nr, e.to_string()))?;
                points
                    .create_feature_fields(center, &FIELDS, &values)
                    .map_err(|e| Error::cell(nr, e.to_string()))?;
            }
            count += 1;
        }
        Ok(count)
    }
    /// Polygons and label points go to separate files
    fn write_shapefiles(&self, cells: &mut dyn Iterator<Item = Cell>) -> Result<u64> {
        let mut dataset = self.open_dataset(&self.path())?;
        self.create_layer(&mut dataset, &self.spec.layer, OGRwkbGeometryType::wkbPolygon)?;
        let mut label_dataset = None;
        if self.spec.labels {
            let mut labels = self.open_dataset(&self.spec.label_path())?;
            let name = self.spec.label_layer();
            self.create_layer(&mut labels, &name, OGRwkbGeometryType::wkbPoint)?;
            label_dataset = Some(labels);
        }
        let mut polygons = dataset.layer(0).map_err(gdal_error)?;
        let mut points = match label_dataset {
            Some(ref labels) => Some(labels.layer(0).map_err(gdal_error)?),
            None => None,
        };
        self.write_features(&mut polygons, points.as_mut(), cells)
    }
}

fn remove_shapefile(path: &str) -> Result<()> {
    let base = Path::new(path);
    for ext in SHAPEFILE_PARTS.iter() {
        let part = base.with_extension(ext);
        if part.exists() {
            debug!("Removing {}", part.display());
            fs::remove_file(&part)?;
        }
    }
    Ok(())
}

impl VectorOutput for GdalOutput {
    fn write_cells(
        &mut self,
        grid: &AlignedGrid,
        cells: &mut dyn Iterator<Item = Cell>,
    ) -> Result<u64> {
        info!(
            "Writing {} cells to {} layer '{}'",
            grid.cell_count(),
            self.path(),
            self.spec.layer
        );
        if self.spec.format == VectorFormat::Shapefile {
            return self.write_shapefiles(cells);
        }
        let label_layer = self.spec.label_layer();
        let mut dataset = self.open_dataset(&self.path())?;
        let mut txn = dataset.start_transaction().map_err(gdal_error)?;
        self.create_layer(&mut txn, &self.spec.layer, OGRwkbGeometryType::wkbPolygon)?;
        if self.spec.labels {
            self.create_layer(&mut txn, &label_layer, OGRwkbGeometryType::wkbPoint)?;
        }
        let count = {
            let mut polygons = txn.layer_by_name(&self.spec.layer).map_err(gdal_error)?;
            let mut points = if self.spec.labels {
                Some(txn.layer_by_name(&label_layer).map_err(gdal_error)?)
            } else {
                None
            };
            self.write_features(&mut polygons, points.as_mut(), cells)?
        };
        txn.commit().map_err(gdal_error)?;
        Ok(count)
    }
}
