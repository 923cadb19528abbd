//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal_sys;
use nhg_core::core::{CoordTransformer, Crs, Error, Result};
use nhg_grid::Point;
use std::ffi::CString;

const US_FOOT: &str = "us-ft";

/// OGR spatial reference with x/y in easting/northing (lon/lat) order
pub fn spatial_ref(crs: &Crs) -> Result<SpatialRef> {
    let mut srs = match crs {
        Crs::Epsg(code) => SpatialRef::from_epsg(*code),
        Crs::Proj4(def) if def.contains(US_FOOT) => {
            // imported in meters, linear units set afterwards
            SpatialRef::from_proj4(&def.replace(US_FOOT, "m")).and_then(|srs| {
                set_us_feet(&srs)?;
                Ok(srs)
            })
        }
        Crs::Proj4(def) => SpatialRef::from_proj4(def),
    }
    .map_err(|e| Error::Crs(format!("{}: {}", crs, e)))?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

fn set_us_feet(srs: &SpatialRef) -> gdal::errors::Result<()> {
    let name = CString::new(US_FOOT)?;
    let rv = unsafe { gdal_sys::OSRSetLinearUnits(srs.to_c_hsrs(), name.as_ptr(), 0.3048) };
    if rv != gdal_sys::OGRErr::OGRERR_NONE {
        return Err(gdal::errors::GdalError::OgrError {
            err: rv,
            method_name: "OSRSetLinearUnits",
        });
    }
    Ok(())
}

pub struct GdalTransformer {
    transform: CoordTransform,
}

impl GdalTransformer {
    pub fn new(source: &Crs, target: &Crs) -> Result<GdalTransformer> {
        let transform = CoordTransform::new(&spatial_ref(source)?, &spatial_ref(target)?)
            .map_err(|e| Error::Crs(format!("{} -> {}: {}", source, target, e)))?;
        debug!("Coordinate transformation {} -> {}", source, target);
        Ok(GdalTransformer { transform })
    }
}

impl CoordTransformer for GdalTransformer {
    fn transform(&self, point: Point) -> Result<Point> {
        let mut xs = [point.x];
        let mut ys = [point.y];
        let mut zs = [0.0_f64];
        self.transform
            .transform_coords(&mut xs, &mut ys, &mut zs)
            .map_err(|e| Error::Crs(format!("({}, {}): {}", point.x, point.y, e)))?;
        Ok(Point::new(xs[0], ys[0]))
    }
}
