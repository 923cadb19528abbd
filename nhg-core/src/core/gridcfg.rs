//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{GridCfg, ReferenceCfg};
use crate::core::Config;
use nhg_grid::{Extent, Point, ReferenceGrid, ResolutionFactor, SnapPolicy};

#[derive(Deserialize, Clone, Debug)]
pub struct ExtentCfg {
    pub ll: (f64, f64),
    pub ur: (f64, f64),
    /// Derived axis-aligned when missing
    pub lr: Option<(f64, f64)>,
    pub ul: Option<(f64, f64)>,
}

impl From<&ExtentCfg> for Extent {
    fn from(cfg: &ExtentCfg) -> Extent {
        let ll = Point::from(cfg.ll);
        let ur = Point::from(cfg.ur);
        Extent::new(
            ll,
            cfg.lr.map(Point::from).unwrap_or(Point::new(ur.x, ll.y)),
            ur,
            cfg.ul.map(Point::from).unwrap_or(Point::new(ll.x, ur.y)),
        )
    }
}

/// Resolution factor as integer (`2`) or fraction string (`"1/2"`)
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum FactorCfg {
    Int(i64),
    Text(String),
}

impl Default for FactorCfg {
    fn default() -> FactorCfg {
        FactorCfg::Int(1)
    }
}

impl FactorCfg {
    pub fn factor(&self) -> Result<ResolutionFactor, String> {
        match self {
            FactorCfg::Int(n) => ResolutionFactor::from_int(*n),
            FactorCfg::Text(s) => s.parse::<ResolutionFactor>(),
        }
        .map_err(|e| e.to_string())
    }
}

pub fn snap_policy(name: &str) -> Result<SnapPolicy, String> {
    match &name.to_lowercase() as &str {
        "contain" => Ok(SnapPolicy::Contain),
        "legacy" => Ok(SnapPolicy::Legacy),
        _ => Err(format!("Unexpected enum value '{}'", name)),
    }
}

impl<'a> Config<'a, ReferenceCfg> for ReferenceGrid {
    fn from_config(reference_cfg: &ReferenceCfg) -> Result<Self, String> {
        if let Some(ref name) = reference_cfg.predefined {
            match name.as_str() {
                "nhg" | "national" => Ok(ReferenceGrid::national().clone()),
                _ => Err(format!("Unkown reference grid '{}'", name)),
            }
        } else if let Some(ref user) = reference_cfg.user {
            ReferenceGrid::new(
                Point::from(user.origin),
                user.cell_size,
                user.rows,
                user.cols,
            )
            .map_err(|e| e.to_string())
        } else {
            Ok(ReferenceGrid::national().clone())
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[reference]
predefined = "nhg"
#user = { origin = [-2553045.0, -92715.0], cell_size = 1000.0, rows = 4000, cols = 4980 }
"#;
        toml.to_string()
    }
}

/// What to align: an extent or the whole reference grid
#[derive(PartialEq, Clone, Debug)]
pub struct GridSpec {
    /// `None` covers the whole reference grid
    pub extent: Option<Extent>,
    pub factor: ResolutionFactor,
    pub rotation: f64,
    pub snap: SnapPolicy,
}

impl<'a> Config<'a, GridCfg> for GridSpec {
    fn from_config(grid_cfg: &GridCfg) -> Result<Self, String> {
        let extent = match (grid_cfg.national, &grid_cfg.extent) {
            (true, _) => None,
            (false, Some(extent)) => Some(Extent::from(extent)),
            (false, None) => {
                return Err("Grid extent missing (set `extent` or `national = true`)".to_string())
            }
        };
        if grid_cfg.national && grid_cfg.extent.is_some() {
            warn!("Grid extent ignored for national grid");
        }
        if !grid_cfg.rotation.is_finite() {
            return Err(format!("Invalid rotation angle {}", grid_cfg.rotation));
        }
        let snap = match grid_cfg.snap {
            Some(ref name) => snap_policy(name)?,
            None => SnapPolicy::default(),
        };
        Ok(GridSpec {
            extent,
            factor: grid_cfg.factor.factor()?,
            rotation: grid_cfg.rotation,
            snap,
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[grid]
# Cover the whole reference grid
national = false
# Lower left and upper right corner (lr and ul are optional)
extent = { ll = [-2553045.0, 3903285.0], ur = [-2549045.0, 3907285.0] }
# Positive integer or "1/2", "1/4", "1/8"
factor = 1
# Degrees, counter-clockwise about the lower left corner
rotation = 0.0
# contain: keep aligned extents, legacy: always add a row/column at the upper right
snap = "contain"
"#;
        toml.to_string()
    }
}
