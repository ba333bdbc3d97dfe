use super::{AppError, BuildArgs};
use crate::{
    grid::{self, ContainmentPolicy, GridOptions, OutputLayout, SteppingPolicy},
    source::ZoneSource,
};
use config::Config;
use serde::{Deserialize, Serialize};

/// options of the `build` operation as read from a TOML file. every key is
/// optional; command line flags take precedence over values found here.
///
/// ```toml
/// shapefile = "data/usda/phzm_us_zones_shp_2023.shp"
/// zone_field = "zone"
/// step = 0.25
/// bbox = "-125.0,24.0,-66.5,49.5"
/// out = "data/usda/zones_by_lat_lng.json"
/// stepping = "indexed"
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BuildConfig {
    pub shapefile: Option<String>,
    pub zone_field: Option<String>,
    pub step: Option<f64>,
    pub bbox: Option<String>,
    pub out: Option<String>,
    pub stepping: Option<SteppingPolicy>,
    pub containment: Option<ContainmentPolicy>,
    pub layout: Option<OutputLayout>,
    pub progress: Option<bool>,
}

/// a fully resolved `build` invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildPlan {
    pub source: ZoneSource,
    pub options: GridOptions,
    pub out: String,
    pub layout: OutputLayout,
}

impl BuildConfig {
    pub fn from_file(filepath: &str) -> Result<BuildConfig, AppError> {
        let config_file = config::File::new(filepath, config::FileFormat::Toml);
        let config = Config::builder()
            .add_source(config_file)
            .build()
            .map_err(|e| AppError::ConfigReadError {
                msg: format!("failed reading '{filepath}'"),
                source: e,
            })?;
        config
            .try_deserialize::<BuildConfig>()
            .map_err(|e| AppError::ConfigReadError {
                msg: format!("failed deserializing build options from '{filepath}'"),
                source: e,
            })
    }

    /// overlays the command line arguments onto this config.
    pub fn merge(self, args: &BuildArgs) -> BuildConfig {
        BuildConfig {
            shapefile: args.shapefile.clone().or(self.shapefile),
            zone_field: args.zone_field.clone().or(self.zone_field),
            step: args.step.or(self.step),
            bbox: args.bbox.clone().or(self.bbox),
            out: args.out.clone().or(self.out),
            stepping: args.stepping.or(self.stepping),
            containment: args.containment.or(self.containment),
            layout: args.layout.or(self.layout),
            progress: if args.progress {
                Some(true)
            } else {
                self.progress
            },
        }
    }

    /// checks required options, applies defaults and parses the bounding box.
    /// the bbox is parsed first so a malformed bbox fails before any file is touched.
    pub fn into_plan(self) -> Result<BuildPlan, AppError> {
        let bbox_str = required(self.bbox, "bbox")?;
        let bbox = grid::parse_bbox(&bbox_str)?;
        let shapefile = required(self.shapefile, "shapefile")?;
        let zone_field = required(self.zone_field, "zone-field")?;
        let out = required(self.out, "out")?;
        let source = ZoneSource::from_path(&shapefile, &zone_field)?;
        let options = GridOptions {
            bbox,
            step: self.step.unwrap_or(grid::DEFAULT_STEP),
            stepping: self.stepping.unwrap_or_default(),
            containment: self.containment.unwrap_or_default(),
            progress: self.progress.unwrap_or_default(),
        };
        Ok(BuildPlan {
            source,
            options,
            out,
            layout: self.layout.unwrap_or_default(),
        })
    }
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::MissingArgument(flag.to_string()))
}
