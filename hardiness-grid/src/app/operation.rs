use super::{AppError, BuildConfig};
use crate::{
    grid::{self, ContainmentPolicy, OutputLayout, SteppingPolicy},
    lookup::ZoneGridLookup,
};
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Debug, Clone, Subcommand)]
pub enum GridOperation {
    /// classify a lon/lat grid against hardiness zone polygons and write it as JSON
    Build(BuildArgs),
    /// report the zone of a location from a previously built zone grid
    Lookup {
        /// a zone grid JSON file written by `build` in the grouped layout
        #[arg(long)]
        grid: String,
        /// latitude of the location
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// longitude of the location
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// fail when the nearest grid point is further than this many degrees away
        #[arg(long)]
        max_distance: Option<f64>,
        /// print the full match as JSON instead of the zone label
        #[arg(long)]
        json: bool,
    },
}

/// arguments of the `build` operation. the dataset, zone field, bbox and output
/// path are required but may come from `--config` instead of the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// TOML file supplying any of these options, overridden by command line values
    #[arg(long)]
    pub config: Option<String>,
    /// zone polygon dataset, a .shp file (or .geojson/.json, or .csv with a WKT `geometry` column)
    #[arg(long)]
    pub shapefile: Option<String>,
    /// name of the attribute holding the zone label
    #[arg(long)]
    pub zone_field: Option<String>,
    /// grid step size in degrees [default: 0.25]
    #[arg(long)]
    pub step: Option<f64>,
    /// bounding box in format: minx,miny,maxx,maxy
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<String>,
    /// output JSON file path
    #[arg(long)]
    pub out: Option<String>,
    /// how grid coordinates are generated [default: indexed]
    #[arg(long, value_enum)]
    pub stepping: Option<SteppingPolicy>,
    /// whether points on a polygon boundary belong to it [default: covers]
    #[arg(long, value_enum)]
    pub containment: Option<ContainmentPolicy>,
    /// layout of the output JSON [default: grouped]
    #[arg(long, value_enum)]
    pub layout: Option<OutputLayout>,
    /// show a progress bar while classifying
    #[arg(long)]
    pub progress: bool,
}

impl GridOperation {
    pub fn run(&self) -> Result<(), AppError> {
        match self {
            GridOperation::Build(args) => run_build(args),
            GridOperation::Lookup {
                grid,
                lat,
                lng,
                max_distance,
                json,
            } => {
                let lookup = ZoneGridLookup::from_path(Path::new(grid))?;
                let result = lookup.nearest(*lat, *lng, *max_distance)?;
                log::info!(
                    "nearest grid point ({}, {}) is {} degrees away",
                    result.lat,
                    result.lng,
                    result.distance
                );
                if *json {
                    println!("{}", serde_json::to_string(&result)?);
                } else {
                    println!("{}", result.zone);
                }
                Ok(())
            }
        }
    }
}

fn run_build(args: &BuildArgs) -> Result<(), AppError> {
    let base = match &args.config {
        Some(filepath) => BuildConfig::from_file(filepath)?,
        None => BuildConfig::default(),
    };
    let plan = base.merge(args).into_plan()?;
    let grid = grid::build_zone_grid(&plan.source, &plan.options)?;
    grid.write_json(Path::new(&plan.out), plan.layout)?;
    println!(
        "Successfully wrote {} zones to {}",
        grid.zone_count(),
        plan.out
    );
    Ok(())
}
