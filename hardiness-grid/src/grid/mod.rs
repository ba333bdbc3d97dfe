mod bbox;
mod containment_policy;
mod grid_builder;
mod grid_error;
mod grid_point;
mod output_layout;
mod stepping_policy;
mod zone_grid;

pub use bbox::{parse_bbox, Bbox, BboxError};
pub use containment_policy::ContainmentPolicy;
pub use grid_builder::{build_zone_grid, classify_features, GridOptions, DEFAULT_STEP, MAX_GRID_POINTS};
pub use grid_error::GridError;
pub use grid_point::GridPoint;
pub use output_layout::OutputLayout;
pub use stepping_policy::{SteppingPolicy, MAX_AXIS_POINTS};
pub use zone_grid::ZoneGrid;
