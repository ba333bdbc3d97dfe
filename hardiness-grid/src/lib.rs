//! builds dense lookup grids of USDA plant hardiness zones from zone polygon datasets.
//!
//! a [`source::ZoneSource`] loads zone polygons, [`grid::build_zone_grid`] classifies
//! every point of a regular lon/lat mesh against them, and the resulting
//! [`grid::ZoneGrid`] is written as JSON. [`lookup::ZoneGridLookup`] answers
//! nearest-zone queries against a previously written grid.
pub mod app;
pub mod grid;
pub mod lookup;
pub mod source;
pub mod util;
