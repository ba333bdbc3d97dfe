mod app_error;
mod build_config;
mod hardiness_grid_app;
mod operation;

pub use app_error::AppError;
pub use build_config::{BuildConfig, BuildPlan};
pub use hardiness_grid_app::HardinessGridApp;
pub use operation::{BuildArgs, GridOperation};
