use super::GridOperation;
use clap::Parser;

/// command line tool for building and querying USDA hardiness zone lookup grids
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct HardinessGridApp {
    #[command(subcommand)]
    pub op: GridOperation,
}
