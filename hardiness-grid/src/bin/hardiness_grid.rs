//! builds a lookup grid of USDA hardiness zones by lat/lng coordinates from a
//! zone polygon dataset, or queries a grid that was built earlier.
use clap::Parser;
use hardiness_grid::app::HardinessGridApp;

fn main() {
    env_logger::init();
    let args = HardinessGridApp::parse();
    if let Err(e) = args.op.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
