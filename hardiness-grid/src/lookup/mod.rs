mod lookup_error;
mod zone_grid_lookup;

pub use lookup_error::LookupError;
pub use zone_grid_lookup::{ZoneGridLookup, ZoneMatch};
