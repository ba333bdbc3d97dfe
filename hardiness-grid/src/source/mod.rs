mod source_error;
mod zone_feature;
mod zone_label;
mod zone_source;

pub use source_error::SourceError;
pub use zone_feature::ZoneFeature;
pub use zone_source::ZoneSource;
