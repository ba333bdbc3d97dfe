use crate::{
    grid::{BboxError, GridError},
    lookup::LookupError,
    source::SourceError,
};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Bbox(#[from] BboxError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("missing required option '--{0}', supply it on the command line or in the config file")]
    MissingArgument(String),
    #[error("failed serializing lookup result: {0}")]
    LookupOutput(#[from] serde_json::Error),
}
