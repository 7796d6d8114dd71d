//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid arguments, per-class population shortfalls, and failures while persisting
//! a sample table.
use thiserror::Error;

use crate::sampling::StratumId;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "requested {requested} sample points for {stratum} but only {available} cells are available"
    )]
    PopulationShortfall {
        stratum: StratumId,
        requested: usize,
        available: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("geojson encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("shapefile encoding error: {0}")]
    Shapefile(#[from] shapefile::Error),
}

impl Error {
    /// Returns `true` for failures raised while writing a table to disk.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Json(_) | Error::Csv(_) | Error::Shapefile(_)
        )
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
