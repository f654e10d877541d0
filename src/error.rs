//! Error types for the storage and rendering core.
//!
//! An unknown city is never an error: lookups return `None` and
//! `add_favorite` returns `false`. Everything here is fatal to the call that
//! raised it and is not retried.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CityMapError {
    #[error("database {} is unavailable: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("point {label:?} has neither `lon` nor `lng`")]
    MissingLongitude { label: String },

    #[error("failed to load basemap {}: {reason}", path.display())]
    Basemap { path: PathBuf, reason: String },

    #[error("failed to render map: {0}")]
    Render(String),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CityMapError>;
