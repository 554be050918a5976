//! Error types for the Tdmaze engine

use thiserror::Error;

use crate::map::MapError;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
