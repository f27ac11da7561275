pub mod catalog;
pub mod geo;
pub mod matcher;

pub use catalog::*;
pub use geo::*;
pub use matcher::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Cannot read facility catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid facility catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
