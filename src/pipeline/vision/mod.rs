pub mod classifier;
pub mod heuristic;
pub mod templates;

pub use classifier::*;
pub use heuristic::*;
pub use templates::*;

use thiserror::Error;

use crate::pipeline::llm::LlmError;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Image could not be decoded: {0}")]
    UndecodableImage(String),

    /// Only surfaced in strict mode; otherwise the colour heuristic answers.
    #[error("Vision model failed: {0}")]
    PrimaryFailed(#[from] LlmError),
}
