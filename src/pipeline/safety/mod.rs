//! Hazard classification: keyword families over the analysis text plus
//! model-reported indicators, mapped to risk level, handling guidance and
//! regulatory requirements.

pub mod classifier;
pub mod guidelines;
pub mod keywords;

pub use classifier::*;
pub use guidelines::*;
pub use keywords::*;
