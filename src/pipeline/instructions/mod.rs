//! Instruction generation: model-written disposal steps with a
//! hazard-conditioned template fallback. Output for a hazardous item
//! always forbids household/public bin disposal.

pub mod contract;
pub mod generator;
pub mod prompt;
pub mod templates;

pub use contract::*;
pub use generator::*;
pub use prompt::*;
pub use templates::*;
