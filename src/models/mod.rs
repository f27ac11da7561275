pub mod enums;
pub mod material;
pub mod safety;
pub mod compliance;
pub mod instructions;
pub mod facility;
pub mod result;

pub use enums::*;
pub use material::*;
pub use safety::*;
pub use compliance::*;
pub use instructions::*;
pub use facility::*;
pub use result::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
