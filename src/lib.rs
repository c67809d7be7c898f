pub mod tech;
pub mod fit;
pub mod circuit;
pub mod error;
pub use error::*;

pub use derive_new;
