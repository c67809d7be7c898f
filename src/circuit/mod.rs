mod error;
mod unit;
mod ladder;
mod senseamp;
mod multilevel;

pub use error::*;
pub use unit::*;
pub use ladder::*;
pub use senseamp::*;
pub use multilevel::*;
