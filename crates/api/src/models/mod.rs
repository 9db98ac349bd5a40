pub mod asset;
pub mod observation;
pub mod outcome;
pub mod stats;

pub use asset::*;
pub use observation::*;
pub use outcome::*;
pub use stats::*;
