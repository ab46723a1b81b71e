pub mod health;
pub mod skin_analysis;
pub mod medicine_analysis;
pub mod doctor;
pub mod geo;
pub mod support;
pub mod error;

pub use health::*;
pub use skin_analysis::*;
pub use medicine_analysis::*;
pub use doctor::*;
pub use geo::*;
pub use support::*;
pub use error::*;
