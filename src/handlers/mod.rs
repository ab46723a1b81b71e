pub mod health;
pub mod upload;
pub mod analyze_skin;
pub mod analyze_medicine;
pub mod doctor_search;
pub mod geo;
pub mod support;

pub use health::*;
pub use analyze_skin::*;
pub use analyze_medicine::*;
pub use doctor_search::*;
pub use geo::*;
pub use support::*;
