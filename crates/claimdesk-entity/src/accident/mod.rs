//! Accident report entities.

pub mod model;
pub mod status;

pub use model::{Accident, AccidentChanges, NewAccident};
pub use status::AccidentStatus;
