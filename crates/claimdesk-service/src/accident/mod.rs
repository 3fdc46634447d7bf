//! Accident report operations.

pub mod service;

pub use service::{AccidentInput, AccidentService, AccidentUpdate};
