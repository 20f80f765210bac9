//! Shared types and models for the Farm Navigator platform
//!
//! This crate contains the data model, boundary validation, and the pure
//! daily simulation engine shared between the backend and the WASM module.

pub mod models;
pub mod simulation;
pub mod types;
pub mod validation;

pub use models::*;
pub use simulation::run_simulation;
pub use types::*;
pub use validation::*;
