//! Data models for the Farm Navigator platform

pub mod action;
pub mod badge;
pub mod farm;
pub mod ndvi;
pub mod photo;
pub mod plan;
pub mod simulation;
pub mod weather;

pub use action::*;
pub use badge::*;
pub use farm::*;
pub use ndvi::*;
pub use photo::*;
pub use plan::*;
pub use simulation::*;
pub use weather::*;
