//! Domain layer for projects

pub mod allocation;
pub mod entities;
pub mod errors;
pub mod lifecycle;
pub mod report;
pub mod risk;
pub mod state;
