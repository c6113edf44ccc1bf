//! Domain layer for members: entities and registry operations

pub mod entities;
pub mod registry;
