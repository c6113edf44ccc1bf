//! HTTP handlers for the members domain

pub mod members;
