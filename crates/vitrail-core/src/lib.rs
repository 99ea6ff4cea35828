//! Vitrail Core
//!
//! This crate contains the foundation utilities shared by the vitrail
//! workspace: hash collections, single-assignment futures, and logging
//! initialization.

pub mod collections;
pub mod defer;
pub mod logging;
