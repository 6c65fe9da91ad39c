//! Command implementations

pub mod completions;
pub mod doctor;
pub mod flags;
