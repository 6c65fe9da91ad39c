//! Shared utilities

pub mod config;
pub mod context;
pub mod flags;
pub mod process;

pub use config::Config;
pub use context::GlobalContext;
pub use flags::split_flags;
