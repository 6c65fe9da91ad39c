//! High-level operations behind the CLI commands.

pub mod doctor;
pub mod emit;

pub use doctor::{doctor, format_report, DoctorReport};
pub use emit::{render, render_section, OutputFormat};
