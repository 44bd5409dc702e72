//! contains utils used in parsing dirs, naming outputs and run parameters

pub mod files;
pub mod parameters;

pub use files::*;
pub use parameters::*;
