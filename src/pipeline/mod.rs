//! genome tasks and their dispatch on a worker pool

pub mod genome;
pub mod orchestrator;
pub mod pool;

pub use genome::*;
pub use orchestrator::*;
pub use pool::*;
