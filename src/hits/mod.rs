//! hit table parsing and hit summaries

pub mod summary;
pub mod tblout;

pub use summary::*;
pub use tblout::*;
