//! external tools : dependency check, command runner and the adapters for the predictor and the profile search

pub mod command;
pub mod dependencies;
pub mod predictor;
pub mod search;

pub use command::*;
pub use dependencies::*;
pub use predictor::*;
pub use search::*;
