//! error type shared by all stages of the pipeline.
//!
//! Each adapter returns a `Result<_, PipelineError>`, errors are propagated with `?`
//! up to the genome task and then to the orchestrator. Nothing is retried.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// some required executables could not be found. Fatal, raised before any work.
    #[error("missing dependencies, not installed or not in your PATH : {}", .missing.join(", "))]
    MissingDependency { missing: Vec<String> },

    /// an external process exited with a non zero code (or was killed by a signal, then exit_code is None)
    #[error("command failed : {command}, exit code : {}, stderr : {stderr}", display_code(.exit_code))]
    ProcessFailure {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// malformed hit table or unreadable sequence file
    #[error("parse failure in file {path:?} : {reason}")]
    ParseFailure { path: PathBuf, reason: String },

    #[error("io error on {path:?} : {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter : {0}")]
    InvalidParameter(String),

    /// failure of one genome task, tagged with the genome name
    #[error("genome {genome} failed : {source}")]
    Genome {
        genome: String,
        #[source]
        source: Box<PipelineError>,
    },
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => String::from("none (terminated by signal)"),
    }
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PipelineError::ParseFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// returns the innermost error, looking through the genome tag
    pub fn root(&self) -> &PipelineError {
        match self {
            PipelineError::Genome { source, .. } => source.root(),
            other => other,
        }
    }
} // end of impl PipelineError

//=========================================================================

// end of mod tests
