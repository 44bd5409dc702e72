//! run an external process, capture its output and turn a non zero exit into an error.
//!
//! No retry and no timeout, predictor or search may run for a long time on large genomes.

use std::ffi::OsString;
use std::process::Command;

use crate::errors::PipelineError;

/// captured output of a successful command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// a command line as a single string, for logs and errors
pub fn command_line(program: &str, args: &[OsString]) -> String {
    let mut line = String::from(program);
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Spawns program with args and waits for it.
/// A process that cannot be started at all is reported as an Io error on the program name.
pub fn run_command(program: &str, args: &[OsString]) -> Result<CommandOutput, PipelineError> {
    let line = command_line(program, args);
    log::debug!("running : {}", line);
    //
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| PipelineError::io(program, e))?;
    //
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        log::error!("command failed : {}, status : {}", line, output.status);
        return Err(PipelineError::ProcessFailure {
            command: line,
            exit_code: output.status.code(),
            stderr,
        });
    }
    log::trace!("command done : {}", line);
    Ok(CommandOutput {
        stdout: output.stdout,
        stderr: output.stderr,
    })
} // end of run_command

//=========================================================================

// end of mod tests
