//! gene prediction on one genome, produces the protein file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;
use crate::tools::command::run_command;
use crate::utils::files::OutputLayout;
use crate::utils::parameters::ToolParams;

/// arguments for the predictor : input genome, protein output, procedure and quiet mode
pub fn predictor_args(genome: &Path, protein_file: &Path, mode: &str) -> Vec<OsString> {
    vec![
        OsString::from("-i"),
        genome.as_os_str().to_os_string(),
        OsString::from("-a"),
        protein_file.as_os_str().to_os_string(),
        OsString::from("-p"),
        OsString::from(mode),
        OsString::from("-q"),
    ]
}

/// Runs the predictor on genome in metagenomic mode, proteins go to `{genome_name}.proteins.fasta`.
/// Returns the protein file path, process failures are propagated unchanged.
pub fn predict_proteins(
    tools: &ToolParams,
    genome: &Path,
    layout: &OutputLayout,
    genome_name: &str,
) -> Result<PathBuf, PipelineError> {
    let protein_file = layout.protein_file(genome_name);
    let args = predictor_args(genome, &protein_file, tools.get_predictor_mode());
    run_command(tools.get_predictor(), &args)?;
    log::debug!("proteins of {} in {:?}", genome_name, protein_file);
    Ok(protein_file)
} // end of predict_proteins

//=========================================================================

// end of mod tests
