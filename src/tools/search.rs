//! profile search of one marker against the proteins of one genome.
//!
//! The search runs with one cpu, genomes are what we parallelize.
//! The hit table is parsed and summarized as soon as the search succeeds.

use std::ffi::OsString;
use std::path::Path;

use crate::errors::PipelineError;
use crate::hits::summary::{summarize_hits, MarkerSummary};
use crate::tools::command::run_command;
use crate::utils::files::{Marker, OutputLayout};
use crate::utils::parameters::ToolParams;

/// tabular output, curated cutoffs of the model, cpu count, then model and query
pub fn search_args(table: &Path, marker: &Path, protein_file: &Path, cpu: usize) -> Vec<OsString> {
    vec![
        OsString::from("--tblout"),
        table.as_os_str().to_os_string(),
        OsString::from("--cut_tc"),
        OsString::from("--cpu"),
        OsString::from(cpu.to_string()),
        marker.as_os_str().to_os_string(),
        protein_file.as_os_str().to_os_string(),
    ]
}

/// Searches marker in protein_file, writes `{genome}_{marker}.out` then parses it.
pub fn search_marker(
    tools: &ToolParams,
    protein_file: &Path,
    marker: &Marker,
    layout: &OutputLayout,
    genome_name: &str,
) -> Result<MarkerSummary, PipelineError> {
    let table = layout.hit_table(genome_name, marker.get_name());
    let args = search_args(&table, marker.get_path(), protein_file, tools.get_search_cpu());
    run_command(tools.get_searcher(), &args)?;
    //
    summarize_hits(&table, protein_file, layout, genome_name, marker.get_name())
} // end of search_marker

//=========================================================================

// end of mod tests
