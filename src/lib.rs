//! metabolishmm : predict proteins of a directory of genomes, search them with hmm markers
//! and summarize hits per genome and marker.
//!
//! The predictor (prodigal) and the profile search (hmmsearch) are external executables.
//! Genomes are processed in parallel, each genome runs prediction once then markers one after another.
//!
//! For genome `g` and marker `m` the output directory receives :
//! - `g.proteins.fasta`
//! - `g_m.out` the tabular output of the search
//! - `g_m_hits.fasta` the protein sequences hit by `m`
//! - `g_m_summary.txt` tab separated : hit_id, length, e_value, query_accession, query_name

pub mod errors;
pub mod hits;
pub mod pipeline;
pub mod tools;
pub mod utils;

pub use errors::PipelineError;
pub use pipeline::orchestrator::{run_pipeline, RunReport};
pub use utils::parameters::{PipelineParams, ToolParams};
