//! structures related to run parameters and external tools

use std::fs::OpenOptions;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;

/// name of the parameters dump in output directory
pub const PARAMETERS_DUMP: &str = "parameters.json";

/// Describes the external executables and how we call them.
/// Executables can be bare names (looked up in PATH) or paths.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolParams {
    /// gene predictor executable
    predictor: String,
    /// profile search executable
    searcher: String,
    /// predictor procedure, "meta" for metagenomic mode
    predictor_mode: String,
    /// threads used inside one search, parallelism is at genome level
    search_cpu: usize,
}

impl Default for ToolParams {
    fn default() -> Self {
        ToolParams {
            predictor: String::from("prodigal"),
            searcher: String::from("hmmsearch"),
            predictor_mode: String::from("meta"),
            search_cpu: 1,
        }
    }
} // end of default for ToolParams

impl ToolParams {
    pub fn new(predictor: &str, searcher: &str) -> Self {
        ToolParams {
            predictor: predictor.to_string(),
            searcher: searcher.to_string(),
            ..Default::default()
        }
    }

    pub fn get_predictor(&self) -> &str {
        &self.predictor
    }

    pub fn get_searcher(&self) -> &str {
        &self.searcher
    }

    pub fn get_predictor_mode(&self) -> &str {
        &self.predictor_mode
    }

    pub fn get_search_cpu(&self) -> usize {
        self.search_cpu
    }

    /// the executables that must be present before we start
    pub fn required_executables(&self) -> Vec<String> {
        vec![self.predictor.clone(), self.searcher.clone()]
    }
} // end of impl ToolParams

//=====================================================================================

/// Gathers all parameters of a run. Dumped in output directory to keep track of what was done.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineParams {
    input_dir: PathBuf,
    output_dir: PathBuf,
    markers_dir: PathBuf,
    /// number of genomes processed simultaneously
    nb_workers: usize,
    tools: ToolParams,
}

impl PipelineParams {
    pub fn new(input_dir: &Path, output_dir: &Path, markers_dir: &Path, nb_workers: usize) -> Self {
        PipelineParams {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            markers_dir: markers_dir.to_path_buf(),
            nb_workers,
            tools: ToolParams::default(),
        }
    }

    pub fn with_tools(mut self, tools: ToolParams) -> Self {
        self.tools = tools;
        self
    }

    pub fn get_input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn get_output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn get_markers_dir(&self) -> &Path {
        &self.markers_dir
    }

    pub fn get_nb_workers(&self) -> usize {
        self.nb_workers
    }

    pub fn get_tools(&self) -> &ToolParams {
        &self.tools
    }

    /// checks what can be checked before anything runs
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.nb_workers == 0 {
            return Err(PipelineError::InvalidParameter(String::from(
                "number of threads must be at least 1",
            )));
        }
        let cpus = num_cpus::get();
        if self.nb_workers > cpus {
            log::warn!(
                "nb workers asked : {} greater than nb cpus : {}",
                self.nb_workers,
                cpus
            );
        }
        Ok(())
    } // end of validate

    /// dumps parameters in file parameters.json of directory dirpath
    pub fn dump_json(&self, dirpath: &Path) -> Result<(), PipelineError> {
        let filepath = dirpath.join(PARAMETERS_DUMP);
        log::info!("dumping PipelineParams in json file : {:?}", filepath);
        //
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&filepath)
            .map_err(|e| PipelineError::io(&filepath, e))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self)
            .map_err(|e| PipelineError::io(&filepath, e.into()))?;
        Ok(())
    } // end of dump_json

    /// reload from a json dump done by dump_json
    pub fn reload_json(dirpath: &Path) -> Result<Self, PipelineError> {
        let filepath = dirpath.join(PARAMETERS_DUMP);
        log::info!("reloading PipelineParams from : {:?}", filepath);
        //
        let file = OpenOptions::new()
            .read(true)
            .open(&filepath)
            .map_err(|e| PipelineError::io(&filepath, e))?;
        let reader = BufReader::new(file);
        let params: Self = serde_json::from_reader(reader)
            .map_err(|e| PipelineError::parse(&filepath, e.to_string()))?;
        Ok(params)
    } // end of reload_json
} // end of impl PipelineParams

//=====================================================================================

// end of mod tests
