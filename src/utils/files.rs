//! This file contains directory exploration, input file selection and output file naming.
//!
//! Genomes and markers are taken from one directory level only, no recursion.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;

/// extension of genome files
pub const GENOME_EXTENSION: &str = "fasta";
/// extension of hmm marker files
pub const MARKER_EXTENSION: &str = "hmm";

/// returns true if path has exactly the extension ext
pub fn has_extension(path: &Path, ext: &str) -> bool {
    match path.extension() {
        Some(e) => e == ext,
        None => false,
    }
} // end of has_extension

/// returns the file stem as a String, used as namespacing key for all outputs
pub fn file_stem_string(path: &Path) -> Result<String, PipelineError> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| PipelineError::InvalidParameter(format!("no file stem in path {:?}", path)))
} // end of file_stem_string

/// collects regular files of directory dir with extension ext. Sub directories are not visited.
/// The list is sorted to get a reproducible processing order.
pub fn collect_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, PipelineError> {
    let mut files = Vec::<PathBuf>::new();
    //
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, ext) {
            log::trace!("collect_files selected {:?}", path);
            files.push(path);
        }
    }
    files.sort();
    //
    if files.is_empty() {
        log::warn!("no file with extension .{} in directory {:?}", ext, dir);
    }
    log::debug!("collect_files dir : {:?}, nb files : {}", dir, files.len());
    Ok(files)
} // end of collect_files

/// creates directory and all its parents. No error if it already exists.
pub fn create_directory(dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
    log::debug!("output directory ready : {:?}", dir);
    Ok(())
} // end of create_directory

//========================================================================

/// a genome file and its name (file stem)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genome {
    path: PathBuf,
    name: String,
}

impl Genome {
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        Ok(Genome {
            path: path.to_path_buf(),
            name: file_stem_string(path)?,
        })
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }
} // end of impl Genome

/// a hmm marker file and its name (file stem)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    path: PathBuf,
    name: String,
}

impl Marker {
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        Ok(Marker {
            path: path.to_path_buf(),
            name: file_stem_string(path)?,
        })
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }
} // end of impl Marker

/// genomes of directory dir, files with extension .fasta
pub fn discover_genomes(dir: &Path) -> Result<Vec<Genome>, PipelineError> {
    collect_files(dir, GENOME_EXTENSION)?
        .iter()
        .map(|p| Genome::from_path(p))
        .collect()
}

/// markers of directory dir, files with extension .hmm
pub fn discover_markers(dir: &Path) -> Result<Vec<Marker>, PipelineError> {
    collect_files(dir, MARKER_EXTENSION)?
        .iter()
        .map(|p| Marker::from_path(p))
        .collect()
}

//========================================================================

/// Names of all files produced in the output directory.
/// Everything derived from a genome is prefixed by the genome name.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl OutputLayout {
    pub fn new(dir: &Path) -> Self {
        OutputLayout {
            dir: dir.to_path_buf(),
        }
    }

    pub fn get_dir(&self) -> &Path {
        &self.dir
    }

    /// `{genome}.proteins.fasta`
    pub fn protein_file(&self, genome_name: &str) -> PathBuf {
        self.dir.join(format!("{}.proteins.fasta", genome_name))
    }

    /// `{genome}_{marker}.out`
    pub fn hit_table(&self, genome_name: &str, marker_name: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.out", genome_name, marker_name))
    }

    /// `{genome}_{marker}_hits.fasta`
    pub fn hits_fasta(&self, genome_name: &str, marker_name: &str) -> PathBuf {
        self.dir.join(format!("{}_{}_hits.fasta", genome_name, marker_name))
    }

    /// `{genome}_{marker}_summary.txt`
    pub fn summary(&self, genome_name: &str, marker_name: &str) -> PathBuf {
        self.dir.join(format!("{}_{}_summary.txt", genome_name, marker_name))
    }
} // end of impl OutputLayout

//========================================================================

// end of mod tests
