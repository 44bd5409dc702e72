//! The unit of parallel work : one genome, predicted once, then searched marker after marker.
//!
//! States go Pending -> Predicting -> SearchingMarker(0) -> Parsed(0) -> SearchingMarker(1) ... -> Done.
//! The first failure moves to Failed and the remaining markers are not searched.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::errors::PipelineError;
use crate::hits::summary::MarkerSummary;
use crate::tools::predictor::predict_proteins;
use crate::tools::search::search_marker;
use crate::utils::files::{Genome, Marker, OutputLayout};
use crate::utils::parameters::ToolParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Predicting,
    /// searching marker of rank i in marker list
    SearchingMarker(usize),
    /// marker of rank i searched and its hits summarized
    Parsed(usize),
    Done,
    Failed,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Pending => write!(f, "pending"),
            TaskState::Predicting => write!(f, "predicting"),
            TaskState::SearchingMarker(i) => write!(f, "searching marker {}", i),
            TaskState::Parsed(i) => write!(f, "parsed marker {}", i),
            TaskState::Done => write!(f, "done"),
            TaskState::Failed => write!(f, "failed"),
        }
    }
}

/// result of a successful genome task
#[derive(Clone, Debug)]
pub struct GenomeReport {
    pub genome_name: String,
    /// number of predicted proteins, None if we could not count them
    pub nb_proteins: Option<usize>,
    /// one entry per marker, in marker order
    pub markers: Vec<MarkerSummary>,
}

impl GenomeReport {
    pub fn nb_hits(&self) -> usize {
        self.markers.iter().map(|m| m.nb_hits).sum()
    }
}

/// counts records of the protein file, only for logs
fn count_proteins(path: &Path) -> Option<usize> {
    let mut reader = match needletail::parse_fastx_file(path) {
        Ok(reader) => reader,
        Err(e) => {
            log::warn!("cannot count proteins in {:?} : {}", path, e);
            return None;
        }
    };
    let mut nb_record = 0;
    while let Some(record) = reader.next() {
        if let Err(e) = record {
            log::warn!("bad record in {:?}, record num {} : {}", path, nb_record, e);
            return None;
        }
        nb_record += 1;
    }
    Some(nb_record)
} // end of count_proteins

/// All a task needs is owned here, so a task can be moved to any worker.
pub struct GenomeTask {
    genome: Genome,
    markers: Arc<Vec<Marker>>,
    tools: ToolParams,
    layout: OutputLayout,
    state: TaskState,
}

impl GenomeTask {
    pub fn new(genome: Genome, markers: Arc<Vec<Marker>>, tools: ToolParams, layout: OutputLayout) -> Self {
        GenomeTask {
            genome,
            markers,
            tools,
            layout,
            state: TaskState::Pending,
        }
    }

    pub fn get_state(&self) -> TaskState {
        self.state
    }

    pub fn get_genome(&self) -> &Genome {
        &self.genome
    }

    fn transition(&mut self, next: TaskState) {
        log::trace!("genome {} : {} -> {}", self.genome.get_name(), self.state, next);
        self.state = next;
    }

    /// Runs prediction then all markers sequentially. Errors are tagged with the genome name.
    pub fn run(&mut self) -> Result<GenomeReport, PipelineError> {
        log::info!("genome {} : starting", self.genome.get_name());
        match self.run_steps() {
            Ok(report) => {
                self.transition(TaskState::Done);
                log::info!(
                    "genome {} : done, nb markers {}, nb hits {}",
                    report.genome_name,
                    report.markers.len(),
                    report.nb_hits()
                );
                Ok(report)
            }
            Err(e) => {
                let failed_in = self.state;
                self.transition(TaskState::Failed);
                log::error!("genome {} failed while {} : {}", self.genome.get_name(), failed_in, e);
                Err(PipelineError::Genome {
                    genome: self.genome.get_name().to_string(),
                    source: Box::new(e),
                })
            }
        }
    } // end of run

    fn run_steps(&mut self) -> Result<GenomeReport, PipelineError> {
        let genome_name = self.genome.get_name().to_string();
        //
        self.transition(TaskState::Predicting);
        let protein_file = predict_proteins(&self.tools, self.genome.get_path(), &self.layout, &genome_name)?;
        let nb_proteins = count_proteins(&protein_file);
        log::debug!("genome {} : nb predicted proteins {:?}", genome_name, nb_proteins);
        //
        let markers = Arc::clone(&self.markers);
        let mut summaries = Vec::<MarkerSummary>::with_capacity(markers.len());
        for (rank, marker) in markers.iter().enumerate() {
            self.transition(TaskState::SearchingMarker(rank));
            let summary = search_marker(&self.tools, &protein_file, marker, &self.layout, &genome_name)?;
            self.transition(TaskState::Parsed(rank));
            summaries.push(summary);
        }
        //
        Ok(GenomeReport {
            genome_name,
            nb_proteins,
            markers: summaries,
        })
    } // end of run_steps
} // end of impl GenomeTask

//=========================================================================

// end of mod tests
