//! Runs the whole pipeline : dependency check, output directory, discovery,
//! then one genome task per genome on a pool of workers.
//!
//! The first genome failure collected is logged at once and ends the run. Genomes not yet started
//! are skipped, genomes already running are waited for (their subprocesses are not killed)
//! so their outputs are complete on disk before the failure is returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use cpu_time::ProcessTime;

use crate::errors::PipelineError;
use crate::pipeline::genome::{GenomeReport, GenomeTask};
use crate::pipeline::pool::WorkerPool;
use crate::tools::dependencies::check_dependencies;
use crate::utils::files::{create_directory, discover_genomes, discover_markers, OutputLayout};
use crate::utils::parameters::PipelineParams;

/// what a successful run did
#[derive(Clone, Debug)]
pub struct RunReport {
    pub nb_genomes: usize,
    pub nb_markers: usize,
    /// in completion order
    pub genomes: Vec<GenomeReport>,
    pub elapsed: Duration,
    pub cpu_time: Duration,
}

impl RunReport {
    pub fn nb_hits(&self) -> usize {
        self.genomes.iter().map(|g| g.nb_hits()).sum()
    }
}

/// None when the genome was skipped because the run was already aborted
type GenomeOutcome = Option<Result<GenomeReport, PipelineError>>;

// after the first failure, let running genomes finish. Queued ones skip as the run is aborted.
fn wait_in_flight(pool: &mut WorkerPool<GenomeOutcome>) {
    let mut nb_finished = 0;
    for outcome in pool.drain() {
        match outcome {
            Some(Ok(report)) => {
                nb_finished += 1;
                log::info!("genome {} completed after run abort", report.genome_name);
            }
            Some(Err(e)) => {
                nb_finished += 1;
                log::error!("{}", e);
            }
            None => {}
        }
    }
    log::info!("nb genomes in flight waited for : {}", nb_finished);
} // end of wait_in_flight

pub fn run_pipeline(params: &PipelineParams) -> Result<RunReport, PipelineError> {
    let start_t = SystemTime::now();
    let cpu_start = ProcessTime::now();
    //
    params.validate()?;
    let tools = params.get_tools();
    check_dependencies(&tools.required_executables())?;
    //
    let output_dir = params.get_output_dir();
    create_directory(output_dir)?;
    params.dump_json(output_dir)?;
    let layout = OutputLayout::new(output_dir);
    //
    let genomes = discover_genomes(params.get_input_dir())?;
    let markers = Arc::new(discover_markers(params.get_markers_dir())?);
    log::info!(
        "nb genomes : {}, nb markers : {}, nb workers : {}",
        genomes.len(),
        markers.len(),
        params.get_nb_workers()
    );
    let nb_genomes = genomes.len();
    let mut reports = Vec::<GenomeReport>::with_capacity(nb_genomes);
    //
    if nb_genomes > 0 {
        let aborted = Arc::new(AtomicBool::new(false));
        let mut pool = WorkerPool::<GenomeOutcome>::new(params.get_nb_workers())?;
        for genome in genomes {
            let mut task = GenomeTask::new(genome, Arc::clone(&markers), tools.clone(), layout.clone());
            let aborted = Arc::clone(&aborted);
            pool.submit(move || {
                if aborted.load(Ordering::Acquire) {
                    log::info!("run aborted, genome {} not started", task.get_genome().get_name());
                    return None;
                }
                let res = task.run();
                if res.is_err() {
                    aborted.store(true, Ordering::Release);
                }
                Some(res)
            });
        }
        //
        while let Some(outcome) = pool.next_completed() {
            match outcome {
                Some(Ok(report)) => reports.push(report),
                Some(Err(e)) => {
                    aborted.store(true, Ordering::Release);
                    log::error!("{}", e);
                    log::error!("stopping run, waiting for genomes in flight, nb pending : {}", pool.nb_pending());
                    wait_in_flight(&mut pool);
                    return Err(e);
                }
                None => {}
            }
        }
    }
    //
    let report = RunReport {
        nb_genomes,
        nb_markers: markers.len(),
        genomes: reports,
        elapsed: start_t.elapsed().unwrap_or_default(),
        cpu_time: cpu_start.elapsed(),
    };
    log::info!(
        "run done, nb genomes : {}, nb hits : {}, sys time(s) {:.2e} cpu time(s) {:.2e}",
        report.nb_genomes,
        report.nb_hits(),
        report.elapsed.as_secs_f64(),
        report.cpu_time.as_secs_f64()
    );
    Ok(report)
} // end of run_pipeline

//=========================================================================

// end of mod tests
