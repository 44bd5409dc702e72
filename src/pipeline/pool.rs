//! A fixed size pool of workers with submit / await completion semantics.
//!
//! Jobs are run on a rayon thread pool, results come back through a crossbeam channel
//! in completion order. Jobs must own their inputs ('static), nothing mutable is shared between them.
//!
//! Dropping the pool does not cancel anything, nor wait : jobs already submitted still run
//! on detached threads, it is up to the jobs to check some flag if they must be skipped.
//! A caller that stops collecting early must call [WorkerPool::drain] before the process exits.

use crossbeam_channel::{Receiver, Sender};

use crate::errors::PipelineError;

pub struct WorkerPool<T: Send + 'static> {
    pool: rayon::ThreadPool,
    sender: Sender<T>,
    receiver: Receiver<T>,
    nb_submitted: usize,
    nb_collected: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// a pool of exactly nb_workers threads
    pub fn new(nb_workers: usize) -> Result<Self, PipelineError> {
        if nb_workers == 0 {
            return Err(PipelineError::InvalidParameter(String::from(
                "worker pool needs at least one worker",
            )));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nb_workers)
            .thread_name(|i| format!("genome-worker-{}", i))
            .build()
            .map_err(|e| PipelineError::InvalidParameter(format!("cannot build thread pool : {}", e)))?;
        log::info!("nb threads in pool : {:?}", pool.current_num_threads());
        let (sender, receiver) = crossbeam_channel::unbounded::<T>();
        Ok(WorkerPool {
            pool,
            sender,
            receiver,
            nb_submitted: 0,
            nb_collected: 0,
        })
    } // end of new

    pub fn get_nb_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// queues job, it runs as soon as a worker is free
    pub fn submit<F>(&mut self, job: F)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let sender = self.sender.clone();
        self.pool.spawn(move || {
            let res = job();
            // receiver may be gone if the caller stopped collecting
            let _ = sender.send(res);
        });
        self.nb_submitted += 1;
    } // end of submit

    /// number of submitted jobs not yet collected
    pub fn nb_pending(&self) -> usize {
        self.nb_submitted - self.nb_collected
    }

    /// blocks until some job completes and returns its result.
    /// Returns None when all submitted jobs have been collected.
    pub fn next_completed(&mut self) -> Option<T> {
        if self.nb_pending() == 0 {
            return None;
        }
        match self.receiver.recv() {
            Ok(res) => {
                self.nb_collected += 1;
                Some(res)
            }
            Err(_) => None,
        }
    } // end of next_completed

    /// blocks until every submitted job not yet collected has completed.
    /// Returns their results in completion order.
    pub fn drain(&mut self) -> Vec<T> {
        let mut remaining = Vec::with_capacity(self.nb_pending());
        while let Some(res) = self.next_completed() {
            remaining.push(res);
        }
        remaining
    } // end of drain
} // end of impl WorkerPool

//=========================================================================

// end of mod tests
