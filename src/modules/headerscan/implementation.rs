use std::{
    panic::{
        self,
        AssertUnwindSafe
    },
    sync::Arc,
    thread::{
        self,
        sleep
    },
    time::{
        Duration,
        Instant
    }
};

use concurrent_queue::PopError;

use crate::utils::{
    bags::{
        OutcomeKind,
        ProbeOutcome,
        WorkItem
    },
    config::ScanConfiguration,
    constants::QUEUE_IDLE_WAIT,
    errors::ScanError,
    queue::QueueManager,
    traits::Prober
};

/// Tally of a finished scan. `matches` keeps arrival order.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub total: usize,
    pub matches: Vec<ProbeOutcome>,
    pub unmatched: usize,
    pub failed: usize,
    pub elapsed: Duration
}

pub struct HScanner<P: Prober> {
    config: ScanConfiguration,
    prober: Arc<P>
}

impl<P: Prober + 'static> HScanner<P> {
    pub fn new(config: ScanConfiguration,prober: P) -> HScanner<P> {
        HScanner {
            config,
            prober: Arc::new(prober)
        }
    }

    /// Probes every target once and returns when exactly one outcome per
    /// target was collected. `on_progress` receives the completed count.
    pub fn run<F: FnMut(usize)>(&self,targets: &[String],on_progress: F) -> Result<ScanReport,ScanError> {
        let start_time = Instant::now();

        if targets.is_empty() {
            crate::LOGNOTICE!("No targets to scan");
            return Ok(ScanReport::default());
        }

        // Both queues hold every target so neither side ever waits for room
        let work_queue: Arc<QueueManager<WorkItem>> = Arc::new(QueueManager::with_capacity(targets.len()));
        let result_queue: Arc<QueueManager<ProbeOutcome>> = Arc::new(QueueManager::with_capacity(targets.len()));

        // More threads than targets would only sit idle
        let worker_count = self.config.worker_count.min(targets.len());
        crate::LOGINFO!("Starting {} workers for {} targets",worker_count,targets.len());
        let handlers = spawn_workers(worker_count,&self.prober,&work_queue,&result_queue)?;

        let dispatched = match dispatch(targets,&self.config,&work_queue) {
            Ok(count) => count,
            Err(e) => {
                work_queue.close();
                join_workers(handlers);
                return Err(e);
            }
        };

        let collected = collect(dispatched,&result_queue,&handlers,on_progress);

        join_workers(handlers);

        let mut report = collected?;
        report.elapsed = start_time.elapsed();
        Ok(report)
    }
}

/// Enqueues one work item per target in input order, then closes the queue so
/// workers stop once it is drained. Returns the number of dispatched items.
pub fn dispatch(targets: &[String],config: &ScanConfiguration,work_queue: &QueueManager<WorkItem>) -> Result<usize,ScanError> {
    let mut dispatched = 0;
    for target in targets {
        work_queue.push(config.work_item(target))?;
        dispatched += 1;
    }
    work_queue.close();
    crate::LOGDEBUG!("Dispatched {} targets",dispatched);
    Ok(dispatched)
}

/// Starts `worker_count` named worker threads. When the OS refuses a thread the
/// job queue is closed and the workers already started are joined before the
/// error is returned.
pub fn spawn_workers<P: Prober + 'static>(
    worker_count: usize,
    prober: &Arc<P>,
    work_queue: &Arc<QueueManager<WorkItem>>,
    result_queue: &Arc<QueueManager<ProbeOutcome>>
) -> Result<Vec<(usize,thread::JoinHandle<()>)>,ScanError> {
    spawn_workers_with(worker_count,prober,work_queue,result_queue,worker_builder)
}

fn worker_builder(worker_id: usize) -> thread::Builder {
    thread::Builder::new().name(format!("worker-{worker_id}"))
}

fn spawn_workers_with<P: Prober + 'static>(
    worker_count: usize,
    prober: &Arc<P>,
    work_queue: &Arc<QueueManager<WorkItem>>,
    result_queue: &Arc<QueueManager<ProbeOutcome>>,
    builder: fn(usize) -> thread::Builder
) -> Result<Vec<(usize,thread::JoinHandle<()>)>,ScanError> {
    let mut handlers: Vec<(usize,thread::JoinHandle<()>)> = Vec::with_capacity(worker_count);
    for worker_id in 1..=worker_count {
        let shared_prober = Arc::clone(prober);
        let shared_work = Arc::clone(work_queue);
        let shared_results = Arc::clone(result_queue);
        let spawned = builder(worker_id).spawn(move || {
            worker_loop(worker_id,shared_prober.as_ref(),&shared_work,&shared_results);
        });
        match spawned {
            Ok(handle) => handlers.push((worker_id,handle)),
            Err(source) => {
                crate::LOGERROR!("Unable to start worker thread {} due to {}",worker_id,source);
                work_queue.close();
                join_workers(handlers);
                return Err(ScanError::WorkerSpawn { worker_id, source });
            }
        }
    }
    Ok(handlers)
}

fn worker_loop<P: Prober>(worker_id: usize,prober: &P,work_queue: &QueueManager<WorkItem>,result_queue: &QueueManager<ProbeOutcome>) {
    loop {
        let item = match work_queue.pop() {
            Ok(valid_item) => valid_item,
            Err(PopError::Empty) => {
                sleep(QUEUE_IDLE_WAIT);
                continue;
            }
            Err(PopError::Closed) => break,
        };

        // A panicking probe still has to produce its outcome
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| prober.probe(&item))) {
            Ok(outcome) => outcome,
            Err(_) => {
                crate::LOGERROR!("Worker {} crashed while probing {}",worker_id,item.url);
                ProbeOutcome::failed(&item.url,String::from("probe panicked"))
            }
        };

        if let Err(e) = result_queue.push(outcome) {
            crate::LOGERROR!("Worker {} lost the result of {} due to {}",worker_id,item.url,e);
        }
    }
    crate::LOGTRACE!("Worker {} found the job queue drained",worker_id);
}

/// Drains exactly `total` outcomes. Matches are kept in arrival order, every
/// drained outcome advances the progress count by one.
pub fn collect<F: FnMut(usize)>(
    total: usize,
    result_queue: &QueueManager<ProbeOutcome>,
    handlers: &[(usize,thread::JoinHandle<()>)],
    mut on_progress: F
) -> Result<ScanReport,ScanError> {
    let mut report = ScanReport {
        total,
        ..ScanReport::default()
    };
    let mut drained = 0;

    while drained < total {
        let outcome = match result_queue.pop() {
            Ok(outcome) => outcome,
            Err(_) => {
                // Workers only exit on a drained job queue, so missing results
                // after every worker is gone will never arrive
                if handlers.iter().all(|(_,handle)| handle.is_finished()) && result_queue.is_empty() {
                    return Err(ScanError::WorkerLost { drained, expected: total });
                }
                sleep(QUEUE_IDLE_WAIT);
                continue;
            }
        };

        drained += 1;
        on_progress(drained);

        match outcome.kind {
            OutcomeKind::Matched => {
                crate::LOGALERT!(kvl: &outcome.to_kvl(),"MATCH FOUND");
                report.matches.push(outcome);
            }
            OutcomeKind::NoMatch | OutcomeKind::HeaderMissing => {
                report.unmatched += 1;
            }
            OutcomeKind::RequestFailed(_) => {
                crate::LOGDEBUG!(kvl: &outcome.to_kvl(),"Target failed");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn join_workers(handlers: Vec<(usize,thread::JoinHandle<()>)>) {
    for (worker_id,handle) in handlers {
        match handle.join() {
            Ok(_) => {
                crate::LOGTRACE!("Worker thread {} successfully ended",worker_id);
            }
            Err(e) => {
                crate::LOGERROR!("Error ending worker thread {} due to {:?}",worker_id,e);
            }
        }
    }
}
