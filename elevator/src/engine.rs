use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};
use parking_lot::Mutex;

use shared_resources::config::{ElevatorConfig, TimingConfig};
use shared_resources::error::{ConfigError, DispatchError};
use shared_resources::request::RequestId;

use crate::dispatcher::Dispatcher;
use crate::modules::dispatch_loop;
use crate::utilities::elevator_status::ElevatorStatus;
use crate::utilities::floor_registry::FloorRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every request was served and nothing new arrived.
    Drained,
    /// No request arrived within the allowed idle checks.
    GaveUp,
    /// Stopped early on request; remaining passengers were abandoned.
    ShutDown,
}

impl Outcome {
    /// True when the worker stopped on its own rather than being told to.
    pub fn exited_on_its_own(self) -> bool {
        !matches!(self, Outcome::ShutDown)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub delivered: u64,
    pub floors_travelled: u64,
    pub ticks: u64,
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} delivered, {} floors travelled, {} ticks in {:.3}s",
            self.outcome,
            self.delivered,
            self.floors_travelled,
            self.ticks,
            self.elapsed.as_secs_f64(),
        )
    }
}

enum Worker {
    NotStarted,
    Running {
        shutdown_tx: Sender<()>,
        handle: JoinHandle<RunSummary>,
    },
    Finished(RunSummary),
}

/// Host-facing handle: accepts requests from any thread and owns the
/// background dispatch worker.
pub struct DispatchEngine {
    config: ElevatorConfig,
    timing: TimingConfig,
    registry: Arc<FloorRegistry>,
    status: Arc<Mutex<ElevatorStatus>>,
    worker: Mutex<Worker>,
    exited_tx: Mutex<Option<Sender<()>>>,
    exited_rx: Receiver<()>,
}

impl DispatchEngine {
    pub fn new(config: ElevatorConfig, timing: TimingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (exited_tx, exited_rx) = bounded(0);
        Ok(DispatchEngine {
            registry: Arc::new(FloorRegistry::new(config.num_floors)),
            status: Arc::new(Mutex::new(ElevatorStatus::new(config.num_floors))),
            worker: Mutex::new(Worker::NotStarted),
            exited_tx: Mutex::new(Some(exited_tx)),
            exited_rx,
            config,
            timing,
        })
    }

    pub fn config(&self) -> &ElevatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<FloorRegistry> {
        &self.registry
    }

    pub fn enqueue(&self, origin: i64, destination: i64) -> Result<RequestId, DispatchError> {
        self.registry.enqueue(origin, destination)
    }

    pub fn start(&self) -> Result<(), DispatchError> {
        let mut worker = self.worker.lock();
        if !matches!(*worker, Worker::NotStarted) {
            return Err(DispatchError::AlreadyStarted);
        }

        let (shutdown_tx, shutdown_rx) = bounded(1);
        let dispatcher = Dispatcher::new(&self.config, self.registry.clone());
        let timing = self.timing.clone();
        let status = self.status.clone();
        let exited_tx = self.exited_tx.lock().take();

        let handle = thread::Builder::new()
            .name("dispatch_loop".to_string())
            .spawn(move || {
                let summary = dispatch_loop::main(dispatcher, timing, shutdown_rx, status);
                drop(exited_tx);
                summary
            })
            .map_err(|e| DispatchError::Spawn(e.to_string()))?;

        info!(
            "Started {} dispatch: {} floors, capacity {}",
            self.config.policy, self.config.num_floors, self.config.capacity
        );
        *worker = Worker::Running { shutdown_tx, handle };
        Ok(())
    }

    /// Asks the worker to stop and waits for it. Returns whether it had
    /// already stopped on its own.
    pub fn shutdown(&self) -> Result<bool, DispatchError> {
        let mut worker = self.worker.lock();
        let summary = match std::mem::replace(&mut *worker, Worker::NotStarted) {
            Worker::NotStarted => return Err(DispatchError::NotStarted),
            Worker::Running { shutdown_tx, handle } => {
                // the worker may already be gone
                let _ = shutdown_tx.try_send(());
                join(handle)
            },
            Worker::Finished(summary) => summary,
        };
        let exited_on_its_own = summary.outcome.exited_on_its_own();
        *worker = Worker::Finished(summary);
        Ok(exited_on_its_own)
    }

    /// Blocks until the worker stops on its own (or another thread shuts it down).
    pub fn wait(&self) -> Result<RunSummary, DispatchError> {
        if matches!(*self.worker.lock(), Worker::NotStarted) {
            return Err(DispatchError::NotStarted);
        }
        // disconnects once the worker returns
        let _ = self.exited_rx.recv();

        let mut worker = self.worker.lock();
        let summary = match std::mem::replace(&mut *worker, Worker::NotStarted) {
            Worker::NotStarted => return Err(DispatchError::NotStarted),
            Worker::Running { handle, .. } => join(handle),
            Worker::Finished(summary) => summary,
        };
        *worker = Worker::Finished(summary.clone());
        Ok(summary)
    }

    /// A receiver that disconnects when the worker stops; usable in `select!`.
    pub fn exited(&self) -> Receiver<()> {
        self.exited_rx.clone()
    }

    pub fn status(&self) -> ElevatorStatus {
        let mut status = self.status.lock().clone();
        status.pending = self.registry.waiting_count();
        status.waiting = (0..self.config.num_floors)
            .map(|floor| self.registry.waiting_at(floor))
            .collect();
        status
    }
}

fn join(handle: JoinHandle<RunSummary>) -> RunSummary {
    handle.join().unwrap_or_else(|_| {
        error!("dispatch worker panicked");
        RunSummary {
            outcome: Outcome::ShutDown,
            delivered: 0,
            floors_travelled: 0,
            ticks: 0,
            elapsed: Duration::ZERO,
        }
    })
}

#[cfg(test)]
mod tests {
    use shared_resources::config::PolicyKind;

    use super::*;

    fn engine(policy: PolicyKind) -> DispatchEngine {
        DispatchEngine::new(ElevatorConfig::new(policy, 6), TimingConfig::instant()).unwrap()
    }

    #[test]
    fn lifecycle_misuse_is_reported() {
        let engine = engine(PolicyKind::Fcfs);
        assert_eq!(engine.shutdown(), Err(DispatchError::NotStarted));
        assert_eq!(engine.wait(), Err(DispatchError::NotStarted));

        engine.start().unwrap();
        assert_eq!(engine.start(), Err(DispatchError::AlreadyStarted));
        engine.shutdown().unwrap();
        assert_eq!(engine.start(), Err(DispatchError::AlreadyStarted));
    }

    #[test]
    fn requests_are_accepted_before_start() {
        let engine = engine(PolicyKind::RoundRobin);
        engine.enqueue(1, 4).unwrap();
        assert_eq!(engine.status().pending, 1);

        engine.start().unwrap();
        let summary = engine.wait().unwrap();
        assert_eq!(summary.outcome, Outcome::Drained);
        assert_eq!(summary.delivered, 1);
        assert_eq!(engine.shutdown(), Ok(true));
    }

    #[test]
    fn invalid_building_is_refused() {
        let config = ElevatorConfig::new(PolicyKind::Fcfs, 1);
        assert!(DispatchEngine::new(config, TimingConfig::instant()).is_err());
    }
}
