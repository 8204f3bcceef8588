//! Background worker driving the dispatcher one tick at a time. It waits
//! for the first arrival, runs until the building is empty, and checks
//! for a shutdown request once per tick.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::{select, Receiver, TryRecvError};
use log::{debug, info};
use parking_lot::Mutex;

use shared_resources::config::TimingConfig;

use crate::dispatcher::{Dispatcher, Tick};
use crate::engine::{Outcome, RunSummary};
use crate::utilities::elevator_status::ElevatorStatus;

enum Wake {
    Shutdown,
    Arrival,
    Timeout,
}

fn idle_wait(timing: &TimingConfig, shutdown_rx: &Receiver<()>, arrival_rx: &Receiver<()>) -> Wake {
    select! {
        recv(shutdown_rx) -> _ => Wake::Shutdown,
        recv(arrival_rx) -> _ => Wake::Arrival,
        default(timing.idle_tick) => Wake::Timeout,
    }
}

fn shutdown_requested(shutdown_rx: &Receiver<()>) -> bool {
    // a dropped sender means the engine is gone
    !matches!(shutdown_rx.try_recv(), Err(TryRecvError::Empty))
}

pub fn main(
    mut dispatcher: Dispatcher,
    timing: TimingConfig,
    shutdown_rx: Receiver<()>,
    status: Arc<Mutex<ElevatorStatus>>,
) -> RunSummary {
    let started = Instant::now();
    let arrival_rx = dispatcher.registry().arrivals();

    let finish = |dispatcher: &mut Dispatcher, outcome: Outcome| {
        dispatcher.mark_drained();
        *status.lock() = dispatcher.status();
        let summary = RunSummary {
            outcome,
            delivered: dispatcher.delivered(),
            floors_travelled: dispatcher.floors_travelled(),
            ticks: dispatcher.ticks(),
            elapsed: started.elapsed(),
        };
        info!("{}", summary);
        summary
    };

    // WAIT FOR FIRST PASSENGER
    let mut idle_checks = 0;
    while dispatcher.registry().first_origin().is_none() {
        if idle_checks >= timing.max_idle_checks {
            info!("No passengers after {} checks, giving up", idle_checks);
            return finish(&mut dispatcher, Outcome::GaveUp);
        }
        debug!("Waiting for passengers!");
        match idle_wait(&timing, &shutdown_rx, &arrival_rx) {
            Wake::Shutdown => return finish(&mut dispatcher, Outcome::ShutDown),
            Wake::Arrival => (),
            Wake::Timeout => idle_checks += 1,
        }
    }
    info!("FirstOrigin: {:?}", dispatcher.registry().first_origin());

    // MAIN LOOP
    let mut grace_ticks = 0;
    loop {
        if shutdown_requested(&shutdown_rx) {
            return finish(&mut dispatcher, Outcome::ShutDown);
        }

        if dispatcher.is_drained() {
            if grace_ticks >= timing.drain_grace_ticks {
                return finish(&mut dispatcher, Outcome::Drained);
            }
            grace_ticks += 1;
            debug!("Sleeping while waiting for passengers");
            // stale wake-ups from requests already served
            arrival_rx.try_iter().for_each(drop);
            if let Wake::Shutdown = idle_wait(&timing, &shutdown_rx, &arrival_rx) {
                return finish(&mut dispatcher, Outcome::ShutDown);
            }
            continue;
        }
        grace_ticks = 0;

        let tick = dispatcher.step();
        *status.lock() = dispatcher.status();

        match tick {
            Tick::Moved(_) => thread::sleep(timing.travel_time),
            Tick::Idle => {
                if let Wake::Shutdown = idle_wait(&timing, &shutdown_rx, &arrival_rx) {
                    return finish(&mut dispatcher, Outcome::ShutDown);
                }
            },
            Tick::Turned(_) | Tick::Boarded(_) | Tick::Alighted(_) | Tick::Blocked(_) => (),
        }
    }
}
