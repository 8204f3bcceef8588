use std::sync::Arc;
use std::thread;

use crossbeam_channel::{never, select, tick};
use log::{info, warn};

use shared_resources::config::DispatchConfig;

use crate::engine::DispatchEngine;
use crate::utilities::debug::Debug;

pub mod dispatch_loop;
pub mod input;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // READ CONFIGURATION
    let config = DispatchConfig::get()?;
    let engine = Arc::new(DispatchEngine::new(config.elevator.clone(), config.timing.clone())?);

    // INITIALIZE INPUT MODULE
    let mut stop_rx = Some(input::init(engine.clone())?);

    // INITIALIZE DISPATCH LOOP
    engine.start()?;
    let exited_rx = engine.exited();

    // INITIALIZE DEBUG MODULE
    if config.monitor.enabled {
        let engine = engine.clone();
        let exited_rx = engine.exited();
        let refresh = tick(config.monitor.refresh);
        thread::Builder::new().name("monitor".to_string()).spawn(move || {
            let mut debug = Debug::new(engine.config().num_floors);
            loop {
                if let Err(e) = debug.printstatus(&engine.status()) {
                    warn!("could not draw status: {}", e);
                    return;
                }
                select! {
                    recv(refresh) -> _ => (),
                    recv(exited_rx) -> _ => {
                        let _ = debug.printstatus(&engine.status());
                        return;
                    },
                }
            }
        })?;
    }

    loop {
        let stop = stop_rx.clone().unwrap_or_else(never);
        select! {
            recv(stop) -> msg => match msg {
                Ok(()) => {
                    info!("STOPPING PROGRAM...");
                    if engine.shutdown()? {
                        info!("Dispatch loop had already drained");
                    }
                    break;
                },
                // end of input: keep serving whoever is still in the building
                Err(_) => stop_rx = None,
            },
            recv(exited_rx) -> _ => break,
        }
    }

    let summary = engine.wait()?;
    info!("Done: {}", summary);
    Ok(())
}
