//! Reads "origin,destination" lines from standard input and hands them to
//! the engine. A line reading `stop` asks for an early shutdown.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver};
use log::{info, warn};

use crate::engine::DispatchEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Request { origin: i64, destination: i64 },
    Stop,
}

/// `None` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Option<Result<Input, String>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if line.eq_ignore_ascii_case("stop") {
        return Some(Ok(Input::Stop));
    }
    let Some((origin, destination)) = line.split_once(',') else {
        return Some(Err(format!("expected 'origin,destination', got '{}'", line)));
    };
    let parse = |field: &str| {
        field
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{} is not a floor number", field.trim()))
    };
    Some(parse(origin).and_then(|origin| {
        parse(destination).map(|destination| Input::Request { origin, destination })
    }))
}

/// Spawns the reader thread. The returned channel yields once per `stop`
/// line and disconnects at end of input.
pub fn init(engine: Arc<DispatchEngine>) -> io::Result<Receiver<()>> {
    let (stop_tx, stop_rx) = unbounded();
    thread::Builder::new().name("input".to_string()).spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("could not read input: {}", e);
                    break;
                },
            };
            match parse_line(&line) {
                None => (),
                Some(Ok(Input::Request { origin, destination })) => {
                    if let Err(e) = engine.enqueue(origin, destination) {
                        warn!("{}, skipping...", e);
                    }
                },
                Some(Ok(Input::Stop)) => {
                    if stop_tx.send(()).is_err() {
                        break;
                    }
                },
                Some(Err(e)) => warn!("{}, skipping...", e),
            }
        }
        info!("End of input");
    })?;
    Ok(stop_rx)
}
