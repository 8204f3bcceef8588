use log::debug;

use crate::policies::{follow, Action, Trip};
use crate::utilities::elevator_car::ElevatorCar;
use crate::utilities::floor_registry::FloorRegistry;

/// First come, first served. Runs straight to the origin of the very first
/// request, then always heads for the destination of the earliest boarder
/// still on board. Waiting queues are only served where the car stops anyway.
#[derive(Debug, Clone, Default)]
pub struct Fcfs {
    started: bool,
    trip: Option<Trip>,
}

impl Fcfs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_action(&mut self, car: &ElevatorCar, registry: &FloorRegistry) -> Action {
        if !self.started {
            let Some(origin) = registry.first_origin() else {
                return Action::Wait;
            };
            debug!("FirstOrigin: {}", origin);
            self.started = true;
            self.trip = Some(Trip::board(origin));
        }

        if let Some(action) = follow(&mut self.trip, car.floor()) {
            return action;
        }

        if registry.has_waiting(car.floor()) && !car.is_full() {
            return Action::Board;
        }

        let next = if let Some((destination, id)) = car.manifest().earliest() {
            debug!("Next destination {} for passenger {}", destination, id);
            Trip::alight(destination)
        } else if let Some((origin, id)) = registry.earliest_waiting() {
            // car is empty: fetch whoever has waited longest
            debug!("Fetching passenger {} at floor {}", id, origin);
            Trip::board(origin)
        } else {
            return Action::Wait;
        };
        self.trip = Some(next);
        follow(&mut self.trip, car.floor()).unwrap_or(Action::Wait)
    }

    pub fn on_blocked(&mut self) {
        self.trip = None;
    }
}
