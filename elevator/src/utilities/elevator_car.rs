use log::{debug, info};

use shared_resources::config::ElevatorConfig;
use shared_resources::error::DispatchError;
use shared_resources::request::{Floor, Request, RequestId};

use crate::utilities::floor_registry::FloorRegistry;
use crate::utilities::manifest::Manifest;

/// The single car. Only the dispatch worker touches it, so it carries no
/// locks of its own.
#[derive(Clone, Debug)]
pub struct ElevatorCar {
    floor: Floor,
    num_floors: Floor,
    capacity: usize,
    occupancy: usize,
    manifest: Manifest,
}

impl ElevatorCar {
    pub fn new(config: &ElevatorConfig) -> Self {
        ElevatorCar {
            floor: 0,
            num_floors: config.num_floors,
            capacity: config.capacity,
            occupancy: 0,
            manifest: Manifest::new(config.num_floors),
        }
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn num_floors(&self) -> Floor {
        self.num_floors
    }

    pub fn top_floor(&self) -> Floor {
        self.num_floors.saturating_sub(1)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn occupancy(&self) -> usize {
        self.occupancy
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn is_full(&self) -> bool {
        self.occupancy >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy == 0
    }

    pub fn move_up(&mut self) -> Result<Floor, DispatchError> {
        if self.floor >= self.top_floor() {
            return Err(DispatchError::AtBoundary { floor: self.floor });
        }
        self.floor += 1;
        debug!("Floor: {}", self.floor);
        Ok(self.floor)
    }

    pub fn move_down(&mut self) -> Result<Floor, DispatchError> {
        if self.floor == 0 {
            return Err(DispatchError::AtBoundary { floor: self.floor });
        }
        self.floor -= 1;
        debug!("Floor: {}", self.floor);
        Ok(self.floor)
    }

    pub fn board(&mut self, request: Request) -> Result<(), DispatchError> {
        if self.is_full() {
            return Err(DispatchError::CapacityExceeded { capacity: self.capacity });
        }
        self.manifest.board(request);
        self.occupancy += 1;
        Ok(())
    }

    /// Everyone bound for the current floor leaves together.
    pub fn alight(&mut self) -> Vec<Request> {
        let leaving = self.manifest.take_bucket(self.floor);
        self.occupancy -= leaving.len();
        for request in &leaving {
            info!("Dropping off passenger {}, passenger count = {}", request.id, self.occupancy);
        }
        leaving
    }

    /// Boards the current floor's queue head-first until the queue empties or
    /// the car is full.
    pub fn pick_up(&mut self, registry: &FloorRegistry) -> Result<Vec<RequestId>, DispatchError> {
        if self.is_full() && registry.has_waiting(self.floor) {
            return Err(DispatchError::CapacityExceeded { capacity: self.capacity });
        }
        let mut boarded = Vec::new();
        while !self.is_full() {
            let Some(request) = registry.pop_head(self.floor) else {
                break;
            };
            self.board(request)?;
            info!("Picking up passenger {}, passenger count = {}", request.id, self.occupancy);
            boarded.push(request.id);
        }
        Ok(boarded)
    }

    /// Head of the onboard bucket for `floor`; `None` when empty or off the shaft.
    pub fn onboard_priority(&self, floor: Floor) -> Option<RequestId> {
        self.manifest.head_priority(floor)
    }
}

#[cfg(test)]
mod tests {
    use shared_resources::config::PolicyKind;

    use super::*;

    fn car(num_floors: Floor, capacity: usize) -> ElevatorCar {
        ElevatorCar::new(&ElevatorConfig::new(PolicyKind::Fcfs, num_floors).with_capacity(capacity))
    }

    #[test]
    fn moves_stop_at_both_ends() {
        let mut car = car(3, 8);
        assert_eq!(car.move_down(), Err(DispatchError::AtBoundary { floor: 0 }));
        assert_eq!(car.floor(), 0);

        assert_eq!(car.move_up(), Ok(1));
        assert_eq!(car.move_up(), Ok(2));
        assert_eq!(car.move_up(), Err(DispatchError::AtBoundary { floor: 2 }));
        assert_eq!(car.floor(), 2);
    }

    #[test]
    fn pick_up_is_fifo_and_bounded_by_capacity() {
        let registry = FloorRegistry::new(6);
        for destination in [3, 1, 5] {
            registry.enqueue(0, destination).unwrap();
        }
        let mut car = car(6, 2);

        let boarded = car.pick_up(&registry).unwrap();
        assert_eq!(boarded, vec![RequestId(1), RequestId(2)]);
        assert_eq!(car.occupancy(), 2);
        assert_eq!(car.manifest().len(), 2);
        assert_eq!(registry.peek_head_priority(0), Some(RequestId(3)));

        assert_eq!(
            car.pick_up(&registry),
            Err(DispatchError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(registry.waiting_count(), 1);
    }

    #[test]
    fn pick_up_on_an_empty_floor_is_a_no_op() {
        let registry = FloorRegistry::new(4);
        let mut car = car(4, 1);
        assert_eq!(car.pick_up(&registry), Ok(Vec::new()));
        assert!(car.is_empty());
    }

    #[test]
    fn alight_releases_the_whole_bucket() {
        let registry = FloorRegistry::new(6);
        registry.enqueue(0, 1).unwrap();
        registry.enqueue(0, 1).unwrap();
        registry.enqueue(0, 4).unwrap();
        let mut car = car(6, 8);
        car.pick_up(&registry).unwrap();

        assert!(car.alight().is_empty());
        car.move_up().unwrap();
        let leaving = car.alight();

        assert_eq!(leaving.len(), 2);
        assert_eq!(car.occupancy(), 1);
        assert_eq!(car.occupancy(), car.manifest().len());
        assert_eq!(car.onboard_priority(4), Some(RequestId(3)));
        assert_eq!(car.onboard_priority(1), None);
    }
}
