use log::debug;

use crate::policies::{follow, nearest_by_priority, Action, Trip};
use crate::utilities::elevator_car::ElevatorCar;
use crate::utilities::floor_registry::FloorRegistry;

/// Shortest distance first. An empty car goes to the closest waiting
/// passenger; a loaded car goes to the closest onboard destination. Equal
/// distances go to the earlier arrival.
#[derive(Debug, Clone, Default)]
pub struct NearestFirst {
    trip: Option<Trip>,
}

impl NearestFirst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_action(&mut self, car: &ElevatorCar, registry: &FloorRegistry) -> Action {
        if let Some(action) = follow(&mut self.trip, car.floor()) {
            return action;
        }

        let floor = car.floor();
        if car.manifest().has_bucket(floor) {
            return Action::Alight;
        }
        if registry.has_waiting(floor) && !car.is_full() {
            return Action::Board;
        }

        let next = if car.is_empty() {
            nearest_by_priority(floor, car.num_floors(), |f| registry.peek_head_priority(f))
                .map(Trip::board)
        } else {
            nearest_by_priority(floor, car.num_floors(), |f| car.onboard_priority(f))
                .map(Trip::alight)
        };
        let Some(next) = next else {
            return Action::Wait;
        };

        debug!("Closest stop: {:?}", next);
        self.trip = Some(next);
        follow(&mut self.trip, floor).unwrap_or(Action::Wait)
    }

    pub fn on_blocked(&mut self) {
        self.trip = None;
    }
}

#[cfg(test)]
mod tests {
    use shared_resources::config::{ElevatorConfig, PolicyKind};

    use super::*;
    use crate::utilities::direction::Direction;

    fn car_at(floor: u8) -> ElevatorCar {
        let mut car = ElevatorCar::new(&ElevatorConfig::new(PolicyKind::NearestFirst, 6));
        for _ in 0..floor {
            car.move_up().unwrap();
        }
        car
    }

    #[test]
    fn equal_distance_goes_to_the_earlier_arrival() {
        let registry = FloorRegistry::new(6);
        registry.enqueue(0, 3).unwrap();
        registry.enqueue(4, 1).unwrap();
        let mut car = car_at(2);
        let mut policy = NearestFirst::new();

        assert_eq!(policy.next_action(&car, &registry), Action::Move(Direction::Down));
        car.move_down().unwrap();
        assert_eq!(policy.next_action(&car, &registry), Action::Move(Direction::Down));
        car.move_down().unwrap();
        assert_eq!(policy.next_action(&car, &registry), Action::Board);
    }

    #[test]
    fn loaded_car_heads_for_the_closest_destination() {
        let registry = FloorRegistry::new(6);
        registry.enqueue(2, 5).unwrap();
        registry.enqueue(2, 1).unwrap();
        let mut car = car_at(2);
        car.pick_up(&registry).unwrap();
        let mut policy = NearestFirst::new();

        assert_eq!(policy.next_action(&car, &registry), Action::Move(Direction::Down));
        car.move_down().unwrap();
        assert_eq!(policy.next_action(&car, &registry), Action::Alight);
    }

    #[test]
    fn commits_to_a_trip_once_chosen() {
        let registry = FloorRegistry::new(6);
        registry.enqueue(5, 0).unwrap();
        let mut car = car_at(2);
        let mut policy = NearestFirst::new();

        assert_eq!(policy.next_action(&car, &registry), Action::Move(Direction::Up));
        car.move_up().unwrap();
        // a closer passenger appears behind the car mid-trip
        registry.enqueue(2, 4).unwrap();
        assert_eq!(policy.next_action(&car, &registry), Action::Move(Direction::Up));
    }
}
