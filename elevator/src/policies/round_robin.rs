use log::debug;

use crate::policies::Action;
use crate::utilities::direction::Direction;
use crate::utilities::elevator_car::ElevatorCar;
use crate::utilities::floor_registry::FloorRegistry;

/// Continuous sweep between the bottom and top floor, serving whatever the
/// car meets on the way.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    direction: Direction,
}

impl Default for RoundRobin {
    fn default() -> Self {
        RoundRobin { direction: Direction::Up }
    }
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_action(&mut self, car: &ElevatorCar, registry: &FloorRegistry) -> Action {
        if registry.is_empty() && car.is_empty() {
            return Action::Wait;
        }

        let floor = car.floor();
        let top = car.top_floor();

        if car.manifest().has_bucket(floor) {
            return Action::Alight;
        }
        if registry.has_waiting(floor) && !car.is_full() {
            return Action::Board;
        }

        if floor == 0 {
            self.direction = Direction::Up;
        } else if floor == top {
            self.direction = Direction::Down;
        }

        let Some(next) = self.direction.step(floor, car.num_floors()) else {
            self.direction = self.direction.opposite();
            return Action::Turn(self.direction);
        };

        if registry.has_waiting(next) || car.manifest().has_bucket(next) {
            debug!("Passengers to pick up or drop off at floor {}", next);
            return Action::Move(self.direction);
        }
        if next == 0 || next == top {
            self.direction = self.direction.opposite();
            debug!("Changing direction to {}", self.direction.as_string());
            return Action::Turn(self.direction);
        }
        Action::Move(self.direction)
    }

    pub fn on_blocked(&mut self) {
        self.direction = self.direction.opposite();
    }
}
