use std::sync::Arc;

use log::{debug, warn};

use shared_resources::config::ElevatorConfig;
use shared_resources::error::DispatchError;
use shared_resources::request::{Floor, Request, RequestId};

use crate::policies::{Action, DispatchPolicy};
use crate::utilities::direction::Direction;
use crate::utilities::elevator_car::ElevatorCar;
use crate::utilities::elevator_status::{Behaviour, ElevatorStatus};
use crate::utilities::floor_registry::FloorRegistry;

/// What a single decision tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Moved(Floor),
    Turned(Direction),
    Boarded(Vec<RequestId>),
    Alighted(Vec<Request>),
    Idle,
    /// The car refused the action; the policy has been told to re-decide.
    Blocked(DispatchError),
}

/// The dispatch core: one car, the shared waiting queues and the active
/// policy, advanced one tick at a time.
pub struct Dispatcher {
    registry: Arc<FloorRegistry>,
    car: ElevatorCar,
    policy: DispatchPolicy,
    behaviour: Behaviour,
    delivered: u64,
    floors_travelled: u64,
    ticks: u64,
}

impl Dispatcher {
    pub fn new(config: &ElevatorConfig, registry: Arc<FloorRegistry>) -> Self {
        Dispatcher {
            registry,
            car: ElevatorCar::new(config),
            policy: DispatchPolicy::new(config.policy),
            behaviour: Behaviour::Idle,
            delivered: 0,
            floors_travelled: 0,
            ticks: 0,
        }
    }

    pub fn step(&mut self) -> Tick {
        self.ticks += 1;
        let action = self.policy.next_action(&self.car, &self.registry);
        debug!("Floor {}: {:?}", self.car.floor(), action);

        let tick = match action {
            Action::Move(direction) => {
                let moved = match direction {
                    Direction::Up => self.car.move_up(),
                    Direction::Down => self.car.move_down(),
                };
                match moved {
                    Ok(floor) => {
                        self.floors_travelled += 1;
                        Tick::Moved(floor)
                    },
                    Err(e) => self.blocked(e),
                }
            },
            Action::Turn(direction) => Tick::Turned(direction),
            Action::Board => match self.car.pick_up(&self.registry) {
                Ok(boarded) => Tick::Boarded(boarded),
                Err(e) => self.blocked(e),
            },
            Action::Alight => {
                let leaving = self.car.alight();
                self.delivered += leaving.len() as u64;
                Tick::Alighted(leaving)
            },
            Action::Wait => Tick::Idle,
        };

        self.behaviour = match &tick {
            Tick::Moved(_) | Tick::Turned(_) | Tick::Blocked(_) => Behaviour::Traveling,
            Tick::Boarded(_) => Behaviour::Boarding,
            Tick::Alighted(_) => Behaviour::Alighting,
            Tick::Idle => Behaviour::Idle,
        };
        tick
    }

    fn blocked(&mut self, e: DispatchError) -> Tick {
        warn!("{}", e);
        self.policy.on_blocked();
        Tick::Blocked(e)
    }

    /// No one waiting and no one on board.
    pub fn is_drained(&self) -> bool {
        self.registry.is_empty() && self.car.is_empty()
    }

    pub fn mark_drained(&mut self) {
        self.behaviour = Behaviour::Drained;
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus::capture(&self.car, &self.registry, self.behaviour)
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn car(&self) -> &ElevatorCar {
        &self.car
    }

    pub fn registry(&self) -> &Arc<FloorRegistry> {
        &self.registry
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    pub fn floors_travelled(&self) -> u64 {
        self.floors_travelled
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use shared_resources::config::PolicyKind;

    use super::*;

    fn dispatcher(policy: PolicyKind, num_floors: Floor) -> Dispatcher {
        let config = ElevatorConfig::new(policy, num_floors);
        Dispatcher::new(&config, Arc::new(FloorRegistry::new(num_floors)))
    }

    #[test]
    fn empty_building_is_idle_not_an_error() {
        for kind in PolicyKind::iter() {
            let mut dispatcher = dispatcher(kind, 4);
            assert_eq!(dispatcher.step(), Tick::Idle);
            assert!(dispatcher.is_drained());
            assert_eq!(dispatcher.behaviour(), Behaviour::Idle);
        }
    }

    #[test]
    fn status_tracks_the_car() {
        let mut dispatcher = dispatcher(PolicyKind::Fcfs, 4);
        dispatcher.registry().enqueue(1, 3).unwrap();

        assert_eq!(dispatcher.step(), Tick::Moved(1));
        let status = dispatcher.status();
        assert_eq!(status.floor, 1);
        assert_eq!(status.pending, 1);
        assert_eq!(status.waiting, vec![0, 1, 0, 0]);
        assert_eq!(status.behaviour, Behaviour::Traveling);

        assert_eq!(dispatcher.step(), Tick::Boarded(vec![RequestId(1)]));
        let status = dispatcher.status();
        assert_eq!((status.occupancy, status.pending), (1, 0));
        assert_eq!(status.onboard, vec![0, 0, 0, 1]);
        assert_eq!(status.behaviour, Behaviour::Boarding);
        assert_eq!(status, dispatcher.status());
    }

    #[test]
    fn counts_deliveries_and_travel() {
        let mut dispatcher = dispatcher(PolicyKind::NearestFirst, 5);
        dispatcher.registry().enqueue(0, 4).unwrap();
        while !dispatcher.is_drained() {
            dispatcher.step();
        }
        assert_eq!(dispatcher.delivered(), 1);
        assert_eq!(dispatcher.floors_travelled(), 4);
        assert_eq!(dispatcher.ticks(), 6);
    }
}
