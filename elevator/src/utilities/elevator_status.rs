use shared_resources::request::Floor;

use crate::utilities::elevator_car::ElevatorCar;
use crate::utilities::floor_registry::FloorRegistry;

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Behaviour {
    Idle,
    Traveling,
    Boarding,
    Alighting,
    Drained,
}

impl Behaviour {
    pub fn as_string(&self) -> String {
        match self {
            Behaviour::Idle => String::from("idle"),
            Behaviour::Traveling => String::from("traveling"),
            Behaviour::Boarding => String::from("boarding"),
            Behaviour::Alighting => String::from("alighting"),
            Behaviour::Drained => String::from("drained"),
        }
    }
}

/// Read-only snapshot of the car and the waiting queues.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorStatus {
    pub floor: Floor,
    pub occupancy: usize,
    pub pending: usize,
    pub behaviour: Behaviour,
    pub waiting: Vec<usize>,
    pub onboard: Vec<usize>,
}

impl ElevatorStatus {
    pub fn new(num_floors: Floor) -> Self {
        ElevatorStatus {
            floor: 0,
            occupancy: 0,
            pending: 0,
            behaviour: Behaviour::Idle,
            waiting: vec![0; num_floors as usize],
            onboard: vec![0; num_floors as usize],
        }
    }

    pub fn capture(car: &ElevatorCar, registry: &FloorRegistry, behaviour: Behaviour) -> Self {
        let floors = 0..car.num_floors();
        ElevatorStatus {
            floor: car.floor(),
            occupancy: car.occupancy(),
            pending: registry.waiting_count(),
            behaviour,
            waiting: floors.clone().map(|floor| registry.waiting_at(floor)).collect(),
            onboard: floors.map(|floor| car.manifest().bucket_len(floor)).collect(),
        }
    }

    pub fn num_floors(&self) -> Floor {
        self.waiting.len() as Floor
    }
}
