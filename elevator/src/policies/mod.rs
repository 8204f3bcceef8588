//! Each policy looks at the car and the waiting queues and names the one
//! thing the car should do this tick. The dispatcher applies it.

use shared_resources::config::PolicyKind;
use shared_resources::request::{Floor, RequestId};

use crate::utilities::direction::Direction;
use crate::utilities::elevator_car::ElevatorCar;
use crate::utilities::floor_registry::FloorRegistry;

pub mod fcfs;
pub mod nearest_first;
pub mod round_robin;

pub use fcfs::Fcfs;
pub use nearest_first::NearestFirst;
pub use round_robin::RoundRobin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// One floor of travel.
    Move(Direction),
    /// Change sweep direction without moving.
    Turn(Direction),
    Board,
    Alight,
    Wait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errand {
    Board,
    Alight,
}

/// A committed straight run to `floor`, finished by `errand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trip {
    pub floor: Floor,
    pub errand: Errand,
}

impl Trip {
    pub fn board(floor: Floor) -> Self {
        Trip { floor, errand: Errand::Board }
    }

    pub fn alight(floor: Floor) -> Self {
        Trip { floor, errand: Errand::Alight }
    }
}

/// Next action for an active trip. The trip is consumed once the car is at
/// its floor and the errand is handed out.
fn follow(trip: &mut Option<Trip>, current: Floor) -> Option<Action> {
    let target = (*trip)?;
    match Direction::towards(current, target.floor) {
        Some(direction) => Some(Action::Move(direction)),
        None => {
            *trip = None;
            Some(match target.errand {
                Errand::Board => Action::Board,
                Errand::Alight => Action::Alight,
            })
        },
    }
}

/// Closest floor (by distance from `current`) whose `priority` is set.
/// When both sides are equally close the earlier id wins.
pub fn nearest_by_priority(
    current: Floor,
    num_floors: Floor,
    priority: impl Fn(Floor) -> Option<RequestId>,
) -> Option<Floor> {
    let probe = |floor: Option<Floor>| {
        let floor = floor.filter(|floor| *floor < num_floors)?;
        priority(floor).map(|id| (floor, id))
    };

    for radius in 1..num_floors {
        let up = probe(current.checked_add(radius));
        let down = probe(current.checked_sub(radius));
        match (up, down) {
            (Some((floor, _)), None) | (None, Some((floor, _))) => return Some(floor),
            (Some((up_floor, up_id)), Some((down_floor, down_id))) => {
                return Some(if up_id < down_id { up_floor } else { down_floor });
            },
            (None, None) => (),
        }
    }
    None
}

/// The closed set of dispatch algorithms.
#[derive(Debug, Clone)]
pub enum DispatchPolicy {
    Fcfs(Fcfs),
    RoundRobin(RoundRobin),
    NearestFirst(NearestFirst),
}

impl DispatchPolicy {
    pub fn new(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Fcfs => DispatchPolicy::Fcfs(Fcfs::new()),
            PolicyKind::RoundRobin => DispatchPolicy::RoundRobin(RoundRobin::new()),
            PolicyKind::NearestFirst => DispatchPolicy::NearestFirst(NearestFirst::new()),
        }
    }

    pub fn next_action(&mut self, car: &ElevatorCar, registry: &FloorRegistry) -> Action {
        match self {
            DispatchPolicy::Fcfs(policy) => policy.next_action(car, registry),
            DispatchPolicy::RoundRobin(policy) => policy.next_action(car, registry),
            DispatchPolicy::NearestFirst(policy) => policy.next_action(car, registry),
        }
    }

    /// A move was refused at the edge of the shaft; drop whatever plan led there.
    pub fn on_blocked(&mut self) {
        match self {
            DispatchPolicy::Fcfs(policy) => policy.on_blocked(),
            DispatchPolicy::RoundRobin(policy) => policy.on_blocked(),
            DispatchPolicy::NearestFirst(policy) => policy.on_blocked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(pairs: &[(Floor, u64)]) -> impl Fn(Floor) -> Option<RequestId> + '_ {
        move |floor| {
            pairs
                .iter()
                .find(|(at, _)| *at == floor)
                .map(|(_, id)| RequestId(*id))
        }
    }

    #[test]
    fn nearest_prefers_distance() {
        assert_eq!(nearest_by_priority(2, 6, ids(&[(5, 1), (1, 9)])), Some(1));
        assert_eq!(nearest_by_priority(2, 6, ids(&[(5, 1)])), Some(5));
        assert_eq!(nearest_by_priority(2, 6, ids(&[])), None);
    }

    #[test]
    fn nearest_breaks_ties_on_earlier_id() {
        assert_eq!(nearest_by_priority(2, 6, ids(&[(0, 1), (4, 2)])), Some(0));
        assert_eq!(nearest_by_priority(2, 6, ids(&[(0, 7), (4, 3)])), Some(4));
    }

    #[test]
    fn nearest_ignores_the_current_floor_and_the_outside() {
        assert_eq!(nearest_by_priority(0, 3, ids(&[(0, 1), (2, 5)])), Some(2));
        assert_eq!(nearest_by_priority(2, 3, ids(&[(3, 1), (0, 4)])), Some(0));
    }

    #[test]
    fn follow_moves_then_hands_out_the_errand() {
        let mut trip = Some(Trip::alight(3));
        assert_eq!(follow(&mut trip, 1), Some(Action::Move(Direction::Up)));
        assert_eq!(follow(&mut trip, 4), Some(Action::Move(Direction::Down)));
        assert_eq!(follow(&mut trip, 3), Some(Action::Alight));
        assert_eq!(trip, None);
        assert_eq!(follow(&mut trip, 3), None);
    }
}
