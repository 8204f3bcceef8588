use shared_resources::request::Floor;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    /// The floor one step away in this direction, if it exists.
    pub fn step(self, floor: Floor, num_floors: Floor) -> Option<Floor> {
        match self {
            Direction::Down => floor.checked_sub(1),
            Direction::Up => floor.checked_add(1).filter(|next| *next < num_floors),
        }
    }

    /// Direction that brings `from` closer to `to`, `None` when already there.
    pub fn towards(from: Floor, to: Floor) -> Option<Self> {
        if to > from {
            Some(Direction::Up)
        } else if to < from {
            Some(Direction::Down)
        } else {
            None
        }
    }

    pub fn as_string(self) -> String {
        match self {
            Direction::Down => String::from("down"),
            Direction::Up => String::from("up"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_stay_inside_the_shaft() {
        assert_eq!(Direction::Up.step(4, 6), Some(5));
        assert_eq!(Direction::Up.step(5, 6), None);
        assert_eq!(Direction::Down.step(0, 6), None);
        assert_eq!(Direction::Down.step(3, 6), Some(2));
    }

    #[test]
    fn towards_picks_the_closing_direction() {
        assert_eq!(Direction::towards(0, 2), Some(Direction::Up));
        assert_eq!(Direction::towards(5, 2), Some(Direction::Down));
        assert_eq!(Direction::towards(3, 3), None);
    }
}
