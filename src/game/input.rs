use serde::{Deserialize, Serialize};

/// A direction the player can hold down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a direction name; anything unrecognised has no effect and yields `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }
}

/// The set of directions held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldDirections(u8);

impl HeldDirections {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Direction> for HeldDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut held = Self::none();
        for direction in iter {
            held.insert(direction);
        }
        held
    }
}

/// Discrete match commands, applied at the start of the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    TogglePause,
    Reset,
}

/// Everything the simulation consumes for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    pub held: HeldDirections,
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding<I: IntoIterator<Item = Direction>>(directions: I) -> Self {
        Self {
            held: directions.into_iter().collect(),
            commands: Vec::new(),
        }
    }

    pub fn command(command: Command) -> Self {
        Self {
            held: HeldDirections::none(),
            commands: vec![command],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_set_membership() {
        let mut held: HeldDirections = [Direction::Up, Direction::Right].into_iter().collect();
        assert!(held.contains(Direction::Up));
        assert!(held.contains(Direction::Right));
        assert!(!held.contains(Direction::Down));

        held.remove(Direction::Up);
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![Direction::Right]);
    }

    #[test]
    fn test_unknown_direction_name_is_ignored() {
        assert_eq!(Direction::from_name("LEFT"), Some(Direction::Left));
        assert_eq!(Direction::from_name("Space"), None);
        let held: HeldDirections = ["Up", "Jump"]
            .iter()
            .filter_map(|name| Direction::from_name(name))
            .collect();
        assert_eq!(held.iter().count(), 1);
    }
}
