use serde::{Deserialize, Serialize};
use std::fmt;

/// Floor number. Negative values are valid basement levels.
pub type Floor = i32;

/// Direction of travel between two floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction needed to travel from `from` to `to`, or `None` if the car
    /// is already there.
    ///
    /// ```
    /// use elevator_core::Direction;
    ///
    /// assert_eq!(Direction::between(1, 4), Some(Direction::Up));
    /// assert_eq!(Direction::between(4, 1), Some(Direction::Down));
    /// assert_eq!(Direction::between(3, 3), None);
    /// ```
    #[must_use]
    pub fn between(from: Floor, to: Floor) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less => Some(Direction::Down),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The floor one unit away from `floor` in this direction.
    #[must_use]
    pub fn step(self, floor: Floor) -> Floor {
        match self {
            Direction::Up => floor + 1,
            Direction::Down => floor - 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Origin of a request batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Passenger waiting on a floor called the car there.
    HallCall,

    /// Passenger inside the car pressed floor buttons.
    DestinationCall,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestKind::HallCall => write!(f, "hall call"),
            RequestKind::DestinationCall => write!(f, "destination call"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 5, Some(Direction::Up))]
    #[case(5, 1, Some(Direction::Down))]
    #[case(-2, 0, Some(Direction::Up))]
    #[case(3, 3, None)]
    fn test_direction_between(
        #[case] from: Floor,
        #[case] to: Floor,
        #[case] expected: Option<Direction>,
    ) {
        assert_eq!(Direction::between(from, to), expected);
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Up.step(1), 2);
        assert_eq!(Direction::Down.step(1), 0);
        assert_eq!(Direction::Down.step(0), -1);
    }

    #[test]
    fn test_request_kind_serialization() {
        let json = serde_json::to_string(&RequestKind::HallCall).unwrap();
        assert_eq!(json, "\"hall_call\"");

        let kind: RequestKind = serde_json::from_str("\"destination_call\"").unwrap();
        assert_eq!(kind, RequestKind::DestinationCall);
    }
}
