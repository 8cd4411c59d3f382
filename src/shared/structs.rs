/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*           Public types              */
/***************************************/
pub type Floor = u8;
pub type ElevatorId = usize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
    Inactive,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Idle => "IDLE",
            Direction::Inactive => "INACTIVE",
        };
        write!(f, "{}", name)
    }
}

/// Direction of a hall button. A call never asks for `Idle` or `Inactive`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Up,
    Down,
}

impl From<CallDirection> for Direction {
    fn from(item: CallDirection) -> Self {
        match item {
            CallDirection::Up => Direction::Up,
            CallDirection::Down => Direction::Down,
        }
    }
}

impl std::str::FromStr for CallDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(CallDirection::Up),
            "down" | "d" => Ok(CallDirection::Down),
            other => Err(format!("invalid call direction '{}'", other)),
        }
    }
}

/// A hall button press, consumed immediately by the dispatcher.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub floor: Floor,
    pub direction: CallDirection,
}

impl Call {
    pub fn new(floor: Floor, direction: CallDirection) -> Call {
        Call { floor, direction }
    }
}

/// Read-only view of one elevator, logged as JSON by the run loop.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorStatus {
    pub id: ElevatorId,
    pub floor: Floor,
    pub direction: Direction,
    pub requests: Vec<Floor>,
}
