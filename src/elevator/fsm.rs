use crate::elevator::requests::{direction_towards, ordered_head, resume_direction};
use crate::shared::{Direction, ElevatorId, ElevatorStatus, Floor};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::fmt;

pub const BOTTOM_FLOOR: Floor = 1;

/**
 * One elevator car and its motion state machine.
 *
 * The car moves one floor per step toward the head of its pending requests
 * and exchanges passengers when it stands on that floor. Its direction is
 * committed by the first request it receives and only revised after a
 * floor has been served.
 *
 * # Fields
 * - `id`:          1-based position in the fleet.
 * - `floor`:       Current floor, always within `[1, n_floors]`.
 * - `direction`:   Direction of travel, or `Idle`/`Inactive`.
 * - `requests`:    Pending target floors, without duplicates.
 * - `n_floors`:    Top floor of the building.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Elevator {
    id: ElevatorId,
    floor: Floor,
    direction: Direction,
    requests: BTreeSet<Floor>,
    n_floors: Floor,
}

impl Elevator {
    pub fn new(id: ElevatorId, n_floors: Floor) -> Elevator {
        Elevator {
            id,
            floor: BOTTOM_FLOOR,
            direction: Direction::Idle,
            requests: BTreeSet::new(),
            n_floors,
        }
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn requests(&self) -> &BTreeSet<Floor> {
        &self.requests
    }

    pub fn has_requests(&self) -> bool {
        !self.requests.is_empty()
    }

    pub fn is_idle(&self) -> bool {
        self.direction == Direction::Idle
    }

    pub fn is_active(&self) -> bool {
        self.direction != Direction::Inactive
    }

    /// Floor the elevator is currently working toward.
    ///
    /// A stationary elevator with a request for its own floor serves that
    /// floor first.
    pub fn next_target(&self) -> Option<Floor> {
        match self.direction {
            Direction::Idle | Direction::Inactive if self.requests.contains(&self.floor) => {
                Some(self.floor)
            }
            direction => ordered_head(&self.requests, direction),
        }
    }

    pub fn is_at_target(&self) -> bool {
        self.next_target() == Some(self.floor)
    }

    // A button is pressed inside the elevator, or the dispatcher assigns a call
    pub fn add_request(&mut self, floor: Floor) {
        if floor < BOTTOM_FLOOR || floor > self.n_floors {
            warn!(
                "Elevator #{}: ignoring request for floor {} outside 1..={}",
                self.id, floor, self.n_floors
            );
            return;
        }
        if self.requests.contains(&floor) {
            return;
        }

        // The first request decides where the elevator is heading
        if self.requests.is_empty() {
            self.direction = direction_towards(self.floor, floor);
        }
        self.requests.insert(floor);
        debug!("Elevator #{}: request for floor {} queued", self.id, floor);
    }

    /// Removes the head of the request ordering once the elevator has
    /// arrived there. Returns whether anything was removed.
    pub fn remove_request(&mut self, floor: Floor) -> bool {
        match self.next_target() {
            Some(head) if head == floor => self.requests.remove(&head),
            _ => false,
        }
    }

    // Move one floor in the current direction, never past the building
    pub fn move_one_floor(&mut self) {
        match self.direction {
            Direction::Up if self.floor < self.n_floors => self.floor += 1,
            Direction::Down if self.floor > BOTTOM_FLOOR => self.floor -= 1,
            _ => (),
        }
    }

    /// Open the doors at the current floor and let passengers on and off.
    pub fn board_at_floor(&mut self) {
        if !self.remove_request(self.floor) {
            debug!("Elevator #{}: nothing to serve at floor {}", self.id, self.floor);
            return;
        }
        info!("Elevator #{}: boarding at floor {}", self.id, self.floor);

        self.direction = resume_direction(&self.requests, self.floor, self.direction);
    }

    /// Takes the elevator out of service. Refused while requests are
    /// pending so nobody is stranded.
    pub fn deactivate(&mut self) -> bool {
        if self.has_requests() {
            return false;
        }
        self.direction = Direction::Inactive;
        true
    }

    pub fn reactivate(&mut self) -> bool {
        if self.direction != Direction::Inactive {
            return false;
        }
        self.direction = Direction::Idle;
        true
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            floor: self.floor,
            direction: self.direction,
            requests: self.requests.iter().copied().collect(),
        }
    }
}

impl fmt::Display for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Elevator #{}: floor {}, {}, requests {:?}",
            self.id, self.floor, self.direction, self.requests
        )
    }
}
