/*
 * Request ordering for a single elevator.
 *
 * Pending floors are kept in a plain ordered set. Which end of the set is
 * served next depends on the direction of travel and is computed on demand,
 * so changing direction never reorders what is already stored.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Direction, Floor};

/***************************************/
/*             Public API              */
/***************************************/

/// Next floor to serve: the lowest pending floor when heading down, the
/// highest when heading up. Without a direction the order carries no
/// meaning and the lowest floor is returned.
pub fn ordered_head(requests: &BTreeSet<Floor>, direction: Direction) -> Option<Floor> {
    match direction {
        Direction::Down => requests.first().copied(),
        Direction::Up => requests.last().copied(),
        Direction::Idle | Direction::Inactive => requests.first().copied(),
    }
}

/// Direction a first request puts an elevator in.
pub fn direction_towards(current: Floor, target: Floor) -> Direction {
    if target > current {
        Direction::Up
    } else if target < current {
        Direction::Down
    } else {
        Direction::Idle
    }
}

/// Direction to continue in after serving a floor.
///
/// Keeps going while anything is pending ahead, otherwise turns around. An
/// elevator without a direction heads for the nearest pending floor, going
/// up on a tie.
pub fn resume_direction(requests: &BTreeSet<Floor>, floor: Floor, direction: Direction) -> Direction {
    let above = requests.range((Excluded(floor), Unbounded)).next().copied();
    let below = requests.range(..floor).next_back().copied();

    match (direction, above, below) {
        (_, None, None) => Direction::Idle,
        (Direction::Up, Some(_), _) => Direction::Up,
        (Direction::Up, None, Some(_)) => Direction::Down,
        (Direction::Down, _, Some(_)) => Direction::Down,
        (Direction::Down, Some(_), None) => Direction::Up,
        (Direction::Idle | Direction::Inactive, Some(up), Some(down)) => {
            if up - floor <= floor - down {
                Direction::Up
            } else {
                Direction::Down
            }
        }
        (Direction::Idle | Direction::Inactive, Some(_), None) => Direction::Up,
        (Direction::Idle | Direction::Inactive, None, Some(_)) => Direction::Down,
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod requests_tests {
    use super::*;

    fn set(floors: &[Floor]) -> BTreeSet<Floor> {
        floors.iter().copied().collect()
    }

    #[test]
    fn test_ordered_head_by_direction() {
        let requests = set(&[4, 12, 27]);

        assert_eq!(ordered_head(&requests, Direction::Down), Some(4));
        assert_eq!(ordered_head(&requests, Direction::Up), Some(27));
        assert_eq!(ordered_head(&requests, Direction::Idle), Some(4));
        assert_eq!(ordered_head(&BTreeSet::new(), Direction::Up), None);
    }

    #[test]
    fn test_direction_towards() {
        assert_eq!(direction_towards(5, 9), Direction::Up);
        assert_eq!(direction_towards(5, 1), Direction::Down);
        assert_eq!(direction_towards(5, 5), Direction::Idle);
    }

    #[test]
    fn test_resume_direction_keeps_going_while_requests_ahead() {
        let requests = set(&[3, 25]);

        assert_eq!(resume_direction(&requests, 10, Direction::Up), Direction::Up);
        assert_eq!(resume_direction(&requests, 10, Direction::Down), Direction::Down);
    }

    #[test]
    fn test_resume_direction_turns_around_at_extreme() {
        assert_eq!(resume_direction(&set(&[3, 8]), 20, Direction::Up), Direction::Down);
        assert_eq!(resume_direction(&set(&[12, 30]), 2, Direction::Down), Direction::Up);
    }

    #[test]
    fn test_resume_direction_from_idle_prefers_nearest() {
        assert_eq!(resume_direction(&set(&[2, 12]), 10, Direction::Idle), Direction::Up);
        assert_eq!(resume_direction(&set(&[8, 20]), 10, Direction::Idle), Direction::Down);
        // Tie goes up
        assert_eq!(resume_direction(&set(&[7, 13]), 10, Direction::Idle), Direction::Up);
    }

    #[test]
    fn test_resume_direction_without_requests_is_idle() {
        assert_eq!(resume_direction(&BTreeSet::new(), 10, Direction::Up), Direction::Idle);
        assert_eq!(resume_direction(&set(&[10]), 10, Direction::Down), Direction::Idle);
    }
}
