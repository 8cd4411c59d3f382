/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::NaiveDateTime;
use log::{debug, error, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::clock::{Clock, SystemClock};
use crate::config::{FleetConfig, PolicyConfig};
use crate::dispatcher::error::DispatchError;
use crate::dispatcher::policy;
use crate::elevator::fsm::BOTTOM_FLOOR;
use crate::elevator::Elevator;
use crate::shared::{Call, CallDirection, Direction, ElevatorId, ElevatorStatus, Floor};

/***************************************/
/*               Enums                 */
/***************************************/

/// Search tier that answered a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Already travelling in the call's direction and passing the floor.
    Enroute,
    /// Active with nothing to do.
    Idle,
    /// Any active elevator, the fallback.
    InUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub elevator: ElevatorId,
    pub tier: Tier,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Owns the fleet and decides which elevator answers each hall call.
 *
 * # Fields
 * - `fleet`:           Elevators in fleet order, elevator #1 first.
 * - `fleet_config`:    Building height, fleet size and always-on elevators.
 * - `policy`:          Time-of-day service policy.
 * - `clock`:           Time source, sampled once per tick.
 * - `ticks`:           Number of ticks performed.
 */
pub struct Dispatcher<C: Clock = SystemClock> {
    fleet: Vec<Elevator>,
    fleet_config: FleetConfig,
    policy: PolicyConfig,
    clock: C,
    ticks: u64,
}

impl<C: Clock> Dispatcher<C> {
    pub fn new(fleet_config: FleetConfig, policy: PolicyConfig, clock: C) -> Dispatcher<C> {
        let fleet = (1..=fleet_config.n_elevators)
            .map(|id| Elevator::new(id, fleet_config.n_floors))
            .collect();

        Dispatcher {
            fleet,
            fleet_config,
            policy,
            clock,
            ticks: 0,
        }
    }

    pub fn fleet(&self) -> &[Elevator] {
        &self.fleet
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elevator(&self, id: ElevatorId) -> Option<&Elevator> {
        let index = id.checked_sub(1)?;
        self.fleet.get(index)
    }

    pub fn elevator_mut(&mut self, id: ElevatorId) -> Option<&mut Elevator> {
        let index = id.checked_sub(1)?;
        self.fleet.get_mut(index)
    }

    /// Elevators that are in service, in fleet order.
    pub fn active_elevators(&self) -> Vec<&Elevator> {
        self.fleet.iter().filter(|e| e.is_active()).collect()
    }

    pub fn status(&self) -> Vec<ElevatorStatus> {
        self.fleet.iter().map(Elevator::status).collect()
    }

    /// In-car button. Returns `false` when the elevator does not exist.
    pub fn request_floor(&mut self, id: ElevatorId, floor: Floor) -> bool {
        match self.elevator_mut(id) {
            Some(elevator) => {
                elevator.add_request(floor);
                true
            }
            None => {
                warn!("Cab request for unknown elevator #{}", id);
                false
            }
        }
    }

    /// Hall button. Returns the id of the elevator that got the call.
    pub fn request_call(
        &mut self,
        floor: Floor,
        direction: CallDirection,
    ) -> Result<ElevatorId, DispatchError> {
        self.assign_call(Call::new(floor, direction))
            .map(|assignment| assignment.elevator)
    }

    pub fn assign_call(&mut self, call: Call) -> Result<Assignment, DispatchError> {
        if call.floor < BOTTOM_FLOOR || call.floor > self.fleet_config.n_floors {
            let e = DispatchError::FloorOutOfRange(call);
            warn!("{}", e);
            return Err(e);
        }

        let chosen = self
            .closest_enroute_elevator(call)
            .map(|index| (index, Tier::Enroute))
            .or_else(|| self.closest_idle_elevator(call.floor).map(|index| (index, Tier::Idle)))
            .or_else(|| self.closest_in_use_elevator(call.floor).map(|index| (index, Tier::InUse)));

        let (index, tier) = match chosen {
            Some(choice) => choice,
            None => {
                let e = DispatchError::NoActiveElevator(call);
                error!("{}", e);
                return Err(e);
            }
        };

        let elevator = &mut self.fleet[index];
        elevator.add_request(call.floor);
        info!(
            "Call to floor {} ({:?}) assigned to elevator #{} ({:?})",
            call.floor,
            call.direction,
            elevator.id(),
            tier
        );

        Ok(Assignment {
            elevator: elevator.id(),
            tier,
        })
    }

    /// One simulation step: apply the service policy, then let every active
    /// elevator board or move.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.ticks += 1;

        self.apply_service_policy(&now);

        let rush_floor = policy::anticipatory_floor(&now, &self.policy, self.fleet_config.n_floors);

        for elevator in self.fleet.iter_mut().filter(|e| e.is_active()) {
            if let Some(floor) = rush_floor {
                // Already waiting there: the request would be served on the spot
                if elevator.is_idle() && elevator.floor() != floor {
                    elevator.add_request(floor);
                }
            }

            if elevator.has_requests() {
                if elevator.is_at_target() {
                    elevator.board_at_floor();
                } else {
                    elevator.move_one_floor();
                }
            }
        }

        for elevator in &self.fleet {
            debug!("[tick {}] {}", self.ticks, elevator);
        }
    }

    fn apply_service_policy(&mut self, now: &NaiveDateTime) {
        if policy::is_reduced_service(now, &self.policy) {
            for elevator in self.fleet.iter_mut() {
                if self.fleet_config.is_always_on(elevator.id())
                    || elevator.direction() == Direction::Inactive
                {
                    continue;
                }
                if elevator.deactivate() {
                    info!("Elevator #{} taken out of service at {}", elevator.id(), now);
                }
            }
        } else {
            for elevator in self.fleet.iter_mut() {
                if elevator.reactivate() {
                    info!("Elevator #{} back in service at {}", elevator.id(), now);
                }
            }
        }
    }

    fn closest_enroute_elevator(&self, call: Call) -> Option<usize> {
        closest(
            self.indexed_active().filter(|(_, e)| is_enroute(e, call)),
            call.floor,
        )
    }

    fn closest_idle_elevator(&self, floor: Floor) -> Option<usize> {
        closest(self.indexed_active().filter(|(_, e)| e.is_idle()), floor)
    }

    fn closest_in_use_elevator(&self, floor: Floor) -> Option<usize> {
        closest(self.indexed_active(), floor)
    }

    fn indexed_active(&self) -> impl Iterator<Item = (usize, &Elevator)> {
        self.fleet.iter().enumerate().filter(|(_, e)| e.is_active())
    }
}

/***************************************/
/*          Private helpers            */
/***************************************/

// The floor must lie between the elevator and the head of its requests,
// on the side it is already travelling toward
fn is_enroute(elevator: &Elevator, call: Call) -> bool {
    let head = match elevator.next_target() {
        Some(head) => head,
        None => return false,
    };
    if elevator.direction() != Direction::from(call.direction) {
        return false;
    }
    let floor = elevator.floor();

    match elevator.direction() {
        Direction::Up => floor <= call.floor && call.floor <= head,
        Direction::Down => head <= call.floor && call.floor <= floor,
        _ => false,
    }
}

// Nearest candidate, first in fleet order on a tie
fn closest<'a, I>(candidates: I, floor: Floor) -> Option<usize>
where
    I: Iterator<Item = (usize, &'a Elevator)>,
{
    candidates
        .min_by_key(|(_, e)| e.floor().abs_diff(floor))
        .map(|(index, _)| index)
}
