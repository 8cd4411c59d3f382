//! Dispatch and motion control for a simulated fleet of elevators.
//!
//! The [`Dispatcher`] owns the fleet, answers hall calls with a three-tier
//! nearest-elevator search and advances every elevator one floor per
//! [`Dispatcher::tick`]. A time-of-day policy, evaluated against an
//! injectable [`Clock`], parks elevators at night and on weekends and sends
//! idle ones ahead of the rush hours.

/* Modules */
pub mod buttons;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod elevator;
pub mod runner;
pub mod shared;

pub use clock::{Clock, SimulatedClock, SystemClock};
pub use config::{Config, FleetConfig, PolicyConfig};
pub use dispatcher::{Assignment, DispatchError, Dispatcher, Tier};
pub use elevator::Elevator;
pub use shared::{Call, CallDirection, Direction, ElevatorId, Floor};
