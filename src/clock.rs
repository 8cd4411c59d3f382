/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::{Duration, Local, NaiveDateTime};
use std::cell::Cell;

/***************************************/
/*             Public API              */
/***************************************/

/// Source of the wall-clock time the service policy is evaluated against.
/// The dispatcher samples it once per tick.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Local time of the machine running the simulation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/**
 * Simulated time.
 *
 * Every call to `now` returns the current simulated time and then moves it
 * forward by `step`. A zero step gives a clock that stands still until it
 * is `set` or `advance`d.
 */
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    now: Cell<NaiveDateTime>,
    step: Duration,
}

impl SimulatedClock {
    pub fn new(start: NaiveDateTime, step: Duration) -> SimulatedClock {
        SimulatedClock {
            now: Cell::new(start),
            step,
        }
    }

    pub fn fixed(at: NaiveDateTime) -> SimulatedClock {
        SimulatedClock::new(at, Duration::zero())
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.now.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn peek(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> NaiveDateTime {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
