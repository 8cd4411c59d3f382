/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::buttons::ButtonEvent;
use crate::clock::Clock;
use crate::dispatcher::{DispatchError, Dispatcher};

/***************************************/
/*               Enums                 */
/***************************************/
enum Event {
    Button(ButtonEvent),
    ButtonsClosed,
    Tick,
    Terminate,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Drives a dispatcher from the outside world.
 *
 * Button presses from any number of threads arrive on one channel and ticks
 * on a timer channel. Both are handled here one at a time, so the dispatcher
 * never sees a call and a tick at once.
 *
 * # Fields
 * - `dispatcher`:      The dispatcher being driven.
 * - `button_rx`:       Receives hall and cab button presses.
 * - `terminate_rx`:    Stops the loop.
 * - `ticker`:          Fires once per simulation step.
 * - `max_ticks`:       Stop after this many ticks, if set.
 */
pub struct Runner<C: Clock> {
    dispatcher: Dispatcher<C>,
    button_rx: cbc::Receiver<ButtonEvent>,
    terminate_rx: cbc::Receiver<()>,
    ticker: cbc::Receiver<std::time::Instant>,
    max_ticks: Option<u64>,
}

impl<C: Clock> Runner<C> {
    pub fn new(
        dispatcher: Dispatcher<C>,
        button_rx: cbc::Receiver<ButtonEvent>,
        terminate_rx: cbc::Receiver<()>,
        tick_interval: Duration,
        max_ticks: Option<u64>,
    ) -> Runner<C> {
        Runner {
            dispatcher,
            button_rx,
            terminate_rx,
            ticker: cbc::tick(tick_interval),
            max_ticks,
        }
    }

    /// Runs until terminated or `max_ticks` is reached. Hands the dispatcher
    /// back so the caller can inspect the final state. A call nobody can
    /// answer ends the run with an error.
    pub fn run(mut self) -> Result<Dispatcher<C>, DispatchError> {
        loop {
            if self.finished() {
                info!("Reached {} ticks, stopping", self.dispatcher.ticks());
                return Ok(self.dispatcher);
            }

            match self.wait_for_event() {
                Event::Button(event) => self.handle_button(event)?,
                Event::ButtonsClosed => {
                    // Keep ticking without buttons
                    self.button_rx = cbc::never();
                }
                Event::Tick => self.handle_tick(),
                Event::Terminate => {
                    info!("Runner terminated");
                    return Ok(self.dispatcher);
                }
            }
        }
    }

    fn finished(&self) -> bool {
        match self.max_ticks {
            Some(max) => self.dispatcher.ticks() >= max,
            None => false,
        }
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.terminate_rx) -> _ => Event::Terminate,
            recv(self.button_rx) -> event => {
                match event {
                    Ok(event) => Event::Button(event),
                    Err(_) => Event::ButtonsClosed,
                }
            },
            recv(self.ticker) -> _ => Event::Tick,
        }
    }

    fn handle_button(&mut self, event: ButtonEvent) -> Result<(), DispatchError> {
        match event {
            ButtonEvent::Hall(call) => match self.dispatcher.assign_call(call) {
                // Out-of-range floors are logged by the dispatcher
                Ok(_) | Err(DispatchError::FloorOutOfRange(_)) => {}
                Err(e) => return Err(e),
            },
            ButtonEvent::Cab { elevator, floor } => {
                self.dispatcher.request_floor(elevator, floor);
            }
        }
        Ok(())
    }

    fn handle_tick(&mut self) {
        self.dispatcher.tick();

        match serde_json::to_string(&self.dispatcher.status()) {
            Ok(status) => debug!("[tick {}] {}", self.dispatcher.ticks(), status),
            Err(e) => warn!("Failed to serialize fleet status: {}", e),
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod runner_tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::config::{FleetConfig, PolicyConfig};
    use crate::shared::{Call, CallDirection, Direction};
    use chrono::NaiveDate;
    use std::thread::Builder;

    fn setup_runner(
        fleet: FleetConfig,
        hour: u32,
        max_ticks: Option<u64>,
    ) -> (Runner<SimulatedClock>, cbc::Sender<ButtonEvent>, cbc::Sender<()>) {
        // Monday
        let now = NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .unwrap();
        let dispatcher = Dispatcher::new(fleet, PolicyConfig::default(), SimulatedClock::fixed(now));
        let (button_tx, button_rx) = cbc::unbounded::<ButtonEvent>();
        let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

        (
            Runner::new(dispatcher, button_rx, terminate_rx, Duration::from_millis(1), max_ticks),
            button_tx,
            terminate_tx,
        )
    }

    #[test]
    fn test_runner_stops_after_max_ticks() {
        // Arrange
        let (runner, button_tx, _terminate_tx) = setup_runner(FleetConfig::default(), 12, Some(20));
        button_tx.send(ButtonEvent::Cab { elevator: 1, floor: 6 }).unwrap();
        drop(button_tx);

        // Act
        let dispatcher = runner.run().unwrap();

        // Assert
        assert_eq!(dispatcher.ticks(), 20);
        let elevator = dispatcher.elevator(1).unwrap();
        assert_eq!(elevator.floor(), 6);
        assert_eq!(elevator.direction(), Direction::Idle);
    }

    #[test]
    fn test_runner_terminates_on_request() {
        // Arrange
        let (runner, button_tx, terminate_tx) = setup_runner(FleetConfig::default(), 12, None);
        let runner_thread = Builder::new()
            .name("runner".into())
            .spawn(move || runner.run())
            .unwrap();

        // Act
        button_tx
            .send(ButtonEvent::Hall(Call::new(10, CallDirection::Up)))
            .unwrap();
        terminate_tx.send(()).unwrap();

        // Assert
        let result = runner_thread.join().unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_runner_skips_call_outside_building() {
        // Arrange
        let (runner, button_tx, _terminate_tx) = setup_runner(FleetConfig::default(), 12, Some(20));
        button_tx
            .send(ButtonEvent::Hall(Call::new(0, CallDirection::Up)))
            .unwrap();
        button_tx.send(ButtonEvent::Cab { elevator: 2, floor: 4 }).unwrap();
        drop(button_tx);

        // Act
        let dispatcher = runner.run().unwrap();

        // Assert
        assert_eq!(dispatcher.ticks(), 20);
        assert_eq!(dispatcher.elevator(1).unwrap().floor(), 1);
        assert_eq!(dispatcher.elevator(2).unwrap().floor(), 4);
    }

    #[test]
    fn test_runner_fails_without_active_elevator() {
        // Arrange: at night a fleet without always-on elevators shuts down
        let night = NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|date| date.and_hms_opt(23, 0, 0))
            .unwrap();
        let fleet = FleetConfig::new(2, 30, vec![]);
        let mut dispatcher = Dispatcher::new(fleet, PolicyConfig::default(), SimulatedClock::fixed(night));
        dispatcher.tick();
        assert!(dispatcher.active_elevators().is_empty());

        let (button_tx, button_rx) = cbc::unbounded::<ButtonEvent>();
        let (_terminate_tx, terminate_rx) = cbc::unbounded::<()>();
        let runner = Runner::new(dispatcher, button_rx, terminate_rx, Duration::from_secs(60), None);

        // Act
        button_tx
            .send(ButtonEvent::Hall(Call::new(5, CallDirection::Up)))
            .unwrap();
        let result = runner.run();

        // Assert
        assert!(matches!(
            result,
            Err(DispatchError::NoActiveElevator(Call { floor: 5, .. }))
        ));
    }
}
