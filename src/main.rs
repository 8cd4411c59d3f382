/* 3rd party libraries */
use chrono::{Duration as SimDuration, Local, NaiveDateTime};
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::info;
use std::thread::Builder;
use std::time::Duration;

/* Custom libraries */
use elevator_dispatch::buttons::{self, ButtonEvent};
use elevator_dispatch::clock::{Clock, SimulatedClock, SystemClock};
use elevator_dispatch::config::{self, DEFAULT_CONFIG_PATH};
use elevator_dispatch::runner::Runner;
use elevator_dispatch::unwrap_or_exit;
use elevator_dispatch::Dispatcher;

const START_FORMAT: &str = "%Y-%m-%dT%H:%M";

/* Main */
fn main() {
    let matches = Command::new("elevator-dispatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulates dispatch and motion control for a fleet of elevators")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value(DEFAULT_CONFIG_PATH)
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("ticks")
                .short('n')
                .long("ticks")
                .takes_value(true)
                .help("Stop after this many ticks"),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .takes_value(true)
                .help("Run on simulated time starting at YYYY-MM-DDTHH:MM"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log the fleet state every tick"),
        )
        .get_matches();

    // Initialize logging
    let default_level = if matches.is_present("verbose") { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or(DEFAULT_CONFIG_PATH);
    let mut config = unwrap_or_exit!(config::load_config(config_path), "Failed to load configuration");
    if let Some(ticks) = matches.value_of("ticks") {
        config.simulation.max_ticks = Some(unwrap_or_exit!(ticks.parse::<u64>(), "Invalid --ticks"));
    }

    // Pick the time source for the service policy
    let step = SimDuration::minutes(i64::from(config.simulation.minutes_per_tick));
    let clock: Box<dyn Clock> = match matches.value_of("start") {
        Some(start) => {
            let start = unwrap_or_exit!(NaiveDateTime::parse_from_str(start, START_FORMAT), "Invalid --start");
            Box::new(SimulatedClock::new(start, step))
        }
        None if config.simulation.minutes_per_tick > 0 => {
            Box::new(SimulatedClock::new(Local::now().naive_local(), step))
        }
        None => Box::new(SystemClock),
    };

    // Initialize channels
    let (button_tx, button_rx) = cbc::unbounded::<ButtonEvent>();
    let (_terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start the button module
    let button_thread = Builder::new().name("buttons".into());
    unwrap_or_exit!(
        button_thread.spawn(move || buttons::read_buttons(std::io::stdin().lock(), button_tx)),
        "Failed to start button thread"
    );

    info!(
        "Starting {} elevators over {} floors, always-on {:?}",
        config.fleet.n_elevators, config.fleet.n_floors, config.fleet.always_on
    );
    let dispatcher = Dispatcher::new(config.fleet.clone(), config.policy.clone(), clock);
    let runner = Runner::new(
        dispatcher,
        button_rx,
        terminate_rx,
        Duration::from_millis(config.simulation.tick_interval_ms),
        config.simulation.max_ticks,
    );

    let dispatcher = unwrap_or_exit!(runner.run(), "Dispatcher stopped");
    for elevator in dispatcher.fleet() {
        info!("{}", elevator);
    }
}
