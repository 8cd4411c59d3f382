/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{info, warn};
use std::io::BufRead;
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Call, CallDirection, ElevatorId, Floor};

/***************************************/
/*       Public data structures        */
/***************************************/

/// A button pressed somewhere in the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Up or down button on a floor.
    Hall(Call),
    /// Floor button inside an elevator car.
    Cab { elevator: ElevatorId, floor: Floor },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ButtonParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', expected 'call' or 'car'")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0}")]
    Direction(String),
}

const CALL_USAGE: &str = "call <floor> <up|down>";
const CAR_USAGE: &str = "car <elevator> <floor>";

/***************************************/
/*             Public API              */
/***************************************/

/// Parses one line of button input:
/// `call <floor> <up|down>` or `car <elevator> <floor>`.
pub fn parse_button(line: &str) -> Result<ButtonEvent, ButtonParseError> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or(ButtonParseError::Empty)?;
    let args: Vec<&str> = words.collect();

    match command.to_ascii_lowercase().as_str() {
        "call" => match args.as_slice() {
            [floor, direction] => {
                let floor = parse_number(floor)?;
                let direction = direction
                    .parse::<CallDirection>()
                    .map_err(ButtonParseError::Direction)?;
                Ok(ButtonEvent::Hall(Call::new(floor, direction)))
            }
            _ => Err(ButtonParseError::Usage(CALL_USAGE)),
        },
        "car" => match args.as_slice() {
            [elevator, floor] => Ok(ButtonEvent::Cab {
                elevator: parse_number(elevator)?,
                floor: parse_number(floor)?,
            }),
            _ => Err(ButtonParseError::Usage(CAR_USAGE)),
        },
        other => Err(ButtonParseError::UnknownCommand(other.to_string())),
    }
}

/// Forwards button presses read from `input` until it is exhausted or the
/// receiving side hangs up. Malformed lines are logged and skipped.
pub fn read_buttons<R: BufRead>(input: R, button_tx: cbc::Sender<ButtonEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read button input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        match parse_button(&line) {
            Ok(event) => {
                if button_tx.send(event).is_err() {
                    break;
                }
            }
            Err(e) => warn!("Ignoring '{}': {}", line.trim(), e),
        }
    }
    info!("Button input closed");
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T, ButtonParseError> {
    word.parse::<T>()
        .map_err(|_| ButtonParseError::NotANumber(word.to_string()))
}

/***************************************/
/*             Unit tests              */
/***************************************/
