pub mod fsm;
pub mod requests;

pub use fsm::Elevator;
