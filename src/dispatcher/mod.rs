pub mod dispatcher;
pub mod error;
pub mod policy;

pub use dispatcher::{Assignment, Dispatcher, Tier};
pub use error::DispatchError;
