pub mod macros;
pub mod structs;

pub use structs::Call;
pub use structs::CallDirection;
pub use structs::Direction;
pub use structs::ElevatorId;
pub use structs::ElevatorStatus;
pub use structs::Floor;
