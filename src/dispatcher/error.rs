//! Errors raised by the dispatcher.

use thiserror::Error;

use crate::shared::Call;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Every elevator is out of service. Only reachable through a policy that
    /// leaves no elevator always-on, so callers should treat it as fatal.
    #[error("no active elevator could answer the call to floor {}", .0.floor)]
    NoActiveElevator(Call),
    /// The call names a floor the building does not have. Nothing was queued.
    #[error("call to floor {} is outside the building", .0.floor)]
    FloorOutOfRange(Call),
}
