//! Errors reported by connections and emitters.
//!
//! Most operations in this crate are infallible by design: disconnecting twice
//! or disconnecting an unknown slot is a no-op. The `try_*` variants exist for
//! callers that want to know *why* nothing happened.

use thiserror::Error;

/// Errors produced when a handle outlives or loses its slot.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    /// The signal behind the handle has been dropped.
    #[error("signal has been dropped")]
    SignalDropped,

    /// The connection is detached (default-constructed, released, or already disconnected).
    #[error("slot is not connected")]
    NotConnected,
}

impl SignalError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SignalError::SignalDropped => "signal_dropped",
            SignalError::NotConnected => "not_connected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_messages() {
        assert_eq!(SignalError::SignalDropped.as_label(), "signal_dropped");
        assert_eq!(SignalError::NotConnected.as_label(), "not_connected");
        assert_eq!(SignalError::SignalDropped.to_string(), "signal has been dropped");
    }
}
