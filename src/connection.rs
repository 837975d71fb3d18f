//! Handles used to detach slots from their signal.

use crate::error::SignalError;
use crate::registry::SlotId;
use std::fmt;
use std::sync::Weak;

/// Anything that owns slots and can detach them by identity.
///
/// Implemented by the shared state of every [`Signal`](crate::Signal), so a
/// [`Connection`] does not need to know the signal's argument or result types.
pub(crate) trait SlotOwner: Send + Sync {
    /// Detach a slot. Returns `false` if it was not attached.
    fn detach(&self, id: SlotId) -> bool;

    fn is_attached(&self, id: SlotId) -> bool;
}

/// A non-owning handle to one connected slot.
///
/// Connections are cheap to clone; every clone refers to the same slot.
/// Disconnecting is idempotent, and a connection whose signal has been dropped
/// simply does nothing.
#[derive(Clone, Default)]
pub struct Connection {
    owner: Option<Weak<dyn SlotOwner>>,
    id: SlotId,
}

impl Connection {
    pub(crate) fn new(owner: Weak<dyn SlotOwner>, id: SlotId) -> Self {
        Self {
            owner: Some(owner),
            id,
        }
    }

    /// Identity of the slot within its signal.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Detach the slot from its signal.
    ///
    /// Returns `true` only for the call that actually detached it. Safe to call
    /// from inside any slot of the same signal, including this one: a running
    /// invocation finishes, but the slot is never invoked again.
    pub fn disconnect(&self) -> bool {
        self.try_disconnect().is_ok()
    }

    /// Like [`disconnect`](Self::disconnect), but reports why nothing happened.
    pub fn try_disconnect(&self) -> Result<(), SignalError> {
        let owner = self.owner.as_ref().ok_or(SignalError::NotConnected)?;
        let owner = owner.upgrade().ok_or(SignalError::SignalDropped)?;
        if owner.detach(self.id) {
            Ok(())
        } else {
            Err(SignalError::NotConnected)
        }
    }

    /// Whether the slot is still attached to a live signal.
    pub fn is_connected(&self) -> bool {
        self.owner
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|owner| owner.is_attached(self.id))
    }

    /// Wrap this connection so that it disconnects when dropped.
    pub fn scoped(self) -> ScopedConnection {
        ScopedConnection::new(self)
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        let same_owner = match (&self.owner, &other.owner) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_owner && self.id == other.id
    }
}

impl Eq for Connection {}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// A connection that disconnects its slot when dropped.
///
/// Store one in an observer to tie the registration to the observer's
/// lifetime. It can be moved but not cloned, so exactly one owner is
/// responsible for the disconnect.
#[must_use = "dropping a ScopedConnection disconnects its slot immediately"]
#[derive(Debug, Default)]
pub struct ScopedConnection {
    connection: Connection,
}

impl ScopedConnection {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Disconnect now instead of waiting for drop.
    pub fn disconnect(&mut self) -> bool {
        std::mem::take(&mut self.connection).disconnect()
    }

    /// Give up the obligation to disconnect and return the plain connection.
    pub fn release(mut self) -> Connection {
        std::mem::take(&mut self.connection)
    }
}

impl From<Connection> for ScopedConnection {
    fn from(connection: Connection) -> Self {
        Self::new(connection)
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.connection.disconnect();
    }
}
