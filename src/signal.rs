//! Core Signal type and dispatch.

use crate::config::SignalConfig;
use crate::connection::{Connection, ScopedConnection, SlotOwner};
use crate::error::SignalError;
use crate::registry::{Registry, SlotId};
use crate::slot::Slot;
use std::fmt;
use std::sync::{Arc, Weak};

/// State shared between a signal and the handles pointing at it.
pub(crate) struct SignalInner<Args, R> {
    registry: Registry<Slot<Args, R>>,
    label: String,
}

impl<Args: Clone + 'static, R: 'static> SignalInner<Args, R> {
    /// Left fold over the results of every live slot, in registration order.
    fn fold<B>(&self, args: Args, seed: B, mut merge: impl FnMut(B, R) -> B) -> B {
        let mut acc = seed;
        for slot in self.registry.traverse() {
            if let Some(result) = slot.invoke(args.clone()) {
                acc = merge(acc, result);
            }
        }
        acc
    }
}

impl<Args: 'static, R: 'static> SlotOwner for SignalInner<Args, R> {
    fn detach(&self, id: SlotId) -> bool {
        let Some(slot) = self.registry.erase(id) else {
            return false;
        };
        tracing::trace!(signal = %self.label, slot = ?id, "slot disconnected");
        drop(slot);
        true
    }

    fn is_attached(&self, id: SlotId) -> bool {
        self.registry.contains(id)
    }
}

/// A typed, multi-subscriber callback dispatcher.
///
/// `Args` is the argument set passed to every slot (use a tuple for several
/// arguments, `()` for none) and `R` is what each slot returns. Slots run in
/// the order they were connected. A slot may connect, disconnect (itself
/// included) or fire this same signal again while it runs.
///
/// # Examples
///
/// ```rust,no_run
/// use observable::prelude::*;
///
/// let resized: Signal<(u32, u32)> = Signal::new();
/// let connection = resized.connect(|(w, h)| println!("{w}x{h}"));
/// resized.emit((640, 480));
/// connection.disconnect();
/// ```
///
/// Non-unit results are folded. By default the last result wins:
///
/// ```rust,no_run
/// use observable::prelude::*;
///
/// let query: Signal<(), i32> = Signal::new();
/// query.connect(|()| 1);
/// query.connect(|()| 4);
/// assert_eq!(query.emit(()), 4);
/// assert_eq!(query.emit_fold((), 0, i32::max), 4);
/// ```
pub struct Signal<Args = (), R = ()> {
    inner: Arc<SignalInner<Args, R>>,
}

impl<Args: Clone + 'static, R: 'static> Signal<Args, R> {
    /// Create a signal with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SignalConfig::default())
    }

    pub fn with_config(config: SignalConfig) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                registry: Registry::new(config.compact_after),
                label: config.label_or_default().to_owned(),
            }),
        }
    }

    /// Label used in this signal's log events.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    fn owner(&self) -> Weak<dyn SlotOwner> {
        let weak: Weak<SignalInner<Args, R>> = Arc::downgrade(&self.inner);
        weak
    }

    fn connected(&self, id: SlotId) -> Connection {
        tracing::trace!(signal = %self.inner.label, slot = ?id, "slot connected");
        Connection::new(self.owner(), id)
    }

    /// Register a slot that is built from its own connection.
    pub(crate) fn attach_with(&self, build: impl FnOnce(Connection) -> Slot<Args, R>) -> Connection {
        let owner = self.owner();
        let id = self
            .inner
            .registry
            .insert_with_key(|id| build(Connection::new(owner, id)));
        self.connected(id)
    }

    /// Connect a closure.
    pub fn connect(&self, f: impl Fn(Args) -> R + Send + Sync + 'static) -> Connection {
        let id = self.inner.registry.push_back(Slot::new(f));
        self.connected(id)
    }

    /// Connect a closure that receives its own connection, so it can
    /// disconnect itself.
    pub fn connect_with(
        &self,
        f: impl Fn(&Connection, Args) -> R + Send + Sync + 'static,
    ) -> Connection {
        self.attach_with(|connection| Slot::new(move |args| f(&connection, args)))
    }

    /// Connect a closure and disconnect it when the returned guard is dropped.
    pub fn connect_scoped(&self, f: impl Fn(Args) -> R + Send + Sync + 'static) -> ScopedConnection {
        self.connect(f).scoped()
    }

    /// Connect a closure that ignores the signal's arguments.
    pub fn connect_notify(&self, f: impl Fn() -> R + Send + Sync + 'static) -> Connection {
        self.connect(move |_| f())
    }

    /// Connect a method of `target`.
    ///
    /// The target is held weakly. Once it is gone the slot is skipped and
    /// disconnects itself, so an observer can connect its own methods without
    /// keeping itself alive.
    pub fn connect_method<T: Send + Sync + 'static>(
        &self,
        target: Weak<T>,
        method: impl Fn(&T, Args) -> R + Send + Sync + 'static,
    ) -> Connection {
        self.attach_with(|connection| {
            Slot::skippable(move |args| match target.upgrade() {
                Some(target) => Some(method(&target, args)),
                None => {
                    tracing::debug!(slot = ?connection.id(), "method target dropped, disconnecting");
                    connection.disconnect();
                    None
                }
            })
        })
    }

    /// Fire the signal, seeding the result with `default`; the last
    /// non-skipped slot result wins.
    pub fn emit_or(&self, args: Args, default: R) -> R {
        self.inner.fold(args, default, |_, result| result)
    }

    /// Fire the signal and fold the slot results left to right, starting from `seed`.
    pub fn emit_fold<B>(&self, args: Args, seed: B, merge: impl FnMut(B, R) -> B) -> B {
        self.inner.fold(args, seed, merge)
    }

    /// Fire the signal and gather every non-skipped result in registration order.
    pub fn collect(&self, args: Args) -> Vec<R> {
        let mut results = Vec::new();
        self.inner.registry.for_each_live(|slot| {
            if let Some(result) = slot.invoke(args.clone()) {
                results.push(result);
            }
        });
        results
    }

    /// Disconnect every slot. Existing connections become no-ops.
    pub fn disconnect_all(&self) {
        let slots = self.inner.registry.clear();
        tracing::trace!(signal = %self.inner.label, count = slots.len(), "all slots disconnected");
        drop(slots);
    }

    /// Number of connected slots.
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A weak handle that can fire this signal without keeping it alive.
    ///
    /// Slots capture an emitter to re-fire their own signal.
    pub fn emitter(&self) -> Emitter<Args, R> {
        Emitter {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<Args: Clone + 'static, R: Default + 'static> Signal<Args, R> {
    /// Fire the signal. Returns the last non-skipped slot result, or
    /// `R::default()` when no slot produced one.
    pub fn emit(&self, args: Args) -> R {
        self.emit_or(args, R::default())
    }
}

impl<Args: Clone + 'static, R: 'static> Default for Signal<Args, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args, R> fmt::Debug for Signal<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("label", &self.inner.label)
            .field("slots", &self.inner.registry.len())
            .finish()
    }
}

/// A non-owning handle that fires a [`Signal`].
///
/// Every method returns `None` (or [`SignalError::SignalDropped`]) once the
/// signal is gone. A dispatch started through an emitter keeps the signal's
/// slots alive until it completes, even if the signal is dropped meanwhile.
pub struct Emitter<Args = (), R = ()> {
    inner: Weak<SignalInner<Args, R>>,
}

impl<Args, R> Clone for Emitter<Args, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<Args: Clone + 'static, R: 'static> Emitter<Args, R> {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn emit_or(&self, args: Args, default: R) -> Option<R> {
        self.emit_fold(args, default, |_, result| result)
    }

    pub fn emit_fold<B>(&self, args: Args, seed: B, merge: impl FnMut(B, R) -> B) -> Option<B> {
        let inner = self.inner.upgrade()?;
        Some(inner.fold(args, seed, merge))
    }
}

impl<Args: Clone + 'static, R: Default + 'static> Emitter<Args, R> {
    pub fn emit(&self, args: Args) -> Option<R> {
        self.emit_or(args, R::default())
    }

    pub fn try_emit(&self, args: Args) -> Result<R, SignalError> {
        self.emit(args).ok_or(SignalError::SignalDropped)
    }
}

impl<Args, R> fmt::Debug for Emitter<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
