//! # Observable
//!
//! Signals and slots with reentrant-safe dispatch.
//!
//! ## Features
//!
//! - **Ordered dispatch**: slots run in the order they were connected
//! - **Reentrant**: a slot may connect, disconnect (itself included) or
//!   re-fire its own signal while it runs
//! - **Result folding**: last result wins, or fold with your own merge function
//! - **Scoped connections**: unregister automatically when the owner is dropped
//! - **Memory safe**: generational keys turn stale connections into no-ops
//!
//! ## Example
//!
//! ```rust,no_run
//! use observable::prelude::*;
//!
//! let clicked: Signal<(i32, i32)> = Signal::new();
//!
//! let _guard = clicked.connect_scoped(|(x, y)| println!("clicked at {x},{y}"));
//! clicked.connect_with(|connection, _| {
//!     println!("first click only");
//!     connection.disconnect();
//! });
//!
//! clicked.emit((10, 20));
//! clicked.emit((30, 40));
//! ```

mod config;
mod connection;
mod error;
mod registry;
mod signal;
mod slot;
mod stream;

pub use config::{SignalConfig, DEFAULT_COMPACT_AFTER};
pub use connection::{Connection, ScopedConnection};
pub use error::SignalError;
pub use registry::SlotId;
pub use signal::{Emitter, Signal};
pub use stream::SignalStream;

// Re-export the prelude
pub mod prelude {
    pub use crate::{Connection, Emitter, ScopedConnection, Signal, SignalConfig, SignalStream};
}
