//! Consuming a signal as an async stream.
//!
//! Each emission is forwarded through an unbounded channel, so the stream can
//! be polled from any executor while the signal is fired synchronously.

use crate::connection::ScopedConnection;
use crate::signal::Signal;
use crate::slot::Slot;
use futures::channel::mpsc;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};

/// A [`Stream`] of the arguments a signal is fired with.
///
/// Dropping the stream disconnects it from the signal. The stream ends once
/// the signal is dropped.
#[must_use = "streams do nothing unless polled"]
pub struct SignalStream<Args> {
    rx: mpsc::UnboundedReceiver<Args>,
    _connection: ScopedConnection,
}

impl<Args: Clone + Send + 'static, R: 'static> Signal<Args, R> {
    /// Subscribe to this signal as an async stream.
    ///
    /// The forwarding slot produces no result, so it never affects what
    /// `emit` returns.
    pub fn stream(&self) -> SignalStream<Args> {
        let (tx, rx) = mpsc::unbounded::<Args>();
        let connection = self.attach_with(|connection| {
            Slot::skippable(move |args| {
                if tx.unbounded_send(args).is_err() {
                    // Receiver is gone, nobody is listening anymore.
                    connection.disconnect();
                }
                None
            })
        });

        SignalStream {
            rx,
            _connection: connection.scoped(),
        }
    }
}

impl<Args> Stream for SignalStream<Args> {
    type Item = Args;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Args>> {
        self.rx.poll_next_unpin(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_stream_receives_emissions() {
        let signal: Signal<i32> = Signal::new();
        let mut stream = signal.stream();

        signal.emit(1);
        signal.emit(2);

        block_on(async {
            assert_eq!(stream.next().await, Some(1));
            assert_eq!(stream.next().await, Some(2));
        });
    }

    #[test]
    fn test_stream_ends_when_signal_dropped() {
        let signal: Signal<&'static str> = Signal::new();
        let stream = signal.stream();
        signal.emit("last");
        drop(signal);

        let items: Vec<&str> = block_on(stream.collect());
        assert_eq!(items, vec!["last"]);
    }

    #[test]
    fn test_dropping_stream_disconnects() {
        let signal: Signal<i32> = Signal::new();
        let stream = signal.stream();
        assert_eq!(signal.len(), 1);

        drop(stream);
        assert!(signal.is_empty());
    }

    #[test]
    fn test_stream_slot_does_not_affect_result() {
        let signal: Signal<i32, i32> = Signal::new();
        signal.connect(|x| x * 2);
        let mut stream = signal.stream();

        assert_eq!(signal.emit(21), 42);
        assert_eq!(block_on(stream.next()), Some(21));
    }
}
