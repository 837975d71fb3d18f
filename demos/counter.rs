//! Counter example demonstrating observable signals.
//!
//! This example shows:
//! - Connecting closures and object methods
//! - Scoped connections tied to an observer's lifetime
//! - Folding slot results
//! - Self-disconnecting and re-firing slots

use observable::prelude::*;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

struct Counter {
    count: AtomicI32,
    _connection: ScopedConnection,
}

impl Counter {
    fn new(changed: &Signal<i32, i32>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            count: AtomicI32::new(0),
            _connection: changed
                .connect_method(this.clone(), |counter: &Counter, delta| counter.change_by(delta))
                .scoped(),
        })
    }

    fn change_by(&self, delta: i32) -> i32 {
        self.count.fetch_add(delta, Ordering::SeqCst) + delta
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let changed: Signal<i32, i32> =
        Signal::with_config(SignalConfig::default().with_label("counter_changed"));

    let first = Counter::new(&changed);
    {
        let second = Counter::new(&changed);
        println!("last result: {}", changed.emit(1));
        println!(
            "largest count: {}",
            changed.emit_fold(2, i32::MIN, i32::max)
        );
        println!("second counter saw {}", second.count.load(Ordering::SeqCst));
    }

    // `second` is gone, its slot went with it.
    println!("slots after drop: {}", changed.len());
    println!("every result: {:?}", changed.collect(5));

    let countdown: Signal<u32> = Signal::new();
    let emitter = countdown.emitter();
    countdown.connect_with(move |connection, remaining| {
        println!("countdown {remaining}");
        if remaining > 0 {
            emitter.emit(remaining - 1);
        } else {
            connection.disconnect();
        }
    });
    countdown.emit(3);
    println!("countdown slots left: {}", countdown.len());

    println!("first counter ended at {}", first.count.load(Ordering::SeqCst));
}
