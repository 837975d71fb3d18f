//! Async Stream Example
//!
//! Demonstrates consuming signal emissions from an async task.

use futures::executor::block_on;
use futures::StreamExt;
use observable::prelude::*;
use std::thread;

fn main() {
    tracing_subscriber::fmt::init();

    let downloaded: Signal<(String, usize)> =
        Signal::with_config(SignalConfig::default().with_label("downloaded"));
    let mut progress = downloaded.stream();

    let worker = thread::spawn(move || {
        for (index, name) in ["alpha", "beta", "gamma"].into_iter().enumerate() {
            downloaded.emit((name.to_string(), (index + 1) * 1024));
        }
        // Dropping the signal ends the stream.
    });

    block_on(async {
        while let Some((name, bytes)) = progress.next().await {
            println!("{name}: {bytes} bytes");
        }
    });

    worker.join().ok();
}
