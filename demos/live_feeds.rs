//! Live Kenya digital twin feeds
//!
//! Run with: cargo run --example live_feeds
//!
//! Registers the Kenya streams, prints every batch as it lands and refreshes
//! a status board every 2 seconds, like the dashboard panel that consumes
//! these streams. Press Ctrl-C to stop all streams and exit.
//!
//! Set `RUST_LOG=twin_streams=debug` to see per-cycle events.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use twin_streams::feeds;
use twin_streams::{Batch, CycleError, Payload, StreamListener, StreamRegistry};

/// Prints each batch with a per-kind summary
struct Printer {
    stream_id: String,
}

impl StreamListener for Printer {
    fn on_data(&self, batch: &Batch) {
        println!("[{}] {} points", self.stream_id, batch.len());
        for point in batch.iter().take(5) {
            let label = match point.value {
                Payload::Aviation(_) => "aircraft",
                Payload::Commodity(_) => "price",
                Payload::GridLoad(_) => "grid",
                Payload::Traffic(_) => "traffic",
                Payload::Weather(_) => "weather",
                Payload::AirQuality(_) => "air",
                Payload::Json(_) => "raw",
            };
            println!("  {:<8} {:<28} {}", label, point.id, point.value.summary());
        }
        if batch.len() > 5 {
            println!("  ... {} more", batch.len() - 5);
        }
    }

    fn on_error(&self, error: &CycleError) {
        println!("[{}] cycle failed: {}", self.stream_id, error);
    }
}

fn print_status_board(registry: &StreamRegistry) {
    println!("{:<20} {:<8} {:>7} {:>7} {:>9}", "stream", "state", "points", "cycles", "failures");
    for status in registry.statuses() {
        println!(
            "{:<20} {:<8} {:>7} {:>7} {:>9}",
            status.id,
            if status.running { "running" } else { "stopped" },
            status.data_points,
            status.cycles,
            status.failures,
        );
    }
}

#[tokio::main]
async fn main() -> twin_streams::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("twin_streams=info")),
        )
        .init();

    let registry = Arc::new(StreamRegistry::new());
    feeds::initialize_streams(&registry)?;

    let mut subscriptions = Vec::new();
    for stream_id in registry.stream_ids() {
        let printer = Printer {
            stream_id: stream_id.clone(),
        };
        subscriptions.push(registry.subscribe(&stream_id, printer)?);
    }

    let started = feeds::start_all_streams(&registry);
    println!("Started {} streams", started);

    let mut board = tokio::time::interval(Duration::from_secs(2));
    loop {
        tokio::select! {
            _ = board.tick() => print_status_board(&registry),
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    drop(subscriptions);
    registry.shutdown();
    print_status_board(&registry);

    Ok(())
}
