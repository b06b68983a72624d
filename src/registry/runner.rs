//! Per-stream poll loop
//!
//! Each running stream owns one task. The task ticks on the stream's
//! interval, firing the first cycle immediately. A cycle runs to completion
//! before the next tick is awaited and missed ticks are skipped, so cycles
//! of one stream never overlap and cache writes stay in order.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;

use crate::stream::{Batch, CycleError, Fetcher, StreamConfig, StreamDataPoint};

use super::entry::StreamEntry;
use super::observer::RegistryObserver;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Poll `entry` forever; ends only when the task is aborted
pub(super) async fn run_stream(
    stream_id: String,
    entry: Arc<StreamEntry>,
    fetcher: Fetcher,
    observer: Arc<dyn RegistryObserver>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        run_cycle(&stream_id, &entry, &fetcher, observer.as_ref()).await;
    }
}

/// Fetch, parse, cache and dispatch once
///
/// Never panics and never returns an error: failures go to listeners.
pub(super) async fn run_cycle(
    stream_id: &str,
    entry: &StreamEntry,
    fetcher: &Fetcher,
    observer: &dyn RegistryObserver,
) {
    let started = Instant::now();
    let config = entry.config();

    match produce(&config, fetcher).await {
        Ok(points) => {
            let batch: Batch = points.into();
            entry.store_batch(Arc::clone(&batch));

            let listeners = entry.listeners();
            for listener in &listeners {
                guard_listener(stream_id, || listener.on_data(&batch));
            }

            observer.cycle_completed(stream_id, batch.len(), listeners.len(), started.elapsed());
        }
        Err(error) => {
            let consecutive = entry.record_failure();
            observer.cycle_failed(stream_id, &error, consecutive);

            for listener in &entry.listeners() {
                guard_listener(stream_id, || listener.on_error(&error));
            }
        }
    }
}

async fn produce(config: &StreamConfig, fetcher: &Fetcher) -> Result<Vec<StreamDataPoint>, CycleError> {
    let raw = match config.endpoint {
        Some(ref endpoint) => Some(fetcher.fetch_json(endpoint).await?),
        None => None,
    };

    let parser = Arc::clone(&config.parser);
    match panic::catch_unwind(AssertUnwindSafe(|| parser.parse(raw.as_ref()))) {
        Ok(result) => Ok(result?),
        Err(payload) => Err(CycleError::ParserPanicked(panic_message(payload.as_ref()))),
    }
}

fn guard_listener(stream_id: &str, callback: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
        tracing::error!(
            stream = %stream_id,
            panic = %panic_message(payload.as_ref()),
            "Listener panicked"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value;

    use super::*;
    use crate::registry::listener::{FnListener, StreamListener};
    use crate::registry::observer::TracingObserver;
    use crate::stream::{parser_fn, ParseError, Payload};

    fn entry_with(parser: impl crate::stream::PayloadParser + 'static) -> StreamEntry {
        let config = StreamConfig::builder("t", "Test").parser(parser).build().unwrap();
        StreamEntry::new(config)
    }

    #[tokio::test]
    async fn test_cycle_caches_and_dispatches() {
        let entry = entry_with(parser_fn(|_| {
            Ok(vec![StreamDataPoint::new("p1", Payload::Json(Value::Null), "test")])
        }));
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let listener: Arc<dyn StreamListener> = Arc::new(FnListener::new(move |batch| {
            assert_eq!(batch.len(), 1);
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        entry.add_listener(1, listener);

        run_cycle("t", &entry, &Fetcher::default(), &TracingObserver).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(entry.latest().unwrap()[0].id, "p1");
        assert_eq!(entry.status("t").cycles, 1);
    }

    #[tokio::test]
    async fn test_parser_error_keeps_cache() {
        let entry = entry_with(parser_fn(|_| Err(ParseError::new("bad input"))));
        let errors = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&errors);
        let listener: Arc<dyn StreamListener> = Arc::new(
            FnListener::new(|_| panic!("no data expected")).on_error(move |err| {
                assert!(matches!(err, CycleError::Parse(_)));
                seen.fetch_add(1, Ordering::SeqCst);
            }),
        );
        entry.add_listener(1, listener);

        run_cycle("t", &entry, &Fetcher::default(), &TracingObserver).await;
        run_cycle("t", &entry, &Fetcher::default(), &TracingObserver).await;

        assert_eq!(errors.load(Ordering::SeqCst), 2);
        assert!(entry.latest().is_none());
        let status = entry.status("t");
        assert_eq!(status.failures, 2);
        assert_eq!(status.consecutive_failures, 2);
    }

    #[tokio::test]
    async fn test_parser_panic_is_contained() {
        let entry = entry_with(parser_fn(|_| panic!("parser exploded")));
        let message = Arc::new(parking_lot::Mutex::new(String::new()));
        let seen = Arc::clone(&message);
        let listener: Arc<dyn StreamListener> =
            Arc::new(FnListener::new(|_| {}).on_error(move |err| {
                *seen.lock() = err.to_string();
            }));
        entry.add_listener(1, listener);

        run_cycle("t", &entry, &Fetcher::default(), &TracingObserver).await;

        assert_eq!(*message.lock(), "parser panicked: parser exploded");
    }

    #[tokio::test]
    async fn test_listener_panic_does_not_skip_others() {
        let entry = entry_with(parser_fn(|_| Ok(Vec::new())));
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        entry.add_listener(1, Arc::new(FnListener::new(|_| panic!("listener exploded"))));
        entry.add_listener(
            2,
            Arc::new(FnListener::new(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })),
        );

        run_cycle("t", &entry, &Fetcher::default(), &TracingObserver).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_resets_consecutive_failures() {
        let fail = Arc::new(std::sync::atomic::AtomicBool::new(true));
        let flag = Arc::clone(&fail);
        let entry = entry_with(parser_fn(move |_| {
            if flag.load(Ordering::SeqCst) {
                Err(ParseError::new("not yet"))
            } else {
                Ok(Vec::new())
            }
        }));

        run_cycle("t", &entry, &Fetcher::default(), &TracingObserver).await;
        fail.store(false, Ordering::SeqCst);
        run_cycle("t", &entry, &Fetcher::default(), &TracingObserver).await;

        let status = entry.status("t");
        assert_eq!(status.failures, 1);
        assert_eq!(status.consecutive_failures, 0);
        assert_eq!(status.cycles, 1);
    }
}
