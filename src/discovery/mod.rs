//! JS asset discovery module.
//!
//! This module handles the two network phases of a scan:
//! - Crawling each candidate host's root page for script tags
//! - Fetching the bodies of the discovered script URLs
//!
//! Both phases run under the same bounded-concurrency runner.

pub mod page_crawler;
pub mod script_fetcher;

pub use page_crawler::PageCrawler;
pub use script_fetcher::ScriptFetcher;

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Run one unit of work per item with at most `limit` in flight.
///
/// A semaphore permit is acquired before each task is spawned and released
/// when the task finishes, so no more than `limit` units ever run at once.
/// The call returns only after every spawned unit has completed; `progress`
/// is incremented once per completed unit. When `abort` is set, no further
/// units are scheduled, but units already holding a permit run to completion.
pub(crate) async fn run_bounded<T, R, F, Fut>(
    items: Vec<T>,
    limit: usize,
    abort: Arc<AtomicBool>,
    progress: Arc<AtomicUsize>,
    work: F,
) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut handles = Vec::with_capacity(items.len());

    for item in items {
        if abort.load(Ordering::SeqCst) {
            debug!("abort requested, skipping remaining units");
            break;
        }

        // The semaphore is never closed, so acquisition only fails if it
        // were dropped, which cannot happen while we hold an Arc to it.
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(p) => p,
            Err(_) => break,
        };

        let work = work.clone();
        let progress = progress.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            let result = work(item).await;
            progress.fetch_add(1, Ordering::SeqCst);
            result
        }));
    }

    futures::future::join_all(handles)
        .await
        .into_iter()
        .filter_map(|joined| match joined {
            Ok(result) => Some(result),
            Err(e) => {
                debug!("task join error: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_in_flight_never_exceeds_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let abort = Arc::new(AtomicBool::new(false));
        let progress = Arc::new(AtomicUsize::new(0));

        let items: Vec<usize> = (0..32).collect();
        let limit = 4;

        let in_flight_clone = in_flight.clone();
        let peak_clone = peak.clone();
        let results = run_bounded(items, limit, abort, progress.clone(), move |n| {
            let in_flight = in_flight_clone.clone();
            let peak = peak_clone.clone();
            async move {
                let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(current, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                n
            }
        })
        .await;

        assert_eq!(results.len(), 32);
        assert!(peak.load(Ordering::SeqCst) <= limit);
        assert_eq!(progress.load(Ordering::SeqCst), 32);
    }

    #[tokio::test]
    async fn test_returns_only_after_all_units_complete() {
        let abort = Arc::new(AtomicBool::new(false));
        let progress = Arc::new(AtomicUsize::new(0));

        let results = run_bounded(
            (0..10).collect::<Vec<usize>>(),
            3,
            abort,
            progress.clone(),
            |n| async move {
                tokio::time::sleep(Duration::from_millis(n as u64)).await;
                n * 2
            },
        )
        .await;

        // All units joined regardless of their relative completion order.
        assert_eq!(results.len(), 10);
        assert_eq!(progress.load(Ordering::SeqCst), 10);
        assert_eq!(results.iter().sum::<usize>(), 90);
    }

    #[tokio::test]
    async fn test_abort_suppresses_new_units() {
        let abort = Arc::new(AtomicBool::new(true));
        let progress = Arc::new(AtomicUsize::new(0));

        let results = run_bounded(
            (0..10).collect::<Vec<usize>>(),
            2,
            abort,
            progress.clone(),
            |n| async move { n },
        )
        .await;

        assert!(results.is_empty());
        assert_eq!(progress.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_limit_of_zero_is_treated_as_one() {
        let abort = Arc::new(AtomicBool::new(false));
        let progress = Arc::new(AtomicUsize::new(0));

        let results = run_bounded(
            vec![1, 2, 3],
            0,
            abort,
            progress,
            |n| async move { n },
        )
        .await;

        assert_eq!(results.len(), 3);
    }
}
