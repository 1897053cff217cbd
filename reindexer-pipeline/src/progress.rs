//! Progress counters shared by fetchers and loaders.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A monotonically increasing counter safe to bump from any task.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` and return the new total.
    pub fn add(&self, n: u64) -> u64 {
        self.0.fetch_add(n, Ordering::Relaxed) + n
    }

    pub fn snapshot(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fetched and sent totals of one run.
///
/// Cloning shares the underlying counters.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub fetched: Arc<Counter>,
    pub sent: Arc<Counter>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            fetched: self.fetched.snapshot(),
            sent: self.sent.snapshot(),
        }
    }
}

/// Point-in-time copy of the progress counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub fetched: u64,
    pub sent: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let progress = Progress::new();
        let mut handles = Vec::new();

        for _ in 0..8 {
            let progress = progress.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..1000 {
                    progress.fetched.add(1);
                }
                progress.sent.add(10);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(
            progress.snapshot(),
            ProgressSnapshot {
                fetched: 8000,
                sent: 80
            }
        );
    }
}
