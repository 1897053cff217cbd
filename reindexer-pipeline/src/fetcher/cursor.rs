//! Resumable per-shard key cursor.

use reindexer_shared::{Identifiable, ShardSpec};
use reindexer_source::PageRequest;

/// Tracks the last key seen by one shard scan.
///
/// Each page asks for keys strictly greater than the last one seen, so a scan
/// always moves forward and never emits a key twice. Rows inserted behind the
/// cursor while the scan runs are missed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardCursor {
    shard: ShardSpec,
    limit: u32,
    last_key: u64,
    done: bool,
}

impl ShardCursor {
    pub fn new(shard: ShardSpec, limit: u32) -> Self {
        Self {
            shard,
            limit,
            last_key: 0,
            done: limit == 0,
        }
    }

    pub fn shard(&self) -> ShardSpec {
        self.shard
    }

    pub fn last_key(&self) -> u64 {
        self.last_key
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The next page to read, or `None` once the shard is exhausted.
    pub fn next_request(&self) -> Option<PageRequest> {
        if self.done {
            return None;
        }
        Some(PageRequest {
            shard: self.shard,
            after_key: self.last_key,
            limit: self.limit,
        })
    }

    /// Record a fetched page and return its number of distinct keys.
    ///
    /// An empty page, or one holding fewer distinct keys than the limit, is
    /// the last page of the shard.
    pub fn advance<R: Identifiable>(&mut self, rows: &[R]) -> usize {
        let mut distinct = 0usize;
        let mut previous = None;

        for row in rows {
            let key = row.id();
            if previous != Some(key) {
                distinct += 1;
                previous = Some(key);
            }
        }

        if let Some(key) = previous {
            self.last_key = self.last_key.max(key);
        }
        if distinct < self.limit as usize {
            self.done = true;
        }

        distinct
    }
}
