//! Modulo partitioning of an unsigned key space.
//!
//! A shard owns every key for which `key % count == id`. The assignment only
//! depends on `count`, so a full scan over shards `0..count` visits every key
//! exactly once.

use thiserror::Error;

/// Errors raised when a shard layout is constructed with invalid arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// The shard count must be at least one.
    #[error("shard count must be at least 1")]
    ZeroShards,

    /// The shard id is outside `0..count`.
    #[error("shard id {id} is out of range for {count} shards")]
    OutOfRange { id: u32, count: u32 },
}

/// One shard of a `count`-way modulo partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardSpec {
    count: u32,
    id: u32,
}

impl ShardSpec {
    /// Create the shard `id` of a `count`-way partition.
    pub fn new(count: u32, id: u32) -> Result<Self, PartitionError> {
        if count == 0 {
            return Err(PartitionError::ZeroShards);
        }
        if id >= count {
            return Err(PartitionError::OutOfRange { id, count });
        }
        Ok(Self { count, id })
    }

    /// The single shard covering the whole key space.
    pub fn whole() -> Self {
        Self { count: 1, id: 0 }
    }

    /// All shards of a `count`-way partition, in id order.
    pub fn all(count: u32) -> Result<Vec<Self>, PartitionError> {
        if count == 0 {
            return Err(PartitionError::ZeroShards);
        }
        Ok((0..count).map(|id| Self { count, id }).collect())
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Whether `key` belongs to this shard.
    pub fn owns(&self, key: u64) -> bool {
        key % u64::from(self.count) == u64::from(self.id)
    }

    /// SQL predicate selecting this shard's rows of `column`.
    ///
    /// Both operands are validated integers, so the fragment is safe to
    /// splice into a statement.
    pub fn predicate(&self, column: &str) -> String {
        format!("{} % {} = {}", column, self.count, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rejects_zero_shards() {
        assert_eq!(ShardSpec::new(0, 0), Err(PartitionError::ZeroShards));
        assert_eq!(ShardSpec::all(0), Err(PartitionError::ZeroShards));
    }

    #[test]
    fn test_rejects_out_of_range_id() {
        assert_eq!(
            ShardSpec::new(4, 4),
            Err(PartitionError::OutOfRange { id: 4, count: 4 })
        );
    }

    #[test]
    fn test_partition_is_disjoint_and_total() {
        for count in 1..=7u32 {
            let shards = ShardSpec::all(count).unwrap();
            let mut seen = HashSet::new();

            for key in 0..500u64 {
                let owners: Vec<_> = shards.iter().filter(|s| s.owns(key)).collect();
                assert_eq!(owners.len(), 1, "key {} with {} shards", key, count);
                seen.insert(key);
            }

            assert_eq!(seen.len(), 500);
        }
    }

    #[test]
    fn test_predicate() {
        let shard = ShardSpec::new(8, 3).unwrap();
        assert_eq!(shard.predicate("u.id"), "u.id % 8 = 3");
        assert_eq!(ShardSpec::whole().predicate("id"), "id % 1 = 0");
    }
}
