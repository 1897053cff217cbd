//! Request types for paged and delta reads.

use std::fmt;
use std::str::FromStr;

use reindexer_shared::ShardSpec;
use thiserror::Error;

/// One cursor step of a sharded scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Shard whose keys are selected.
    pub shard: ShardSpec,
    /// Only keys strictly greater than this are returned.
    pub after_key: u64,
    /// Maximum number of distinct keys in the page.
    pub limit: u32,
}

/// Column ordering a delta scan, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaField {
    Signup,
    LastLogin,
    Modified,
}

impl DeltaField {
    pub fn column(&self) -> &'static str {
        match self {
            DeltaField::Signup => "signup",
            DeltaField::LastLogin => "last_login",
            DeltaField::Modified => "modified",
        }
    }
}

impl fmt::Display for DeltaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Returned when a delta sort field is not one of the supported columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Sort field must be one of [signup, last_login, modified], got `{0}`")]
pub struct UnknownDeltaField(pub String);

impl FromStr for DeltaField {
    type Err = UnknownDeltaField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(DeltaField::Signup),
            "last_login" => Ok(DeltaField::LastLogin),
            "modified" => Ok(DeltaField::Modified),
            other => Err(UnknownDeltaField(other.to_string())),
        }
    }
}

/// One page of a delta scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaRequest {
    pub field: DeltaField,
    pub limit: u32,
    /// Rows already read by earlier pages of the same scan.
    pub offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_field_parse() {
        assert_eq!("signup".parse(), Ok(DeltaField::Signup));
        assert_eq!("last_login".parse(), Ok(DeltaField::LastLogin));
        assert_eq!("modified".parse(), Ok(DeltaField::Modified));
        assert_eq!(
            "password".parse::<DeltaField>(),
            Err(UnknownDeltaField("password".to_string()))
        );
    }
}
