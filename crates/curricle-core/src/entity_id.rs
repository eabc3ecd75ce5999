//! Entity identifiers
//!
//! Modules and items share one id scheme: the current Unix timestamp in
//! milliseconds, rendered as a decimal string. A process-wide monotonic
//! floor bumps the value whenever two ids are requested inside the same
//! millisecond, so generated ids are unique for the life of the process.
//! Ids read back from storage or an imported file are accepted as-is.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Lowest value the next generated id may take.
static NEXT_FLOOR: AtomicI64 = AtomicI64::new(0);

/// Identifier for a module or an item
///
/// Time-derived and immutable after creation. Serializes as a plain
/// JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh id from the current wall clock
    ///
    /// Callers racing the clock get consecutive values instead of
    /// duplicates.
    pub fn generate() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut assigned = now;
        let _ = NEXT_FLOOR.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |floor| {
            assigned = now.max(floor);
            Some(assigned + 1)
        });
        Self(assigned.to_string())
    }

    /// View the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<EntityId> = (0..1000).map(|_| EntityId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_ids_are_decimal() {
        let id = EntityId::generate();
        assert!(!id.as_str().is_empty());
        assert!(id.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generated_ids_increase() {
        let a = EntityId::generate();
        let b = EntityId::generate();
        let a_val: i64 = a.as_str().parse().unwrap();
        let b_val: i64 = b.as_str().parse().unwrap();
        assert!(b_val > a_val);
    }

    #[test]
    fn test_display_matches_as_str() {
        let id = EntityId::from("1700000000000");
        assert_eq!(format!("{}", id), "1700000000000");
        assert_eq!(id.as_str(), "1700000000000");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = EntityId::from("42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"42\"");

        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
