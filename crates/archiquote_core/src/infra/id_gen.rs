//! Identifier generation collaborator.

use crate::model::RecordId;
use std::cell::Cell;
use uuid::Uuid;

/// Produces a fresh, never-reused opaque identifier per call.
pub trait IdGenerator {
    fn next_id(&self) -> RecordId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> RecordId {
        Uuid::new_v4().to_string()
    }
}

/// Predictable `<prefix>-<n>` identifiers, starting at 1.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> RecordId {
        let value = self.next.get();
        self.next.set(value + 1);
        format!("{}-{value}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, SequentialIds, UuidIds};

    #[test]
    fn sequential_ids_never_repeat() {
        let ids = SequentialIds::new("rec");
        assert_eq!(ids.next_id(), "rec-1");
        assert_eq!(ids.next_id(), "rec-2");
    }

    #[test]
    fn uuid_ids_are_distinct() {
        assert_ne!(UuidIds.next_id(), UuidIds.next_id());
    }
}
