//! Sticker id generation.

use crate::sticker::StickerId;
use uuid::Uuid;

/// Source of fresh sticker ids.
///
/// Implementations must never hand out the same id twice within a session.
pub trait IdGenerator {
    fn next_id(&mut self) -> StickerId;
}

/// Random v4 UUIDs, the default for live boards.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> StickerId {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` ids, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> StickerId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut ids = UuidGenerator;
        let generated: HashSet<_> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);
        assert!(generated.iter().all(|id| Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("sticker");
        assert_eq!(ids.next_id(), "sticker-1");
        assert_eq!(ids.next_id(), "sticker-2");
    }
}
