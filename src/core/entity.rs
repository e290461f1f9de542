//! Entity identification for combat sessions.
//!
//! Heroes, enemies, and card instances share one id space. Every id handed
//! out during an encounter comes from an `EntityAllocator`, so summoned
//! enemies never collide with the roster or the deck.
//!
//! ```
//! use longwar_combat::core::{EntityAllocator, EntityId};
//!
//! let mut ids = EntityAllocator::new();
//! let hero = ids.alloc();
//! let card = ids.alloc();
//!
//! assert_eq!(hero, EntityId(1));
//! assert_ne!(hero, card);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a hero, enemy, or card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic id source.
///
/// Id 0 is never allocated so it can be used as a sentinel in external
/// tooling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at id 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Create an allocator that continues after the given ids.
    #[must_use]
    pub fn after(existing: impl IntoIterator<Item = EntityId>) -> Self {
        let highest = existing.into_iter().map(EntityId::raw).max().unwrap_or(0);
        Self { next: highest + 1 }
    }

    /// Allocate a new entity ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Peek at the id the next `alloc` will return.
    #[must_use]
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_sequential() {
        let mut ids = EntityAllocator::new();
        assert_eq!(ids.alloc(), EntityId(1));
        assert_eq!(ids.alloc(), EntityId(2));
        assert_eq!(ids.peek(), EntityId(3));
    }

    #[test]
    fn test_after_existing() {
        let mut ids = EntityAllocator::after([EntityId(4), EntityId(17), EntityId(9)]);
        assert_eq!(ids.alloc(), EntityId(18));

        let mut empty = EntityAllocator::after(std::iter::empty());
        assert_eq!(empty.alloc(), EntityId(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(7)), "Entity(7)");
    }
}
