//! Fixed-capacity slot arrays
//!
//! Entities are never inserted or removed after construction. Each slot
//! carries its own active flag; claiming a slot means finding the first
//! inactive one, and freeing it means clearing the flag.

use serde::{Deserialize, Serialize};

/// An entity that can occupy a slot
pub trait Slot: Default {
    fn is_active(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slots<T> {
    items: Vec<T>,
}

impl<T: Slot> Slots<T> {
    /// Allocate `capacity` inactive slots up front
    pub fn new(capacity: usize) -> Self {
        Self {
            items: (0..capacity).map(|_| T::default()).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Index of the first inactive slot, if any
    pub fn first_free(&self) -> Option<usize> {
        self.items.iter().position(|item| !item.is_active())
    }

    /// Reset the first inactive slot to `item` and return its index.
    ///
    /// Returns `None` without touching anything when every slot is in use.
    pub fn claim(&mut self, item: T) -> Option<usize> {
        let index = self.first_free()?;
        self.items[index] = item;
        Some(index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Active entries with their slot index, in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().enumerate().filter(|(_, item)| item.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .filter(|(_, item)| item.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Probe {
        active: bool,
        tag: u32,
    }

    impl Slot for Probe {
        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn probe(tag: u32) -> Probe {
        Probe { active: true, tag }
    }

    #[test]
    fn starts_empty() {
        let slots: Slots<Probe> = Slots::new(4);
        assert_eq!(slots.capacity(), 4);
        assert_eq!(slots.active_count(), 0);
        assert_eq!(slots.first_free(), Some(0));
    }

    #[test]
    fn claim_uses_first_inactive_slot() {
        let mut slots = Slots::new(3);
        assert_eq!(slots.claim(probe(1)), Some(0));
        assert_eq!(slots.claim(probe(2)), Some(1));

        slots.iter_active_mut().next().unwrap().1.active = false;
        assert_eq!(slots.claim(probe(3)), Some(0));
        assert_eq!(slots.get(0).unwrap().tag, 3);
    }

    #[test]
    fn full_array_drops_claims() {
        let mut slots = Slots::new(2);
        slots.claim(probe(1));
        slots.claim(probe(2));
        assert_eq!(slots.claim(probe(3)), None);
        let tags: Vec<u32> = slots.iter_active().map(|(_, p)| p.tag).collect();
        assert_eq!(tags, vec![1, 2]);
    }

    #[test]
    fn iter_active_skips_inactive() {
        let mut slots = Slots::new(3);
        slots.claim(probe(1));
        slots.claim(probe(2));
        slots.iter_active_mut().next().unwrap().1.active = false;
        let indices: Vec<usize> = slots.iter_active().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1]);
    }
}
