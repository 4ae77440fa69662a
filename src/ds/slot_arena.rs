//! Slot arena with generation-checked handles.
//!
//! Entries live in a `Vec` of slots; freed slots are recycled through a free
//! list. Each slot carries a generation that is bumped whenever its occupant
//! is removed, and every [`SlotId`] remembers the generation it was issued
//! for. A handle that outlives its entry therefore resolves to `None` even
//! after the slot has been reused, instead of silently aliasing a newer
//! entry.
//!
//! ```text
//!   slots: [ {gen 0, Some(A)} | {gen 1, None} | {gen 3, Some(C)} ]
//!   free_list: [1]
//!
//!   SlotId { index: 2, generation: 3 } -> C
//!   SlotId { index: 2, generation: 2 } -> None (stale)
//! ```

/// Stable handle to an arena entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Vec-backed arena handing out [`SlotId`] handles.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a freed slot if any.
    pub fn insert(&mut self, value: T) -> SlotId {
        let index = match self.free_list.pop() {
            Some(index) => {
                self.slots[index].value = Some(value);
                index
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                self.slots.len() - 1
            },
        };
        self.len += 1;
        SlotId {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Removes the entry behind `id`; stale or unknown handles return `None`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every entry. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(index);
        }
        // Pop order favours low indices on reuse.
        self.free_list.reverse();
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_reuses_slot() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index, id3.index);
        assert_ne!(id1.generation, id3.generation);
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut arena = SlotArena::new();
        let old = arena.insert(1);
        arena.remove(old);
        let new = arena.insert(2);

        assert_eq!(old.index, new.index);
        assert_eq!(arena.get(old), None);
        assert!(!arena.contains(old));
        assert_eq!(arena.remove(old), None);
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut arena = SlotArena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), None);

        let c = arena.insert('c');
        assert_eq!(c.index, 0);
        assert_eq!(arena.get(c), Some(&'c'));
        assert_eq!(arena.get(a), None);
    }

    #[test]
    fn removing_middle_slot_leaves_neighbours_live() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert(10);
        let b = arena.insert(20);
        let c = arena.insert(30);
        assert_eq!(arena.remove(b), Some(20));

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&10));
        assert_eq!(arena.get(c), Some(&30));
        assert_eq!(arena.get(b), None);
        assert_eq!(arena.free_list, vec![b.index]);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(String::from("x"));
        arena.get_mut(id).unwrap().push('y');
        assert_eq!(arena.get(id).map(String::as_str), Some("xy"));
    }
}
