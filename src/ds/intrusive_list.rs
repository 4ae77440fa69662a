//! Doubly linked list whose nodes live in a [`SlotArena`].
//!
//! Nodes are linked by [`SlotId`] rather than by pointer, so a caller can keep
//! the handle returned by `push_front`/`push_back` in an index and later move
//! or unlink that node in O(1) without walking the list.
//!
//! ```text
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!            front                    back
//! ```
//!
//! The LRU store keeps MRU at the front; the hybrid store only appends at the
//! back so iteration yields insertion order.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list addressed by [`SlotId`].
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Links a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        id
    }

    /// Links a new node at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.attach_back(id);
        id
    }

    /// Unlinks and returns the back node.
    pub fn pop_back(&mut self) -> Option<(SlotId, T)> {
        let id = self.tail?;
        self.remove(id).map(|value| (id, value))
    }

    /// Unlinks the node behind `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Relinks `id` at the front; `false` if the handle is not live.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates `(SlotId, &T)` from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.len(),
        }
    }

    /// Walks the links and checks them against the arena.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.head.is_none() != self.tail.is_none() {
            return Err(InvariantError::new(format!(
                "list head {:?} and tail {:?} disagree on emptiness",
                self.head, self.tail
            )));
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("list links stale handle {:?}", id)))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node {:?} prev is {:?}, expected {:?}",
                    id, node.prev, prev
                )));
            }
            count += 1;
            if count > self.arena.len() {
                return Err(InvariantError::new("list contains a cycle"));
            }
            prev = Some(id);
            current = node.next;
        }

        if self.tail != prev {
            return Err(InvariantError::new(format!(
                "list tail is {:?}, walk ended at {:?}",
                self.tail, prev
            )));
        }
        if count != self.arena.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes but arena holds {}",
                count,
                self.arena.len()
            )));
        }
        Ok(())
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(node) = self.arena.get_mut(prev_id) {
                    node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(node) = self.arena.get_mut(next_id) {
                    node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => {
                if let Some(node) = self.arena.get_mut(head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    fn attach_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(tail) => {
                if let Some(node) = self.arena.get_mut(tail) {
                    node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over an [`IntrusiveList`].
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().map(|(_, v)| *v).collect()
    }

    #[test]
    fn push_front_and_back_order() {
        let mut list = IntrusiveList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);

        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.back(), Some(&3));
        list.validate().unwrap();
    }

    #[test]
    fn move_to_front_reorders() {
        let mut list = IntrusiveList::new();
        let a = list.push_back('a');
        let _b = list.push_back('b');
        let c = list.push_back('c');

        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!['c', 'a', 'b']);
        assert!(list.move_to_front(c));
        assert_eq!(values(&list), vec!['c', 'a', 'b']);
        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!['a', 'c', 'b']);
        list.validate().unwrap();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(values(&list), vec![1, 3]);
        assert_eq!(list.remove(a), Some(1));
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back_id(), Some(c));
        assert_eq!(list.remove(c), Some(3));
        assert!(list.is_empty());
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        list.validate().unwrap();
    }

    #[test]
    fn pop_back_returns_handle_and_value() {
        let mut list = IntrusiveList::new();
        let _a = list.push_front("a");
        let b = list.push_back("b");

        assert_eq!(list.pop_back(), Some((b, "b")));
        assert_eq!(list.pop_back().map(|(_, v)| v), Some("a"));
        assert_eq!(list.pop_back(), None);
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        list.remove(a);
        let _b = list.push_back(2);

        assert!(!list.contains(a));
        assert!(!list.move_to_front(a));
        assert_eq!(list.remove(a), None);
        assert_eq!(values(&list), vec![2]);
    }

    #[test]
    fn clear_empties_list() {
        let mut list = IntrusiveList::with_capacity(8);
        for i in 0..5 {
            list.push_front(i);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        list.validate().unwrap();
    }
}
