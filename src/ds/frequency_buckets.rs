//! Frequency buckets with a lazily advanced minimum.
//!
//! Every tracked value sits in exactly one bucket, keyed by its access
//! frequency. A bucket is a doubly linked list threaded through the entry
//! arena: the front holds the entry touched most recently at that frequency,
//! the back the one touched longest ago. Each bucket therefore behaves like a
//! small LRU list, and ties between equal frequencies are broken in favour of
//! evicting the least recently touched entry.
//!
//! ## Architecture
//!
//! ```text
//!   entries: SlotArena<Entry<T>>        buckets: FxHashMap<u64, Bucket>
//!   ┌──────┬──────────────────────┐
//!   │ id_0 │ freq 2, value A      │     freq 1: head ─► [id_2] ◄─► [id_1] ◄─ tail
//!   │ id_1 │ freq 1, value B      │     freq 2: head ─► [id_0] ◄─ tail
//!   │ id_2 │ freq 1, value C      │
//!   └──────┴──────────────────────┘     min_freq = 1
//! ```
//!
//! ## Minimum tracking
//!
//! `min_freq` is never recomputed by scanning. It moves in exactly two ways:
//!
//! - a touch that empties the bucket at `min_freq` bumps it by one, which is
//!   always correct because the touched entry lands in bucket `min_freq + 1`;
//! - inserting an entry resets it to 1.
//!
//! Eviction is only offered fused with an insert ([`replace_min`]), so the
//! emptied-minimum case after a pop is always immediately repaired by the
//! reset to 1.
//!
//! [`replace_min`]: FrequencyBuckets::replace_min

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Entry<T> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

/// Handle-addressed frequency buckets.
#[derive(Debug)]
pub struct FrequencyBuckets<T> {
    entries: SlotArena<Entry<T>>,
    buckets: FxHashMap<u64, Bucket>,
    // 0 means empty.
    min_freq: u64,
}

impl<T> FrequencyBuckets<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest frequency with a resident entry.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        self.entries.get(id).map(|entry| entry.freq)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.entries.get(id).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.entries.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Number of distinct frequencies currently populated.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Tracks `value` at frequency 1 and returns its handle.
    pub fn insert(&mut self, value: T) -> SlotId {
        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            value,
        });
        self.link_front(1, id);
        self.min_freq = 1;
        id
    }

    /// Bumps the frequency of `id` by one and moves it to the front of its
    /// new bucket. Returns the new frequency.
    ///
    /// At `u64::MAX` the frequency saturates; the entry is still refreshed
    /// to the front of its bucket.
    pub fn touch(&mut self, id: SlotId) -> Option<u64> {
        let freq = self.entries.get(id)?.freq;
        let next_freq = freq.saturating_add(1);

        self.unlink(freq, id)?;
        if next_freq != freq && !self.buckets.contains_key(&freq) && self.min_freq == freq {
            self.min_freq = next_freq;
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.link_front(next_freq, id);
        Some(next_freq)
    }

    /// The entry the next eviction would remove: the back of the
    /// `min_freq` bucket.
    pub fn peek_min(&self) -> Option<(SlotId, &T, u64)> {
        let id = self.buckets.get(&self.min_freq)?.tail?;
        let entry = self.entries.get(id)?;
        Some((id, &entry.value, entry.freq))
    }

    /// Evicts the least recently touched entry of the lowest frequency (if
    /// any entry exists), then tracks `value` at frequency 1.
    ///
    /// Returns the evicted value with its frequency, and the new handle.
    pub fn replace_min(&mut self, value: T) -> (Option<(T, u64)>, SlotId) {
        let evicted = self.pop_min_unchecked();
        let id = self.insert(value);
        (evicted, id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Iterates entries by ascending frequency, front to back within a
    /// bucket (so each bucket yields most recently touched first).
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T, u64)> + '_ {
        let mut freqs: Vec<u64> = self.buckets.keys().copied().collect();
        freqs.sort_unstable();
        freqs.into_iter().flat_map(move |freq| self.iter_bucket(freq))
    }

    /// Iterates one bucket front to back.
    pub fn iter_bucket(&self, freq: u64) -> BucketIter<'_, T> {
        BucketIter {
            buckets: self,
            current: self.buckets.get(&freq).and_then(|bucket| bucket.head),
        }
    }

    /// Checks bucket links, lengths, entry frequencies and `min_freq`.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.is_empty() {
            if !self.buckets.is_empty() {
                return Err(InvariantError::new(format!(
                    "no entries but {} buckets remain",
                    self.buckets.len()
                )));
            }
            if self.min_freq != 0 {
                return Err(InvariantError::new(format!(
                    "no entries but min_freq is {}",
                    self.min_freq
                )));
            }
            return Ok(());
        }

        let lowest = self.buckets.keys().copied().min().unwrap_or(0);
        if self.min_freq != lowest {
            return Err(InvariantError::new(format!(
                "min_freq is {} but lowest populated bucket is {}",
                self.min_freq, lowest
            )));
        }

        let mut total = 0usize;
        for (&freq, bucket) in &self.buckets {
            if bucket.len == 0 || bucket.head.is_none() || bucket.tail.is_none() {
                return Err(InvariantError::new(format!("bucket {} is empty", freq)));
            }
            let mut prev = None;
            let mut count = 0usize;
            let mut current = bucket.head;
            while let Some(id) = current {
                let entry = self.entries.get(id).ok_or_else(|| {
                    InvariantError::new(format!("bucket {} links stale handle {:?}", freq, id))
                })?;
                if entry.freq != freq {
                    return Err(InvariantError::new(format!(
                        "entry {:?} has freq {} but sits in bucket {}",
                        id, entry.freq, freq
                    )));
                }
                if entry.prev != prev {
                    return Err(InvariantError::new(format!(
                        "entry {:?} in bucket {} has broken prev link",
                        id, freq
                    )));
                }
                count += 1;
                if count > self.entries.len() {
                    return Err(InvariantError::new(format!("bucket {} has a cycle", freq)));
                }
                prev = Some(id);
                current = entry.next;
            }
            if bucket.tail != prev || bucket.len != count {
                return Err(InvariantError::new(format!(
                    "bucket {} records len {} / tail {:?}, walked {} / {:?}",
                    freq, bucket.len, bucket.tail, count, prev
                )));
            }
            total += count;
        }

        if total != self.entries.len() {
            return Err(InvariantError::new(format!(
                "buckets hold {} entries, arena holds {}",
                total,
                self.entries.len()
            )));
        }
        Ok(())
    }

    // Leaves `min_freq` stale if the popped entry emptied the lowest bucket;
    // only `replace_min` calls this and re-inserts right after.
    fn pop_min_unchecked(&mut self) -> Option<(T, u64)> {
        let freq = self.min_freq;
        let id = self.buckets.get(&freq)?.tail?;
        self.unlink(freq, id)?;
        if self.buckets.is_empty() {
            self.min_freq = 0;
        }
        self.entries.remove(id).map(|entry| (entry.value, entry.freq))
    }

    fn link_front(&mut self, freq: u64, id: SlotId) {
        let bucket = self.buckets.entry(freq).or_default();
        let old_head = bucket.head;
        if old_head.is_none() {
            bucket.tail = Some(id);
        }
        bucket.head = Some(id);
        bucket.len += 1;

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(head) = old_head
            && let Some(entry) = self.entries.get_mut(head)
        {
            entry.prev = Some(id);
        }
    }

    // Drops the bucket when it becomes empty.
    fn unlink(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };

        let bucket = self.buckets.get_mut(&freq)?;
        match prev {
            Some(prev_id) => {
                if let Some(entry) = self.entries.get_mut(prev_id) {
                    entry.next = next;
                }
            },
            None => bucket.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(entry) = self.entries.get_mut(next_id) {
                    entry.prev = prev;
                }
            },
            None => bucket.tail = prev,
        }
        bucket.len -= 1;
        if bucket.len == 0 {
            self.buckets.remove(&freq);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }
        Some(())
    }
}

impl<T> Default for FrequencyBuckets<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back walk of a single bucket.
pub struct BucketIter<'a, T> {
    buckets: &'a FrequencyBuckets<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for BucketIter<'a, T> {
    type Item = (SlotId, &'a T, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.buckets.entries.get(id)?;
        self.current = entry.next;
        Some((id, &entry.value, entry.freq))
    }
}
