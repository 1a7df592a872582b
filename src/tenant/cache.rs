//! Fixed-capacity FIFO ring of paginated results keyed by message id.

use crate::paging::{MessageId, PagedResult};

type Entry = (MessageId, PagedResult);

/// Remembers the most recent `capacity` results so page-turn events can
/// find them again. Insertion beyond capacity evicts the oldest entry.
#[derive(Debug)]
pub struct PageCache {
    slots: Box<[Option<Entry>]>,
    /// Index of the oldest live entry
    head: usize,
    len: usize,
}

impl PageCache {
    /// A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            tracing::warn!("page cache capacity of 0 requested, using 1");
        }
        let capacity = capacity.max(1);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Store `result` under `message_id`, returning the entry evicted to make room.
    pub fn push(&mut self, message_id: MessageId, mut result: PagedResult) -> Option<PagedResult> {
        let evicted = if self.is_full() { self.pop() } else { None };

        result.set_message_id(message_id);
        let tail = (self.head + self.len) % self.capacity();
        self.slots[tail] = Some((message_id, result));
        self.len += 1;

        tracing::debug!(
            message = %message_id,
            cached = self.len,
            evicted = evicted.is_some(),
            "cached paged result"
        );
        evicted
    }

    /// Evict the oldest entry.
    pub fn pop(&mut self) -> Option<PagedResult> {
        if self.is_empty() {
            return None;
        }
        let (_, mut result) = self.slots[self.head].take()?;
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        result.reset();
        Some(result)
    }

    /// Newest entry for `message_id`
    pub fn get(&self, message_id: MessageId) -> Option<&PagedResult> {
        let index = self.position(message_id)?;
        self.slots[index].as_ref().map(|(_, result)| result)
    }

    pub fn get_mut(&mut self, message_id: MessageId) -> Option<&mut PagedResult> {
        let index = self.position(message_id)?;
        self.slots[index].as_mut().map(|(_, result)| result)
    }

    pub fn contains(&self, message_id: MessageId) -> bool {
        self.position(message_id).is_some()
    }

    fn position(&self, message_id: MessageId) -> Option<usize> {
        (0..self.len)
            .rev()
            .map(|offset| (self.head + offset) % self.capacity())
            .find(|&index| matches!(&self.slots[index], Some((id, _)) if *id == message_id))
    }

    /// Live entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (MessageId, &PagedResult)> + '_ {
        (0..self.len).filter_map(move |offset| {
            let index = (self.head + offset) % self.capacity();
            self.slots[index].as_ref().map(|(id, result)| (*id, result))
        })
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
        self.head = 0;
    }
}
