//! Arena-backed singly linked queue supporting splices at a cursor
//!
//! The shallow engine replaces one pending broadcast with the broadcasts
//! for each direct report, in place. A `Vec` would shift the tail on every
//! splice; here removal is O(1) and inserting k items is O(k).

/// Position of an item inside a [`SpliceQueue`]
pub(crate) type Slot = usize;

#[derive(Debug, Clone)]
struct Link<T> {
    item: T,
    next: Option<Slot>,
}

/// FIFO queue with in-place replacement of an item by zero or more items
#[derive(Debug, Clone)]
pub(crate) struct SpliceQueue<T> {
    links: Vec<Link<T>>,
    head: Option<Slot>,
    tail: Option<Slot>,
    /// Slots released by removals, reused before growing `links`
    free: Vec<Slot>,
    len: usize,
}

impl<T> SpliceQueue<T> {
    /// Create an empty queue
    pub(crate) fn new() -> Self {
        Self {
            links: Vec::new(),
            head: None,
            tail: None,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of queued items
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing is queued
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot of the first item
    #[inline]
    pub(crate) fn head(&self) -> Option<Slot> {
        self.head
    }

    /// Slot after `slot`
    #[inline]
    pub(crate) fn next(&self, slot: Slot) -> Option<Slot> {
        self.links[slot].next
    }

    /// Item stored at `slot`
    #[inline]
    pub(crate) fn get(&self, slot: Slot) -> &T {
        &self.links[slot].item
    }

    /// Append to the tail
    pub(crate) fn push_back(&mut self, item: T) {
        let slot = self.allocate(item, None);
        match self.tail {
            Some(tail) => self.links[tail].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    /// Replace the item at `at` (whose predecessor is `prev`) with `items`,
    /// keeping their order.
    ///
    /// Returns the slot to resume scanning from: the first inserted item,
    /// or the old successor of `at` when `items` is empty. `prev` stays
    /// the predecessor of the returned slot.
    pub(crate) fn splice<I>(&mut self, prev: Option<Slot>, at: Slot, items: I) -> Option<Slot>
    where
        I: IntoIterator<Item = T>,
    {
        debug_assert_eq!(
            prev.map_or(self.head, |p| self.links[p].next),
            Some(at),
            "prev must precede the spliced slot"
        );

        let mut items = items.into_iter();
        let Some(first) = items.next() else {
            return self.unlink(prev, at);
        };

        // Reuse `at` for the first replacement, chain the rest after it
        self.links[at].item = first;
        let after = self.links[at].next;
        let mut last = at;
        for item in items {
            let slot = self.allocate(item, after);
            self.links[last].next = Some(slot);
            last = slot;
        }
        if after.is_none() {
            self.tail = Some(last);
        }
        Some(at)
    }

    /// Iterate items front to back
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        std::iter::successors(self.head, move |&slot| self.next(slot)).map(move |slot| self.get(slot))
    }

    fn unlink(&mut self, prev: Option<Slot>, at: Slot) -> Option<Slot> {
        let after = self.links[at].next.take();
        match prev {
            Some(p) => self.links[p].next = after,
            None => self.head = after,
        }
        if after.is_none() {
            self.tail = prev;
        }
        self.free.push(at);
        self.len -= 1;
        after
    }

    fn allocate(&mut self, item: T, next: Option<Slot>) -> Slot {
        self.len += 1;
        let link = Link { item, next };
        match self.free.pop() {
            Some(slot) => {
                self.links[slot] = link;
                slot
            }
            None => {
                self.links.push(link);
                self.links.len() - 1
            }
        }
    }
}
