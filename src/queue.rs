//! Frontier of the A* search. A min-heap on the estimated total cost which breaks ties in favour
//! of entries with the larger cost so far, i.e. entries that are deeper along an explored path.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A single frontier entry. `f` is the estimated total cost, `g` the cost accumulated so far.
#[derive(Clone, Debug)]
pub struct QueueEntry<T, C> {
    pub f: C,
    pub g: C,
    pub item: T,
    seq: u64,
}

impl<T, C: PartialEq> Eq for QueueEntry<T, C> {}

impl<T, C: PartialEq> PartialEq for QueueEntry<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.f.eq(&other.f) && self.g.eq(&other.g) && self.seq == other.seq
    }
}

impl<T, C: Ord> PartialOrd for QueueEntry<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, C: Ord> Ord for QueueEntry<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest element, so smaller f compares as greater. Equal f is
        // ordered by larger g, and equal g by earlier insertion to keep extraction deterministic.
        match other.f.cmp(&self.f) {
            Ordering::Equal => match self.g.cmp(&other.g) {
                Ordering::Equal => other.seq.cmp(&self.seq),
                s => s,
            },
            s => s,
        }
    }
}

/// Binary heap with O(log n) [insert](Self::insert) and [extract_min](Self::extract_min).
#[derive(Clone, Debug)]
pub struct PriorityQueue<T, C> {
    heap: BinaryHeap<QueueEntry<T, C>>,
    next_seq: u64,
}

impl<T, C: Ord> Default for PriorityQueue<T, C> {
    fn default() -> Self {
        PriorityQueue::new()
    }
}

impl<T, C: Ord> PriorityQueue<T, C> {
    pub fn new() -> PriorityQueue<T, C> {
        PriorityQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, f: C, g: C, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueueEntry { f, g, item, seq });
    }

    /// Removes the entry with the lowest `f`, preferring the highest `g` among equal `f`.
    /// Returns [None] once the queue is empty.
    pub fn extract_min(&mut self) -> Option<QueueEntry<T, C>> {
        self.heap.pop()
    }

    pub fn peek(&self) -> Option<&QueueEntry<T, C>> {
        self.heap.peek()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Empties the queue while keeping its allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}
