//! Breadth-first work queue with a visited list.
//!
//! The queue keeps two slot arrays sharing one capacity bound: the frontier
//! (not yet expanded) and the visited list (already popped, in pop order).
//! An item already in the visited list is never queued again; membership is
//! decided by `PartialEq` on the handle type, so handles must compare by
//! identity (e.g. arena indices), not by payload.

use tracing::{instrument, trace, warn};

/// Default capacity and growth increment.
pub const QUEUE_SIZE: usize = 32;

#[derive(Debug)]
pub struct TraversalQueue<T> {
    frontier: Vec<Option<T>>,
    visited: Vec<Option<T>>,
    capacity: usize,
    increment: usize,
    frontier_count: usize,
    visited_count: usize,
}

impl<T: Copy + PartialEq> Default for TraversalQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq> TraversalQueue<T> {
    /// Empty queue with capacity [`QUEUE_SIZE`]. Nothing is allocated until the
    /// first insert.
    pub fn new() -> Self {
        Self::with_increment(QUEUE_SIZE)
    }

    /// Empty queue whose initial capacity and growth step are `increment`.
    /// An increment of 0 is bumped to 1.
    pub fn with_increment(increment: usize) -> Self {
        let increment = increment.max(1);
        Self {
            frontier: Vec::new(),
            visited: Vec::new(),
            capacity: increment,
            increment,
            frontier_count: 0,
            visited_count: 0,
        }
    }

    /// Appends `item` to the frontier.
    ///
    /// `None` and items already in the visited list are skipped silently.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, item: impl Into<Option<T>>) {
        let Some(item) = item.into() else {
            return;
        };
        if self.visited[..self.visited_count.min(self.visited.len())]
            .iter()
            .any(|v| *v == Some(item))
        {
            trace!("skipping visited item");
            return;
        }
        if self.frontier.is_empty() {
            self.allocate();
        } else if self.frontier_count == self.capacity {
            self.grow();
        }
        self.frontier[self.frontier_count] = Some(item);
        self.frontier_count += 1;
    }

    /// Moves the frontier head to the end of the visited list and returns it.
    #[instrument(level = "trace", skip_all)]
    pub fn pop(&mut self) -> Option<T> {
        let Some(head) = self.peek() else {
            warn!("queue is empty");
            return None;
        };
        let count = self.frontier_count.min(self.frontier.len());
        self.frontier[..count].rotate_left(1);
        self.frontier_count -= 1;
        self.frontier[self.frontier_count] = None;

        if self.visited_count == self.capacity {
            self.grow();
        }
        self.visited[self.visited_count] = Some(head);
        self.visited_count += 1;
        Some(head)
    }

    /// Frontier head, without popping.
    pub fn peek(&self) -> Option<T> {
        self.frontier.first().copied().flatten()
    }

    /// True iff the first frontier slot holds no item.
    pub fn is_empty(&self) -> bool {
        self.peek().is_none()
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier_count
    }

    /// Read-only view of the occupied frontier slots, head first.
    pub fn frontier_view(&self) -> &[Option<T>] {
        &self.frontier[..self.frontier_count.min(self.frontier.len())]
    }

    pub fn visited_size(&self) -> usize {
        self.visited_count
    }

    /// Visited items in the order they were popped.
    pub fn visited(&self) -> impl Iterator<Item = T> + '_ {
        self.visited[..self.visited_count.min(self.visited.len())]
            .iter()
            .filter_map(|v| *v)
    }

    /// Shared capacity bound of frontier and visited storage.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empties every slot of both lists. Storage and counts are kept.
    pub fn clear(&mut self) {
        self.frontier.iter_mut().for_each(|slot| *slot = None);
        self.visited.iter_mut().for_each(|slot| *slot = None);
    }

    fn allocate(&mut self) {
        self.frontier = vec![None; self.capacity];
        self.visited = vec![None; self.capacity];
    }

    fn grow(&mut self) {
        self.capacity += self.increment;
        trace!(capacity = self.capacity, "growing queue");
        self.frontier.resize(self.capacity, None);
        self.visited.resize(self.capacity, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_new_queue_when_inspected_then_is_empty_without_storage() {
        let queue: TraversalQueue<u32> = TraversalQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), QUEUE_SIZE);
        assert_eq!(queue.frontier_size(), 0);
        assert_eq!(queue.visited_size(), 0);
        assert!(queue.frontier_view().is_empty());
    }

    #[test]
    fn given_none_when_inserting_then_queue_unchanged() {
        let mut queue: TraversalQueue<u32> = TraversalQueue::new();
        queue.insert(None);
        assert!(queue.is_empty());
        assert_eq!(queue.frontier_size(), 0);
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(32)]
    fn given_distinct_inserts_when_popping_then_fifo_order(#[case] n: u32) {
        let mut queue = TraversalQueue::new();
        for i in 0..n {
            queue.insert(i);
        }
        let popped: Vec<u32> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(popped, (0..n).collect::<Vec<_>>());
        assert_eq!(queue.visited().collect::<Vec<_>>(), popped);
    }

    #[test]
    fn given_33_inserts_when_popping_then_all_retrieved_after_growth() {
        let mut queue = TraversalQueue::new();
        for i in 0..33u32 {
            queue.insert(i);
        }
        assert_eq!(queue.capacity(), 64);
        assert_eq!(queue.frontier_size(), 33);

        let popped: Vec<u32> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(popped, (0..33).collect::<Vec<_>>());
        assert_eq!(queue.visited_size(), 33);
    }

    #[test]
    fn given_visited_item_when_reinserting_then_skipped() {
        let mut queue = TraversalQueue::new();
        queue.insert(7u32);
        assert_eq!(queue.pop(), Some(7));

        queue.insert(7);
        assert!(queue.is_empty());
        assert_eq!(queue.frontier_size(), 0);
        assert_eq!(queue.visited_size(), 1);
    }

    #[test]
    fn given_item_in_frontier_when_reinserting_then_queued_again() {
        // only the visited list is checked
        let mut queue = TraversalQueue::new();
        queue.insert(1u32);
        queue.insert(1);
        assert_eq!(queue.frontier_size(), 2);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.visited_size(), 2);
    }

    #[test]
    fn given_mixed_inserts_and_pops_then_no_item_appears_twice() {
        let mut queue = TraversalQueue::with_increment(4);
        let mut seen = Vec::new();
        for round in 0..10u32 {
            for i in 0..=round {
                queue.insert(i);
            }
            if let Some(item) = queue.pop() {
                seen.push(item);
            }
        }
        while let Some(item) = queue.pop() {
            seen.push(item);
        }
        let mut dedup = seen.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), seen.len());
        assert_eq!(dedup, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn given_empty_queue_when_popping_then_none() {
        let mut queue: TraversalQueue<u32> = TraversalQueue::new();
        assert_eq!(queue.pop(), None);
        queue.insert(3);
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn given_queue_when_peeking_then_head_stays() {
        let mut queue = TraversalQueue::new();
        queue.insert(10u32);
        queue.insert(11);
        assert_eq!(queue.peek(), Some(10));
        assert_eq!(queue.frontier_view(), &[Some(10), Some(11)]);
        assert_eq!(queue.frontier_size(), 2);
    }

    #[test]
    fn given_filled_queue_when_cleared_then_empty_but_counts_kept() {
        let mut queue = TraversalQueue::new();
        queue.insert(1u32);
        queue.insert(2);
        queue.pop();
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.frontier_size(), 1);
        assert_eq!(queue.visited_size(), 1);
        assert_eq!(queue.capacity(), QUEUE_SIZE);
    }

    #[test]
    fn given_long_traversal_with_small_frontier_then_visited_grows() {
        let mut queue = TraversalQueue::with_increment(2);
        for i in 0..5u32 {
            queue.insert(i);
            assert_eq!(queue.pop(), Some(i));
        }
        assert_eq!(queue.visited_size(), 5);
        assert_eq!(queue.capacity(), 6);
        assert_eq!(queue.visited().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }
}
