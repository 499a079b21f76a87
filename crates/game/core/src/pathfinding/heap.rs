use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Binary min-heap without decrease-key.
///
/// Searches push duplicates instead of updating entries in place and skip
/// superseded entries when they surface (lazy deletion).
#[derive(Clone, Debug)]
pub struct MinHeap<T: Ord> {
    inner: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            inner: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        self.inner.push(Reverse(item));
    }

    /// Removes the smallest item.
    ///
    /// # Panics
    ///
    /// Panics when the heap is empty. Callers check [`is_empty`](Self::is_empty)
    /// first; popping an empty heap is a bug in the search loop.
    pub fn pop(&mut self) -> T {
        match self.inner.pop() {
            Some(Reverse(item)) => item,
            None => panic!("MinHeap::pop called on an empty heap"),
        }
    }

    pub fn try_pop(&mut self) -> Option<T> {
        self.inner.pop().map(|Reverse(item)| item)
    }

    pub fn peek(&self) -> Option<&T> {
        self.inner.peek().map(|Reverse(item)| item)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Empties the heap, keeping its allocation.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_ascending_order() {
        let mut heap = MinHeap::new();
        for value in [5, 1, 4, 1, 3] {
            heap.push(value);
        }
        let drained: Vec<i32> = std::iter::from_fn(|| heap.try_pop()).collect();
        assert_eq!(drained, vec![1, 1, 3, 4, 5]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut heap = MinHeap::with_capacity(32);
        heap.push(1);
        heap.clear();
        assert!(heap.is_empty());
        assert!(heap.inner.capacity() >= 32);
    }

    #[test]
    #[should_panic(expected = "empty heap")]
    fn popping_empty_heap_panics() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        heap.pop();
    }
}
