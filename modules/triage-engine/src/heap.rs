//! Array-backed binary min-heap.

use triage_common::TriageError;

/// Binary min-heap over `T`'s `Ord`.
///
/// Stored as a flat vector: parent of `i` is `(i - 1) / 2`, children are
/// `2i + 1` and `2i + 2`. The root is the minimum after every push and pop.
#[derive(Debug, Clone)]
pub struct PriorityHeap<T> {
    items: Vec<T>,
}

impl<T> Default for PriorityHeap<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Ord> PriorityHeap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// The minimum, without removing it.
    pub fn peek(&self) -> Result<&T, TriageError> {
        self.items.first().ok_or(TriageError::EmptyHeap)
    }

    /// Remove and return the minimum.
    pub fn pop(&mut self) -> Result<T, TriageError> {
        let last = self.items.pop().ok_or(TriageError::EmptyHeap)?;
        if self.items.is_empty() {
            return Ok(last);
        }
        let root = std::mem::replace(&mut self.items[0], last);
        self.sift_down(0);
        Ok(root)
    }

    /// Current contents in internal heap order (not sorted).
    pub fn snapshot(&self) -> &[T] {
        &self.items
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index] >= self.items[parent] {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.items[left] < self.items[smallest] {
                smallest = left;
            }
            if right < len && self.items[right] < self.items[smallest] {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}
