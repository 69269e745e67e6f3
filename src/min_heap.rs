use crate::error::{CodecError, Result};

/// Anything that can be ordered by an aggregate frequency.
pub trait Weighted {
    fn weight(&self) -> u64;
}

#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    item: T,
}

/// Binary min-heap keyed by weight.
///
/// Equal weights come out in insertion order: every slot carries a sequence
/// number that breaks ties, so one input always yields the same tree.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    slots: Vec<Slot<T>>,
    next_seq: u64,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap {
            slots: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            slots: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

impl<T: Weighted> MinHeap<T> {
    fn less(&self, a: usize, b: usize) -> bool {
        let (x, y) = (&self.slots[a], &self.slots[b]);
        (x.item.weight(), x.seq) < (y.item.weight(), y.seq)
    }

    pub fn insert(&mut self, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots.push(Slot { seq, item });
        self.sift_up(self.slots.len() - 1);
    }

    pub fn extract_min(&mut self) -> Result<T> {
        if self.slots.is_empty() {
            return Err(CodecError::EmptyQueue);
        }
        let last = self.slots.len() - 1;
        self.slots.swap(0, last);
        let min = self.slots.pop().ok_or(CodecError::EmptyQueue)?;
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        Ok(min.item)
    }

    pub fn peek(&self) -> Option<&T> {
        self.slots.first().map(|slot| &slot.item)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = Self::parent(i);
            if !self.less(i, p) {
                break;
            }
            self.slots.swap(i, p);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.slots.len();
        loop {
            let (l, r) = (Self::left(i), Self::right(i));
            let mut smallest = i;
            if l < n && self.less(l, smallest) {
                smallest = l;
            }
            if r < n && self.less(r, smallest) {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.slots.swap(i, smallest);
            i = smallest;
        }
    }

    /// Checks the heap-order invariant: no child is lighter than its parent.
    pub fn is_valid(&self) -> bool {
        (1..self.slots.len()).all(|i| !self.less(i, Self::parent(i)))
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(u64, &'static str);

    impl Weighted for Item {
        fn weight(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn extracts_in_weight_order() {
        let mut heap = MinHeap::new();
        for w in [5, 3, 9, 1, 7, 2, 8] {
            heap.insert(Item(w, ""));
            assert!(heap.is_valid());
        }
        assert_eq!(heap.len(), 7);

        let mut out = Vec::new();
        while let Ok(item) = heap.extract_min() {
            assert!(heap.is_valid());
            out.push(item.0);
        }
        assert_eq!(out, vec![1, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn ties_come_out_in_insertion_order() {
        let mut heap = MinHeap::new();
        heap.insert(Item(2, "first"));
        heap.insert(Item(1, "light"));
        heap.insert(Item(2, "second"));
        heap.insert(Item(2, "third"));

        assert_eq!(heap.extract_min().unwrap().1, "light");
        assert_eq!(heap.extract_min().unwrap().1, "first");
        assert_eq!(heap.extract_min().unwrap().1, "second");
        assert_eq!(heap.extract_min().unwrap().1, "third");
    }

    #[test]
    fn empty_heap_errors() {
        let mut heap: MinHeap<Item> = MinHeap::new();
        assert!(heap.peek().is_none());
        assert!(matches!(heap.extract_min(), Err(CodecError::EmptyQueue)));
    }

    #[test]
    fn peek_does_not_remove() {
        let mut heap = MinHeap::with_capacity(2);
        heap.insert(Item(4, "a"));
        heap.insert(Item(3, "b"));
        assert_eq!(heap.peek(), Some(&Item(3, "b")));
        assert_eq!(heap.len(), 2);
    }
}
