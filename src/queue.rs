use thiserror::Error;

/// Error returned when popping or peeking an empty [`PriorityQueue`].
///
/// The search engine checks for emptiness before every pop, so it never sees
/// this error itself; it exists so the queue stays a well-defined standalone
/// structure when reused outside the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("pop or peek on an empty priority queue")]
pub struct EmptyQueueError;

/// An array-backed binary heap ordered by a caller-supplied comparator.
///
/// `greater(a, b)` must return `true` exactly when `a` has strictly higher
/// priority than `b`; the extremal element under that ordering is the one
/// surfaced by [`peek`](Self::peek) and [`pop`](Self::pop). There is no
/// stability guarantee among equal-priority elements, so callers must not
/// rely on any particular tie-break order.
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    heap: Vec<T>,
    greater: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Construct an empty queue ordered by `greater`.
    pub fn new(greater: F) -> Self {
        Self { heap: Vec::new(), greater }
    }

    /// Number of elements currently queued. O(1).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no elements are queued. O(1).
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert `item`, restoring heap order in O(log n).
    pub fn push(&mut self, item: T) {
        self.heap.push(item);
        self.sift_up();
    }

    /// The highest-priority element, left in place.
    pub fn peek(&self) -> Result<&T, EmptyQueueError> {
        self.heap.first().ok_or(EmptyQueueError)
    }

    /// Remove and return the highest-priority element, restoring heap order
    /// in O(log n).
    pub fn pop(&mut self) -> Result<T, EmptyQueueError> {
        if self.heap.is_empty() {
            return Err(EmptyQueueError);
        }

        let bottom = self.heap.len() - 1;
        self.heap.swap(0, bottom);
        let popped = self.heap.pop().ok_or(EmptyQueueError)?;
        self.sift_down();
        Ok(popped)
    }

    fn beats(&self, i: usize, j: usize) -> bool {
        (self.greater)(&self.heap[i], &self.heap[j])
    }

    fn parent(index: usize) -> usize {
        (index + 1) / 2 - 1
    }

    fn left(index: usize) -> usize {
        index * 2 + 1
    }

    fn right(index: usize) -> usize {
        (index + 1) * 2
    }

    fn sift_up(&mut self) {
        let mut node = self.heap.len() - 1;
        while node > 0 && self.beats(node, Self::parent(node)) {
            self.heap.swap(node, Self::parent(node));
            node = Self::parent(node);
        }
    }

    fn sift_down(&mut self) {
        let mut node = 0;
        loop {
            let (left, right) = (Self::left(node), Self::right(node));
            let mut best = node;
            if left < self.heap.len() && self.beats(left, best) {
                best = left;
            }
            if right < self.heap.len() && self.beats(right, best) {
                best = right;
            }
            if best == node {
                break;
            }
            self.heap.swap(node, best);
            node = best;
        }
    }
}
