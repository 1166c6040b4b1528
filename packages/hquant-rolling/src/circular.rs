use crate::error::SourceError;
use crate::source::ValueSource;
use core::fmt;

/// Fixed-capacity ring buffer addressed by absolute series index.
///
/// - Append-only; overwrites the oldest element when full.
/// - Index `i` stays valid until `capacity` newer values have been pushed;
///   reads of older indices fail with [`SourceError::Evicted`].
/// - The most recent element (or any retained one) may be revised in place,
///   which is what a live, still-forming bar looks like to an aggregator.
#[derive(Clone)]
pub struct SeriesColumn<T: Copy + Default> {
    capacity: usize,
    len: usize,
    head: usize, // next write slot
    next_index: usize, // absolute index of the next push
    data: Vec<T>,
}

impl<T: Copy + Default> fmt::Debug for SeriesColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesColumn")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("first_index", &self.first_index())
            .field("next_index", &self.next_index)
            .finish_non_exhaustive()
    }
}

impl<T: Copy + Default> SeriesColumn<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            capacity,
            len: 0,
            head: 0,
            next_index: 0,
            data: vec![T::default(); capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Absolute index of the oldest retained element.
    #[inline]
    pub fn first_index(&self) -> usize {
        self.next_index - self.len
    }

    /// Absolute index the next `push` will receive.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    #[inline]
    fn slot(&self, index: usize) -> Result<usize, SourceError> {
        if index >= self.next_index {
            return Err(SourceError::NotYetWritten {
                index,
                next: self.next_index,
            });
        }
        let first = self.first_index();
        if index < first {
            return Err(SourceError::Evicted { index, first });
        }
        // `head` is the slot of absolute index `next_index`.
        let back = self.next_index - index;
        Ok((self.head + self.capacity - back) % self.capacity)
    }

    /// Pushes a new element and returns its absolute index.
    #[inline]
    pub fn push(&mut self, v: T) -> usize {
        self.data[self.head] = v;
        self.head = (self.head + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Replaces the most recent element. No-op when empty.
    #[inline]
    pub fn update_last(&mut self, v: T) {
        if self.len == 0 {
            return;
        }
        let last = (self.head + self.capacity - 1) % self.capacity;
        self.data[last] = v;
    }

    /// Replaces a retained element by absolute index.
    pub fn set(&mut self, index: usize, v: T) -> Result<(), SourceError> {
        let slot = self.slot(index)?;
        self.data[slot] = v;
        Ok(())
    }

    #[inline]
    pub fn get(&self, index: usize) -> Result<T, SourceError> {
        Ok(self.data[self.slot(index)?])
    }

    #[inline]
    pub fn last(&self) -> Option<T> {
        self.get(self.next_index.checked_sub(1)?).ok()
    }

    /// Retained elements, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (self.first_index()..self.next_index).filter_map(move |i| self.get(i).ok())
    }

    pub fn to_vec_ordered(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T: Copy + Default> ValueSource<T> for SeriesColumn<T> {
    type Error = SourceError;

    #[inline]
    fn value_at(&self, index: usize) -> Result<T, SourceError> {
        self.get(index)
    }
}
