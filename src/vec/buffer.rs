//! The sliding-window storage behind packed numeric vectors.

use alloc::boxed::Box;
use alloc::vec;
use core::fmt;
use core::marker::PhantomData;
use core::ops::Range;

use crate::capacity::{initial_capacity, Grow};

/// A fully initialized buffer holding a logical window of elements.
///
/// The window starts at `offset` and spans `length` cells. Cells outside
/// the window are slack available for growth at either end. After every
/// operation `offset + length <= capacity` holds.
pub struct PackedBuffer<T, G> {
    data: Box<[T]>,
    offset: usize,
    length: usize,
    fill: T,
    _grow: PhantomData<G>,
}

impl<T: Copy, G: Grow> PackedBuffer<T, G> {
    /// Create a buffer with a window of `length` cells set to `fill`.
    pub fn new(length: usize, fill: T) -> Self {
        Self {
            data: vec![fill; initial_capacity(length)].into_boxed_slice(),
            offset: 0,
            length,
            fill,
            _grow: PhantomData,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn window(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[self.window()]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let window = self.window();
        &mut self.data[window]
    }

    /// Access the whole backing buffer, including slack.
    #[cfg(feature = "zeroize")]
    #[inline]
    pub fn raw_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Ensure that a window of `length` cells fits in the buffer at the
    /// current offset, recentering or reallocating as required.
    pub fn ensure_capacity(&mut self, length: usize) {
        let capacity = self.data.len();
        let min_capacity = self.offset + length;
        if min_capacity < capacity {
            return;
        }
        if length <= capacity {
            // biased toward the head, leaving most of the slack at the tail
            let offset = (capacity - length) >> 2;
            tracing::trace!(from = self.offset, to = offset, capacity, "recenter window");
            let window = self.window();
            self.data.copy_within(window, offset);
            self.offset = offset;
            return;
        }
        let new_capacity = G::next_capacity(capacity, min_capacity);
        tracing::trace!(capacity, new_capacity, "reallocate buffer");
        let mut data = vec![self.fill; new_capacity].into_boxed_slice();
        data[..capacity].copy_from_slice(&self.data);
        self.data = data;
    }

    /// Set the window length, filling any newly exposed cells with the
    /// default value of the buffer.
    pub fn resize(&mut self, length: usize) {
        if length > self.length {
            self.ensure_capacity(length);
            let start = self.offset + self.length;
            let fill = self.fill;
            self.data[start..self.offset + length].fill(fill);
        }
        self.length = length;
    }

    /// Append items to the end of the window.
    pub fn extend_back(&mut self, items: &[T]) {
        self.ensure_capacity(self.length + items.len());
        let start = self.offset + self.length;
        self.data[start..start + items.len()].copy_from_slice(items);
        self.length += items.len();
    }

    /// Prepend items to the front of the window, preserving their order.
    pub fn extend_front(&mut self, items: &[T]) {
        let count = items.len();
        if count == 0 {
            return;
        }
        if self.offset >= count {
            // head slack left behind by earlier shifts
            self.offset -= count;
        } else {
            self.ensure_capacity(self.length + count);
            let window = self.window();
            self.data.copy_within(window, self.offset + count);
        }
        self.data[self.offset..self.offset + count].copy_from_slice(items);
        self.length += count;
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.length == 0 {
            return None;
        }
        self.length -= 1;
        Some(self.data[self.offset + self.length])
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.length == 0 {
            return None;
        }
        let item = self.data[self.offset];
        self.offset += 1;
        self.length -= 1;
        Some(item)
    }

    /// Remove `delete` cells at `index` and open `insert` cells in their place.
    /// The opened cells retain stale contents and must be written by the caller.
    pub fn splice_gap(&mut self, index: usize, insert: usize, delete: usize) {
        debug_assert!(index + delete <= self.length);
        let new_length = self.length - delete + insert;
        self.ensure_capacity(new_length);
        let right = self.offset + index + delete;
        let tail = self.length - index - delete;
        self.data
            .copy_within(right..right + tail, self.offset + index + insert);
        self.length = new_length;
    }

    /// Reset the window to an empty one at the start of the buffer.
    #[cfg(feature = "zeroize")]
    pub fn clear(&mut self) {
        self.offset = 0;
        self.length = 0;
    }
}

impl<T: Clone, G> Clone for PackedBuffer<T, G> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            offset: self.offset,
            length: self.length,
            fill: self.fill.clone(),
            _grow: PhantomData,
        }
    }
}

impl<T: fmt::Debug, G> fmt::Debug for PackedBuffer<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedBuffer")
            .field("offset", &self.offset)
            .field("length", &self.length)
            .field("capacity", &self.data.len())
            .field("data", &&self.data[self.offset..self.offset + self.length])
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::{GrowCompat, GrowHalf};

    fn check<G: Grow>(buf: &PackedBuffer<i32, G>) {
        assert!(buf.offset() + buf.length() <= buf.capacity());
    }

    #[test]
    fn new_has_slack() {
        let buf = PackedBuffer::<i32, GrowHalf>::new(3, 0);
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn ensure_headroom_noop() {
        let mut buf = PackedBuffer::<i32, GrowHalf>::new(0, 0);
        buf.extend_back(&[1, 2, 3]);
        buf.ensure_capacity(9);
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.offset(), 0);
    }

    #[test]
    fn recenter_biased_to_head() {
        let mut buf = PackedBuffer::<i32, GrowHalf>::new(0, 0);
        buf.extend_back(&[1, 2, 3, 4, 5, 6, 7, 8]);
        for _ in 0..6 {
            buf.pop_front();
        }
        assert_eq!(buf.offset(), 6);
        assert_eq!(buf.as_slice(), &[7, 8]);
        // 6 + 4 reaches the capacity of 10, but 4 cells fit after recentering
        buf.ensure_capacity(4);
        assert_eq!(buf.offset(), (10 - 4) >> 2);
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.as_slice(), &[7, 8]);
        check(&buf);
    }

    #[test]
    fn reallocate_keeps_offset() {
        let mut buf = PackedBuffer::<i32, GrowHalf>::new(0, 0);
        buf.extend_back(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        // an exact fit is recentered in place
        assert_eq!(buf.capacity(), 10);
        buf.pop_front();
        buf.extend_back(&[11; 8]);
        assert_eq!(buf.offset(), 1);
        assert_eq!(buf.capacity(), 18);
        assert_eq!(buf.length(), 17);
        assert_eq!(buf.as_slice()[0], 2);
        check(&buf);
    }

    #[test]
    fn reallocate_compat_is_tight() {
        let mut buf = PackedBuffer::<i32, GrowCompat>::new(0, 0);
        buf.extend_back(&[0; 10]);
        assert_eq!(buf.capacity(), 10);
        buf.extend_back(&[1]);
        assert_eq!(buf.capacity(), 11);
        buf.extend_back(&[2]);
        assert_eq!(buf.capacity(), 12);
        check(&buf);
    }

    #[test]
    fn front_growth_uses_head_slack() {
        let mut buf = PackedBuffer::<i32, GrowHalf>::new(0, 0);
        buf.extend_back(&[1, 2, 3, 4]);
        buf.pop_front();
        buf.pop_front();
        buf.extend_front(&[8, 9]);
        assert_eq!(buf.offset(), 0);
        assert_eq!(buf.as_slice(), &[8, 9, 3, 4]);
        buf.extend_front(&[5, 6, 7]);
        assert_eq!(buf.as_slice(), &[5, 6, 7, 8, 9, 3, 4]);
        check(&buf);
    }

    #[test]
    fn resize_fills_regrown_cells() {
        let mut buf = PackedBuffer::<i32, GrowHalf>::new(0, 0);
        buf.extend_back(&[1, 2, 3]);
        buf.resize(1);
        buf.resize(3);
        assert_eq!(buf.as_slice(), &[1, 0, 0]);
        buf.resize(20);
        assert_eq!(buf.length(), 20);
        check(&buf);
    }

    #[test]
    fn splice_gap_shifts_tail() {
        let mut buf = PackedBuffer::<i32, GrowHalf>::new(0, 0);
        buf.extend_back(&[0, 1, 2, 3]);
        buf.splice_gap(1, 2, 1);
        buf.as_mut_slice()[1..3].copy_from_slice(&[9, 8]);
        assert_eq!(buf.as_slice(), &[0, 9, 8, 2, 3]);
        buf.splice_gap(0, 0, 3);
        assert_eq!(buf.as_slice(), &[2, 3]);
    }
}
