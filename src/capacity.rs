//! Capacity policies for packed vector buffers.

use core::fmt::Debug;

/// The minimum capacity allocated for a new packed buffer.
pub const INITIAL_CAPACITY: usize = 10;

/// The number of slack cells allocated beyond the requested length.
pub const EXTRA_CAPACITY: usize = 4;

/// Calculate the capacity of a freshly constructed buffer holding `length` elements.
#[inline]
pub const fn initial_capacity(length: usize) -> usize {
    let requested = length.saturating_add(EXTRA_CAPACITY);
    if requested > INITIAL_CAPACITY {
        requested
    } else {
        INITIAL_CAPACITY
    }
}

/// Growth behavior for buffers which can no longer hold their logical window.
pub trait Grow: Debug {
    /// Calculate the next capacity to allocate, given the previous capacity and
    /// the minimum capacity required to hold the window at its current offset.
    fn next_capacity(prev: usize, minimum: usize) -> usize;
}

/// Growth behavior which extends the buffer by half of its previous capacity.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowHalf;

impl Grow for GrowHalf {
    #[inline]
    fn next_capacity(prev: usize, minimum: usize) -> usize {
        prev.saturating_add(prev >> 1).max(minimum)
    }
}

/// Growth behavior matching the runtime this vector was modeled on, where the
/// preferred capacity is `(prev * 3) >> 2`.
///
/// The preferred capacity is below the previous one, so every reallocation
/// lands on exactly the minimum capacity. Appends therefore copy the buffer
/// each time the slack is exhausted. Use this policy only where capacity
/// traces must match the reference runtime.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct GrowCompat;

impl Grow for GrowCompat {
    #[inline]
    fn next_capacity(prev: usize, minimum: usize) -> usize {
        (prev.saturating_mul(3) >> 2).max(minimum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_capacity_slack() {
        assert_eq!(initial_capacity(0), 10);
        assert_eq!(initial_capacity(6), 10);
        assert_eq!(initial_capacity(7), 11);
        assert_eq!(initial_capacity(100), 104);
    }

    #[test]
    fn grow_half() {
        assert_eq!(GrowHalf::next_capacity(10, 11), 15);
        assert_eq!(GrowHalf::next_capacity(10, 40), 40);
    }

    #[test]
    fn grow_compat() {
        assert_eq!(GrowCompat::next_capacity(10, 11), 11);
        assert_eq!(GrowCompat::next_capacity(100, 20), 75);
    }
}
