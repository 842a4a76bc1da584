//! Sort options and the sorting routines shared by both vector forms.

use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use crate::error::VectorError;

/// The bitmask of options accepted by `sort`.
///
/// The bit values are part of the guest-visible contract and are passed
/// as integer literals by guest code.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortFlags(u32);

impl SortFlags {
    /// Compare strings without regard to case.
    pub const CASEINSENSITIVE: Self = Self(1);
    /// Sort in descending order.
    pub const DESCENDING: Self = Self(2);
    /// Abort the sort when two elements compare equal.
    pub const UNIQUESORT: Self = Self(4);
    /// Return the sorted indices instead of sorting in place.
    pub const RETURNINDEXEDARRAY: Self = Self(8);
    /// Compare elements as numbers.
    pub const NUMERIC: Self = Self(16);

    const UNSUPPORTED: [(Self, &'static str); 3] = [
        (Self::CASEINSENSITIVE, "CASEINSENSITIVE"),
        (Self::UNIQUESORT, "UNIQUESORT"),
        (Self::RETURNINDEXEDARRAY, "RETURNINDEXEDARRAY"),
    ];

    /// An empty set of options.
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create a set of options from raw bits, as passed by guest code.
    /// Unknown bits are retained but have no effect.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bits of this set of options.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether all the options in `other` are set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Reject the options whose semantics are not provided.
    pub(crate) fn check_supported(self) -> Result<(), VectorError> {
        for (flag, name) in Self::UNSUPPORTED {
            if self.contains(flag) {
                return Err(VectorError::NotImplemented(name));
            }
        }
        Ok(())
    }
}

impl BitOr for SortFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SortFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for SortFlags {
    #[inline]
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Debug for SortFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SortFlags({:#x})", self.0)
    }
}

/// Numeric ordering in which NaN sorts after every number, so that the
/// comparison stays a total order.
#[inline]
pub(crate) fn compare_numbers(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

/// The default ordering: compare the string renderings of both elements.
#[inline]
pub(crate) fn compare_rendered<T: fmt::Display + ?Sized>(a: &T, b: &T) -> Ordering {
    a.to_string().cmp(&b.to_string())
}

#[inline]
pub(crate) fn apply_direction(ord: Ordering, flags: SortFlags) -> Ordering {
    if flags.contains(SortFlags::DESCENDING) {
        ord.reverse()
    } else {
        ord
    }
}

/// Sort by the string renderings of the elements, rendering each one once.
pub(crate) fn sort_rendered<T, R>(data: &mut [T], render: R, descending: bool)
where
    T: Copy,
    R: Fn(&T) -> String,
{
    let mut keyed: alloc::vec::Vec<(String, T)> =
        data.iter().map(|item| (render(item), *item)).collect();
    keyed.sort_by(|a, b| {
        let ord = a.0.cmp(&b.0);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    for (slot, (_, item)) in data.iter_mut().zip(keyed) {
        *slot = item;
    }
}

/// Move the elements matching `unordered` to the tail, keeping the relative
/// order of the rest. Returns the number of ordered elements at the head.
pub(crate) fn partition_unordered<T, F>(data: &mut [T], unordered: F) -> usize
where
    T: Copy,
    F: Fn(&T) -> bool,
{
    let mut count = 0;
    for index in 0..data.len() {
        if !unordered(&data[index]) {
            data.swap(count, index);
            count += 1;
        }
    }
    count
}

/// Partitions at or below this span are handled by insertion sort.
pub const INSERTION_THRESHOLD: usize = 100;

/// Sort a slice in place using a non-recursive hybrid of quicksort and
/// insertion sort. The sort is not stable.
///
/// Partitions use a median-of-three pivot. The smaller side of each
/// partition is processed first while the larger is pushed to an explicit
/// stack, bounding the stack to a logarithmic number of entries.
pub fn hybrid_sort<T: Copy + PartialOrd>(a: &mut [T]) {
    if a.len() < 2 {
        return;
    }
    let mut stack: alloc::vec::Vec<(usize, usize)> = alloc::vec::Vec::new();
    let mut l = 0;
    let mut r = a.len() - 1;
    loop {
        if r <= l + INSERTION_THRESHOLD {
            insertion_sort(a, l, r);
            match stack.pop() {
                Some((pl, pr)) => {
                    l = pl;
                    r = pr;
                }
                None => break,
            }
        } else {
            let median = (l + r) >> 1;
            let mut i = l + 1;
            let mut j = r;
            a.swap(median, i);
            if a[l] > a[r] {
                a.swap(l, r);
            }
            if a[i] > a[r] {
                a.swap(i, r);
            }
            if a[l] > a[i] {
                a.swap(l, i);
            }
            // a[l] <= pivot <= a[r] act as sentinels for both scans
            let pivot = a[i];
            loop {
                loop {
                    i += 1;
                    if !(a[i] < pivot) {
                        break;
                    }
                }
                loop {
                    j -= 1;
                    if !(a[j] > pivot) {
                        break;
                    }
                }
                if j < i {
                    break;
                }
                a.swap(i, j);
            }
            a[l + 1] = a[j];
            a[j] = pivot;
            if r + 1 - i >= j - l {
                stack.push((i, r));
                r = j - 1;
            } else {
                stack.push((l, j - 1));
                l = i;
            }
        }
    }
}

/// Insertion sort over the inclusive range `l..=r`.
fn insertion_sort<T: Copy + PartialOrd>(a: &mut [T], l: usize, r: usize) {
    for j in (l + 1)..=r {
        let item = a[j];
        let mut i = j;
        while i > l && a[i - 1] > item {
            a[i] = a[i - 1];
            i -= 1;
        }
        a[i] = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
        data.windows(2).all(|w| !(w[0] > w[1]))
    }

    #[test]
    fn flags_contract() {
        assert_eq!(SortFlags::CASEINSENSITIVE.bits(), 1);
        assert_eq!(SortFlags::DESCENDING.bits(), 2);
        assert_eq!(SortFlags::UNIQUESORT.bits(), 4);
        assert_eq!(SortFlags::RETURNINDEXEDARRAY.bits(), 8);
        assert_eq!(SortFlags::NUMERIC.bits(), 16);
        let flags = SortFlags::NUMERIC | SortFlags::DESCENDING;
        assert_eq!(flags, SortFlags::from_bits(18));
        assert!(flags.check_supported().is_ok());
        assert_eq!(
            SortFlags::from_bits(20).check_supported(),
            Err(VectorError::NotImplemented("UNIQUESORT"))
        );
    }

    #[test]
    fn hybrid_small() {
        let mut data = [5, 3, 1, 4, 2];
        hybrid_sort(&mut data);
        assert_eq!(data, [1, 2, 3, 4, 5]);

        let mut empty: [i32; 0] = [];
        hybrid_sort(&mut empty);
        let mut one = [1];
        hybrid_sort(&mut one);
        assert_eq!(one, [1]);
    }

    #[test]
    fn hybrid_large_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [101, 102, 250, 1000, 5000] {
            let mut data: Vec<i32> = (0..len).map(|_| rng.gen_range(-500..500)).collect();
            let mut expect = data.clone();
            expect.sort();
            hybrid_sort(&mut data);
            assert_eq!(data, expect);
        }
    }

    #[test]
    fn hybrid_large_presorted() {
        let mut asc: Vec<u32> = (0..2000).collect();
        hybrid_sort(&mut asc);
        assert!(is_sorted(&asc));
        let mut desc: Vec<u32> = (0..2000).rev().collect();
        hybrid_sort(&mut desc);
        assert_eq!(desc, (0..2000).collect::<Vec<_>>());
        let mut same = vec![4u32; 1000];
        hybrid_sort(&mut same);
        assert_eq!(same, vec![4u32; 1000]);
    }

    #[test]
    fn hybrid_float_with_nan_terminates() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut data: Vec<f64> = (0..600)
            .map(|i| if i % 50 == 0 { f64::NAN } else { rng.gen() })
            .collect();
        hybrid_sort(&mut data);
        assert_eq!(data.len(), 600);
        assert_eq!(data.iter().filter(|v| v.is_nan()).count(), 12);
    }

    #[test]
    fn unordered_moved_to_tail() {
        let mut data = [3.0, f64::NAN, 1.0, f64::NAN, 2.0];
        let count = partition_unordered(&mut data, |v| v.is_nan());
        assert_eq!(count, 3);
        assert_eq!(&data[..3], &[3.0, 1.0, 2.0]);
        assert!(data[3..].iter().all(|v| v.is_nan()));
        let mut none = [2, 1];
        assert_eq!(partition_unordered(&mut none, |_| false), 2);
        assert_eq!(none, [2, 1]);
    }

    #[test]
    fn numbers_total_order() {
        assert_eq!(compare_numbers(1.0, 2.0), Ordering::Less);
        assert_eq!(compare_numbers(f64::NAN, 2.0), Ordering::Greater);
        assert_eq!(compare_numbers(2.0, f64::NAN), Ordering::Less);
        assert_eq!(compare_numbers(f64::NAN, f64::NAN), Ordering::Equal);
    }

    #[test]
    fn rendered_order() {
        assert_eq!(compare_rendered(&10, &9), Ordering::Less);
        let mut data = [10, 9, 1, 100];
        sort_rendered(&mut data, |v| v.to_string(), false);
        assert_eq!(data, [1, 10, 100, 9]);
        sort_rendered(&mut data, |v| v.to_string(), true);
        assert_eq!(data, [9, 100, 10, 1]);
    }
}
