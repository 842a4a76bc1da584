use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;

use const_default::ConstDefault;

use crate::capacity::{Grow, GrowHalf};
use crate::error::VectorError;
use crate::value::{fmt_number, Indexable, Value};

use super::buffer::PackedBuffer;
use super::sort::{
    apply_direction, hybrid_sort, partition_unordered, sort_rendered, SortFlags,
};
use super::{check_fixed, read_source, splice_counts, Source, Vector};

/// Fixed-width numeric types which may be stored in a packed vector.
pub trait Numeric: Copy + PartialOrd + ConstDefault + fmt::Debug + Send + Sync + 'static {
    /// Widen this value to a double.
    fn to_f64(self) -> f64;

    /// Narrow a double to this type following the guest conversion rules.
    fn from_f64(value: f64) -> Self;

    /// Convert a host value to this type.
    #[inline]
    fn from_value(value: &Value) -> Self {
        Self::from_f64(value.to_number())
    }

    /// Render this value the way guest code prints it.
    #[inline]
    fn fmt_value(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_number(self.to_f64(), f)
    }
}

/// Truncate a double and reduce it modulo 2^32, as done by the guest
/// integer conversions.
#[inline]
fn wrap_u32(value: f64) -> u32 {
    if value.is_finite() {
        // the remainder is exact and lies within the range of i64
        ((value % 4294967296.0) as i64) as u32
    } else {
        0
    }
}

impl Numeric for i32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self.into()
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        wrap_u32(value) as i32
    }

    #[inline]
    fn fmt_value(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Numeric for u32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self.into()
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        wrap_u32(value)
    }

    #[inline]
    fn fmt_value(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Numeric for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

struct Render<N>(N);

impl<N: Numeric> fmt::Display for Render<N> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_value(f)
    }
}

/// A `NumericVector` of signed 32-bit integers.
pub type Int32Vector<G = GrowHalf> = NumericVector<i32, G>;

/// A `NumericVector` of unsigned 32-bit integers.
pub type Uint32Vector<G = GrowHalf> = NumericVector<u32, G>;

/// A `NumericVector` of doubles.
pub type Float64Vector<G = GrowHalf> = NumericVector<f64, G>;

/// A vector of numbers packed into a contiguous buffer.
///
/// The elements occupy a window of the buffer with slack at either end,
/// so that both `push` and `shift` run in amortized constant time. The
/// growth policy `G` determines the capacity chosen when the buffer must
/// be reallocated.
pub struct NumericVector<N: Numeric, G: Grow = GrowHalf> {
    buffer: PackedBuffer<N, G>,
    fixed: bool,
}

impl<N: Numeric, G: Grow> NumericVector<N, G> {
    /// Create a vector of `length` zeroes.
    pub fn new(length: usize, fixed: bool) -> Self {
        Self {
            buffer: PackedBuffer::new(length, N::DEFAULT),
            fixed,
        }
    }

    /// Create a resizable vector holding a copy of `data`.
    pub fn from_slice(data: &[N]) -> Self {
        let mut vec = Self::new(0, false);
        vec.buffer.extend_back(data);
        vec
    }

    /// Create a resizable vector holding `count` copies of `elem`.
    pub fn from_elem(elem: N, count: usize) -> Self {
        let mut vec = Self::new(count, false);
        vec.buffer.as_mut_slice().fill(elem);
        vec
    }

    /// Convert a host object to a vector.
    ///
    /// A vector is returned unchanged. Any other object must expose a length,
    /// and its elements are copied into a new resizable vector.
    pub fn callable(source: Source<'_, Self>) -> Result<Self, VectorError> {
        match source {
            Source::Vector(vec) => Ok(vec),
            Source::Object(object) => {
                let Some(length) = object.get_length() else {
                    return Err(VectorError::UnexpectedInput);
                };
                let mut vec = Self::new(length, false);
                for (index, slot) in vec.buffer.as_mut_slice().iter_mut().enumerate() {
                    *slot = N::from_value(&object.get_indexed(index));
                }
                Ok(vec)
            }
        }
    }

    /// Access the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[N] {
        self.buffer.as_slice()
    }

    /// Access the elements mutably. The length cannot be changed this way.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [N] {
        self.buffer.as_mut_slice()
    }

    /// The number of cells in the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The position of the first element within the backing buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.buffer.offset()
    }

    /// Iterate over the elements in order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, N> {
        self.as_slice().iter()
    }

    /// Write a host value at `index`, converting it to the element type.
    pub fn try_set_value(&mut self, index: usize, value: &Value) -> Result<(), VectorError> {
        self.try_set(index, N::from_value(value))
    }

    /// Concatenation is not provided by packed vectors.
    pub fn concat(&self, _other: &Self) -> Result<Self, VectorError> {
        Err(VectorError::NotImplemented("NumericVector.concat"))
    }

    /// Joining is not provided by packed vectors.
    pub fn join(&self, _separator: &str) -> Result<String, VectorError> {
        Err(VectorError::NotImplemented("NumericVector.join"))
    }

    /// Forward search is not provided by packed vectors.
    pub fn index_of(&self, _search: N, _from_index: usize) -> Result<Option<usize>, VectorError> {
        Err(VectorError::NotImplemented("NumericVector.indexOf"))
    }

    /// Backward search is not provided by packed vectors.
    pub fn last_index_of(
        &self,
        _search: N,
        _from_index: usize,
    ) -> Result<Option<usize>, VectorError> {
        Err(VectorError::NotImplemented("NumericVector.lastIndexOf"))
    }

    /// Mapping is not provided by packed vectors.
    pub fn map<F>(&self, _f: F) -> Result<Self, VectorError>
    where
        F: FnMut(N, usize, &Self) -> N,
    {
        Err(VectorError::NotImplemented("NumericVector.map"))
    }

    fn sort_impl<F>(&mut self, compare: Option<F>, flags: SortFlags) -> Result<(), VectorError>
    where
        F: FnMut(&N, &N) -> Ordering,
    {
        flags.check_supported()?;
        let data = self.buffer.as_mut_slice();
        let descending = flags.contains(SortFlags::DESCENDING);
        if flags.contains(SortFlags::NUMERIC) {
            let count = partition_unordered(data, |item| item.to_f64().is_nan());
            hybrid_sort(&mut data[..count]);
            if descending {
                data.reverse();
            }
        } else if let Some(mut compare) = compare {
            data.sort_by(|a, b| apply_direction(compare(a, b), flags));
        } else {
            sort_rendered(data, |item| Render(*item).to_string(), descending);
        }
        Ok(())
    }
}

impl<N: Numeric, G: Grow> Vector for NumericVector<N, G> {
    type Item = N;
    type Removed = N;

    #[inline]
    fn len(&self) -> usize {
        self.buffer.length()
    }

    #[inline]
    fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[inline]
    fn default_value(&self) -> N {
        N::DEFAULT
    }

    #[inline]
    fn get(&self, index: usize) -> Option<N> {
        self.as_slice().get(index).copied()
    }

    fn try_set(&mut self, index: usize, value: N) -> Result<(), VectorError> {
        let length = self.len();
        if index < length {
            self.buffer.as_mut_slice()[index] = value;
            Ok(())
        } else if index == length {
            check_fixed(self.fixed)?;
            self.buffer.extend_back(&[value]);
            Ok(())
        } else {
            Err(VectorError::IndexOutOfBounds { index, length })
        }
    }

    fn try_set_length(&mut self, length: usize) -> Result<(), VectorError> {
        if length != self.len() {
            check_fixed(self.fixed)?;
            self.buffer.resize(length);
        }
        Ok(())
    }

    fn try_push(&mut self, items: &[N]) -> Result<(), VectorError> {
        check_fixed(self.fixed)?;
        self.buffer.extend_back(items);
        Ok(())
    }

    fn try_pop(&mut self) -> Result<N, VectorError> {
        check_fixed(self.fixed)?;
        Ok(self.buffer.pop_back().unwrap_or(N::DEFAULT))
    }

    fn try_shift(&mut self) -> Result<N, VectorError> {
        check_fixed(self.fixed)?;
        Ok(self.buffer.pop_front().unwrap_or(N::DEFAULT))
    }

    fn try_unshift(&mut self, items: &[N]) -> Result<(), VectorError> {
        check_fixed(self.fixed)?;
        self.buffer.extend_front(items);
        Ok(())
    }

    fn try_splice<S: Indexable + ?Sized>(
        &mut self,
        index: usize,
        insert_count: usize,
        delete_count: usize,
        source: &S,
        source_offset: usize,
    ) -> Result<(), VectorError> {
        let (insert, delete) = splice_counts(
            self.len(),
            index,
            insert_count,
            delete_count,
            source,
            source_offset,
        )?;
        if insert != delete {
            check_fixed(self.fixed)?;
        }
        let items = read_source(source, source_offset, insert, |value| {
            Ok(N::from_value(&value))
        })?;
        self.buffer.splice_gap(index, insert, delete);
        self.buffer.as_mut_slice()[index..index + insert].copy_from_slice(&items);
        Ok(())
    }

    #[inline]
    fn reverse(&mut self) {
        self.buffer.as_mut_slice().reverse();
    }

    #[inline]
    fn try_sort_with(&mut self, flags: SortFlags) -> Result<(), VectorError> {
        self.sort_impl(None::<fn(&N, &N) -> Ordering>, flags)
    }

    #[inline]
    fn try_sort_by<F>(&mut self, compare: F, flags: SortFlags) -> Result<(), VectorError>
    where
        F: FnMut(&N, &N) -> Ordering,
    {
        self.sort_impl(Some(compare), flags)
    }

    fn filter<F>(&self, mut f: F) -> Self
    where
        F: FnMut(N, usize, &Self) -> bool,
    {
        let mut result = Self::new(0, false);
        for (index, item) in self.iter().enumerate() {
            if f(*item, index, self) {
                result.buffer.extend_back(&[*item]);
            }
        }
        result
    }
}

impl<N: Numeric, G: Grow> Indexable for NumericVector<N, G> {
    #[inline]
    fn get_length(&self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    fn get_indexed(&self, index: usize) -> Value {
        self.get(index)
            .map_or(Value::Undefined, |item| Value::Number(item.to_f64()))
    }
}

impl<N: Numeric, G: Grow> AsRef<[N]> for NumericVector<N, G> {
    #[inline]
    fn as_ref(&self) -> &[N] {
        self.as_slice()
    }
}

impl<N: Numeric, G: Grow> AsMut<[N]> for NumericVector<N, G> {
    #[inline]
    fn as_mut(&mut self) -> &mut [N] {
        self.as_mut_slice()
    }
}

impl<N: Numeric, G: Grow> Clone for NumericVector<N, G> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            fixed: self.fixed,
        }
    }
}

impl<N: Numeric, G: Grow> Default for NumericVector<N, G> {
    #[inline]
    fn default() -> Self {
        Self::new(0, false)
    }
}

impl<N: Numeric, G: Grow> fmt::Debug for NumericVector<N, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericVector")
            .field("fixed", &self.fixed)
            .field("offset", &self.buffer.offset())
            .field("length", &self.buffer.length())
            .field("capacity", &self.buffer.capacity())
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<N: Numeric, G: Grow> fmt::Display for NumericVector<N, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            item.fmt_value(f)?;
        }
        Ok(())
    }
}

impl<N: Numeric, G: Grow> FromIterator<N> for NumericVector<N, G> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut vec = Self::new(0, false);
        for item in iter {
            vec.buffer.extend_back(&[item]);
        }
        vec
    }
}

impl<N: Numeric, G: Grow> PartialEq for NumericVector<N, G> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<N: Numeric, G: Grow> PartialEq<[N]> for NumericVector<N, G> {
    #[inline]
    fn eq(&self, other: &[N]) -> bool {
        self.as_slice() == other
    }
}

impl<N: Numeric, G: Grow, const M: usize> PartialEq<[N; M]> for NumericVector<N, G> {
    #[inline]
    fn eq(&self, other: &[N; M]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<'a, N: Numeric, G: Grow> IntoIterator for &'a NumericVector<N, G> {
    type Item = &'a N;
    type IntoIter = core::slice::Iter<'a, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "zeroize")]
impl<N: Numeric + zeroize::DefaultIsZeroes, G: Grow> zeroize::Zeroize for NumericVector<N, G> {
    /// Clear the whole backing buffer, slack included, and empty the vector.
    fn zeroize(&mut self) {
        self.buffer.raw_mut().zeroize();
        self.buffer.clear();
    }
}
