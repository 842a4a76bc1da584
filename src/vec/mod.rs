//! Vector types and the operations they share.

use core::cmp::Ordering;

use crate::error::VectorError;
use crate::value::Indexable;

pub use self::{
    generic::GenericVector,
    numeric::{Float64Vector, Int32Vector, Numeric, NumericVector, Uint32Vector},
    sort::SortFlags,
};

pub(crate) mod buffer;
pub mod sort;

#[macro_use]
mod macros;

mod generic;
mod numeric;

/// The input accepted by vector conversion.
pub enum Source<'a, V> {
    /// A vector of the target kind, returned as-is.
    Vector(V),
    /// Any host object, converted through its indexed-read protocol.
    Object(&'a dyn Indexable),
}

#[inline]
pub(crate) fn check_fixed(fixed: bool) -> Result<(), VectorError> {
    if fixed {
        tracing::debug!("rejected length change of fixed vector");
        Err(VectorError::FixedLength)
    } else {
        Ok(())
    }
}

/// Validate a splice request and clamp its counts to the available elements,
/// producing the `(insert, delete)` counts to apply.
pub(crate) fn splice_counts<S: Indexable + ?Sized>(
    length: usize,
    index: usize,
    insert_count: usize,
    delete_count: usize,
    source: &S,
    source_offset: usize,
) -> Result<(usize, usize), VectorError> {
    if index > length {
        return Err(VectorError::IndexOutOfBounds { index, length });
    }
    let Some(available) = source.get_length() else {
        return Err(VectorError::UnexpectedInput);
    };
    let insert = insert_count.min(available.saturating_sub(source_offset));
    let delete = delete_count.min(length - index);
    Ok((insert, delete))
}

/// Read `count` coerced elements from `source`, starting at `offset`.
pub(crate) fn read_source<S, T, F>(
    source: &S,
    offset: usize,
    count: usize,
    mut coerce: F,
) -> Result<alloc::vec::Vec<T>, VectorError>
where
    S: Indexable + ?Sized,
    F: FnMut(crate::value::Value) -> Result<T, VectorError>,
{
    (offset..offset + count)
        .map(|index| coerce(source.get_indexed(index)))
        .collect()
}

/// The operations shared by packed numeric and boxed vectors.
///
/// Operations which change the length of the vector are rejected with
/// [`VectorError::FixedLength`] when the vector is fixed. The `try_*`
/// methods report failures, while their plain counterparts panic.
pub trait Vector: Indexable + Sized {
    /// The element type stored by the vector.
    type Item: Clone;

    /// The result of removing an element with `pop` or `shift`.
    ///
    /// Numeric vectors produce the default value when empty, while generic
    /// vectors produce `None`.
    type Removed;

    /// The number of elements in the vector.
    fn len(&self) -> usize;

    /// Check whether the vector has no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether the length of the vector is fixed.
    fn is_fixed(&self) -> bool;

    /// The value used to fill newly grown slots.
    fn default_value(&self) -> Self::Item;

    /// Read the element at `index`.
    fn get(&self, index: usize) -> Option<Self::Item>;

    /// Write the element at `index`. Writing at `len()` appends the element.
    fn try_set(&mut self, index: usize, value: Self::Item) -> Result<(), VectorError>;

    /// Change the length of the vector, filling new slots with the default value.
    fn try_set_length(&mut self, length: usize) -> Result<(), VectorError>;

    /// Append the items in order.
    fn try_push(&mut self, items: &[Self::Item]) -> Result<(), VectorError>;

    /// Remove the last element.
    fn try_pop(&mut self) -> Result<Self::Removed, VectorError>;

    /// Remove the first element.
    fn try_shift(&mut self) -> Result<Self::Removed, VectorError>;

    /// Prepend the items, keeping their order.
    fn try_unshift(&mut self, items: &[Self::Item]) -> Result<(), VectorError>;

    /// Remove `delete_count` elements at `index`, then insert `insert_count`
    /// elements read from `source` starting at `source_offset`.
    ///
    /// Both counts are clamped to the elements available.
    fn try_splice<S: Indexable + ?Sized>(
        &mut self,
        index: usize,
        insert_count: usize,
        delete_count: usize,
        source: &S,
        source_offset: usize,
    ) -> Result<(), VectorError>;

    /// Reverse the elements in place.
    fn reverse(&mut self);

    /// Sort the elements in place according to `flags`.
    fn try_sort_with(&mut self, flags: SortFlags) -> Result<(), VectorError>;

    /// Sort the elements in place with a comparator, modified by `flags`.
    ///
    /// The comparator is not consulted when [`SortFlags::NUMERIC`] is set.
    /// It must implement a total order.
    fn try_sort_by<F>(&mut self, compare: F, flags: SortFlags) -> Result<(), VectorError>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering;

    /// Create a vector of the same kind holding the elements accepted by `f`.
    fn filter<F>(&self, f: F) -> Self
    where
        F: FnMut(Self::Item, usize, &Self) -> bool;

    /// Check whether `f` accepts every element, stopping at the first rejection.
    fn every<F>(&self, mut f: F) -> bool
    where
        F: FnMut(Self::Item, usize, &Self) -> bool,
    {
        for index in 0..self.len() {
            if let Some(item) = self.get(index) {
                if !f(item, index, self) {
                    return false;
                }
            }
        }
        true
    }

    /// Call `f` for each element in order.
    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Self::Item, usize, &Self),
    {
        for index in 0..self.len() {
            if let Some(item) = self.get(index) {
                f(item, index, self);
            }
        }
    }

    /// Write the element at `index`, panicking on failure.
    #[inline]
    fn set(&mut self, index: usize, value: Self::Item) {
        if let Err(err) = self.try_set(index, value) {
            err.panic();
        }
    }

    /// Change the length of the vector, panicking on failure.
    #[inline]
    fn set_length(&mut self, length: usize) {
        if let Err(err) = self.try_set_length(length) {
            err.panic();
        }
    }

    /// Append the items in order, panicking on failure.
    #[inline]
    fn push(&mut self, items: &[Self::Item]) {
        if let Err(err) = self.try_push(items) {
            err.panic();
        }
    }

    /// Remove the last element, panicking on failure.
    #[inline]
    fn pop(&mut self) -> Self::Removed {
        match self.try_pop() {
            Ok(item) => item,
            Err(err) => err.panic(),
        }
    }

    /// Remove the first element, panicking on failure.
    #[inline]
    fn shift(&mut self) -> Self::Removed {
        match self.try_shift() {
            Ok(item) => item,
            Err(err) => err.panic(),
        }
    }

    /// Prepend the items, panicking on failure.
    #[inline]
    fn unshift(&mut self, items: &[Self::Item]) {
        if let Err(err) = self.try_unshift(items) {
            err.panic();
        }
    }

    /// Replace a range of elements with elements read from `source`,
    /// panicking on failure.
    #[inline]
    fn splice<S: Indexable + ?Sized>(
        &mut self,
        index: usize,
        insert_count: usize,
        delete_count: usize,
        source: &S,
        source_offset: usize,
    ) {
        if let Err(err) = self.try_splice(index, insert_count, delete_count, source, source_offset)
        {
            err.panic();
        }
    }

    /// Sort the elements by their string renderings.
    #[inline]
    fn sort(&mut self) {
        if let Err(err) = self.try_sort_with(SortFlags::empty()) {
            err.panic();
        }
    }
}
