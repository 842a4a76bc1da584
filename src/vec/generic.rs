use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::error::VectorError;
use crate::value::{ElementType, Indexable, Untyped, Value};

use super::sort::{apply_direction, compare_numbers, compare_rendered, SortFlags};
use super::{check_fixed, read_source, splice_counts, Source, Vector};

/// A vector of boxed values with an optional element type.
///
/// Every value written to the vector is first converted by the element
/// type `E`.
#[derive(Clone)]
pub struct GenericVector<E: ElementType = Untyped> {
    buffer: Vec<Value>,
    fixed: bool,
    element_type: E,
}

impl<E: ElementType + Default> GenericVector<E> {
    /// Create a vector of `length` default values.
    pub fn new(length: usize, fixed: bool) -> Self {
        Self::with_type(length, fixed, E::default())
    }

    /// Convert a host object to a vector.
    ///
    /// A vector is returned unchanged. Any other object must expose a length,
    /// and its elements are coerced into a new resizable vector.
    pub fn callable(source: Source<'_, Self>) -> Result<Self, VectorError> {
        Self::callable_with(source, E::default())
    }

    /// Create a resizable vector holding the coerced `values`.
    pub fn from_values<I>(values: I) -> Result<Self, VectorError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut vec = Self::new(0, false);
        for value in values {
            let value = vec.coerce(value)?;
            vec.buffer.push(value);
        }
        Ok(vec)
    }
}

impl<E: ElementType> GenericVector<E> {
    /// Create a vector of `length` default values of `element_type`.
    pub fn with_type(length: usize, fixed: bool, element_type: E) -> Self {
        let mut buffer = Vec::with_capacity(length);
        buffer.resize(length, element_type.default_value());
        Self {
            buffer,
            fixed,
            element_type,
        }
    }

    /// Convert a host object to a vector with the given element type.
    pub fn callable_with(source: Source<'_, Self>, element_type: E) -> Result<Self, VectorError> {
        match source {
            Source::Vector(vec) => Ok(vec),
            Source::Object(object) => {
                let Some(length) = object.get_length() else {
                    return Err(VectorError::UnexpectedInput);
                };
                let mut vec = Self::with_type(0, false, element_type);
                vec.buffer.reserve(length);
                for index in 0..length {
                    let value = vec.coerce(object.get_indexed(index))?;
                    vec.buffer.push(value);
                }
                Ok(vec)
            }
        }
    }

    /// The element type applied to written values.
    #[inline]
    pub fn element_type(&self) -> &E {
        &self.element_type
    }

    /// Access the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.buffer
    }

    /// Iterate over the elements in order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.buffer.iter()
    }

    #[inline]
    fn coerce(&self, value: Value) -> Result<Value, VectorError> {
        Ok(self.element_type.coerce(value)?)
    }

    fn coerce_all(&self, items: &[Value]) -> Result<Vec<Value>, VectorError> {
        items.iter().map(|item| self.coerce(item.clone())).collect()
    }

    fn sort_impl<F>(&mut self, compare: Option<F>, flags: SortFlags) -> Result<(), VectorError>
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        flags.check_supported()?;
        if flags.contains(SortFlags::NUMERIC) {
            self.buffer.sort_by(|a, b| {
                apply_direction(compare_numbers(a.to_number(), b.to_number()), flags)
            });
        } else if let Some(mut compare) = compare {
            self.buffer
                .sort_by(|a, b| apply_direction(compare(a, b), flags));
        } else {
            self.buffer
                .sort_by(|a, b| apply_direction(compare_rendered(a, b), flags));
        }
        Ok(())
    }
}

impl<E: ElementType> Vector for GenericVector<E> {
    type Item = Value;
    type Removed = Option<Value>;

    #[inline]
    fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[inline]
    fn default_value(&self) -> Value {
        self.element_type.default_value()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<Value> {
        self.buffer.get(index).cloned()
    }

    fn try_set(&mut self, index: usize, value: Value) -> Result<(), VectorError> {
        let length = self.len();
        if index > length {
            return Err(VectorError::IndexOutOfBounds { index, length });
        }
        if index == length {
            check_fixed(self.fixed)?;
        }
        let value = self.coerce(value)?;
        if index == length {
            self.buffer.push(value);
        } else {
            self.buffer[index] = value;
        }
        Ok(())
    }

    fn try_set_length(&mut self, length: usize) -> Result<(), VectorError> {
        if length != self.len() {
            check_fixed(self.fixed)?;
            let fill = self.element_type.default_value();
            self.buffer.resize(length, fill);
        }
        Ok(())
    }

    fn try_push(&mut self, items: &[Value]) -> Result<(), VectorError> {
        check_fixed(self.fixed)?;
        let items = self.coerce_all(items)?;
        self.buffer.extend(items);
        Ok(())
    }

    fn try_pop(&mut self) -> Result<Option<Value>, VectorError> {
        check_fixed(self.fixed)?;
        Ok(self.buffer.pop())
    }

    fn try_shift(&mut self) -> Result<Option<Value>, VectorError> {
        check_fixed(self.fixed)?;
        if self.buffer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.buffer.remove(0)))
        }
    }

    fn try_unshift(&mut self, items: &[Value]) -> Result<(), VectorError> {
        check_fixed(self.fixed)?;
        let items = self.coerce_all(items)?;
        self.buffer.splice(0..0, items);
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
        let items = read_source(source, source_offset, insert, |value| self.coerce(value))?;
        self.buffer.splice(index..index + delete, items);
        Ok(())
    }

    #[inline]
    fn reverse(&mut self) {
        self.buffer.reverse();
    }

    #[inline]
    fn try_sort_with(&mut self, flags: SortFlags) -> Result<(), VectorError> {
        self.sort_impl(None::<fn(&Value, &Value) -> Ordering>, flags)
    }

    #[inline]
    fn try_sort_by<F>(&mut self, compare: F, flags: SortFlags) -> Result<(), VectorError>
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.sort_impl(Some(compare), flags)
    }

    fn filter<F>(&self, mut f: F) -> Self
    where
        F: FnMut(Value, usize, &Self) -> bool,
    {
        let mut result = Self::with_type(0, false, self.element_type.clone());
        for (index, item) in self.buffer.iter().enumerate() {
            if f(item.clone(), index, self) {
                // already in canonical form
                result.buffer.push(item.clone());
            }
        }
        result
    }
}

impl<E: ElementType> Indexable for GenericVector<E> {
    #[inline]
    fn get_length(&self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    fn get_indexed(&self, index: usize) -> Value {
        self.get(index).unwrap_or_default()
    }
}

impl<E: ElementType + Default> Default for GenericVector<E> {
    #[inline]
    fn default() -> Self {
        Self::new(0, false)
    }
}

impl<E: ElementType> fmt::Debug for GenericVector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericVector")
            .field("fixed", &self.fixed)
            .field("element_type", &self.element_type)
            .field("data", &self.buffer)
            .finish()
    }
}

impl<E: ElementType> fmt::Display for GenericVector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in self.buffer.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            fmt::Display::fmt(item, f)?;
        }
        Ok(())
    }
}

impl<E: ElementType> PartialEq<[Value]> for GenericVector<E> {
    #[inline]
    fn eq(&self, other: &[Value]) -> bool {
        self.buffer.as_slice() == other
    }
}

impl<E: ElementType> AsRef<[Value]> for GenericVector<E> {
    #[inline]
    fn as_ref(&self) -> &[Value] {
        &self.buffer
    }
}
