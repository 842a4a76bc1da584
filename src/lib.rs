//! Growable vectors for embedded virtual machines.
//!
//! Two storage forms share one contract, the [`Vector`] trait:
//!
//! - [`NumericVector`] packs fixed-width numbers into a buffer with slack at
//!   both ends of the live window, giving cheap growth at the front and back.
//! - [`GenericVector`] holds boxed [`Value`]s and converts every written value
//!   through its [`ElementType`].
//!
//! Both forms support fixed-length vectors, default-filled length changes,
//! splicing from any [`Indexable`] host object, and option-driven sorting.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate std;

extern crate alloc;

pub mod capacity;

pub(crate) mod error;

pub mod value;

pub mod vec;

pub use self::{
    capacity::{Grow, GrowCompat, GrowHalf},
    error::{CoercionError, VectorError, FIXED_LENGTH_ERROR_CODE, OUT_OF_RANGE_ERROR_CODE},
    value::{BooleanType, ElementType, Indexable, StringType, Untyped, Value},
    vec::{
        Float64Vector, GenericVector, Int32Vector, Numeric, NumericVector, SortFlags, Source,
        Uint32Vector, Vector,
    },
};
