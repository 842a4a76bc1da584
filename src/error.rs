//! Error handling.

use alloc::string::String;
use core::fmt;

/// Runtime error code raised when a fixed-length vector would change length.
pub const FIXED_LENGTH_ERROR_CODE: u32 = 1126;

/// Runtime error code raised when an index lies outside the writable range.
pub const OUT_OF_RANGE_ERROR_CODE: u32 = 1125;

/// An enumeration of error types raised by vector operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VectorError {
    /// A length-changing operation was applied to a fixed-length vector.
    FixedLength,
    /// An element was written beyond the end of the vector.
    IndexOutOfBounds {
        /// The index that was written.
        index: usize,
        /// The length of the vector at the time of the write.
        length: usize,
    },
    /// The named capability is not provided by this vector.
    NotImplemented(&'static str),
    /// The conversion source was neither a vector nor indexable.
    UnexpectedInput,
    /// The element type rejected a value.
    Coercion(CoercionError),
}

impl VectorError {
    /// Generic description of this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedLength => "Cannot change the length of a fixed Vector",
            Self::IndexOutOfBounds { .. } => "Index out of range",
            Self::NotImplemented(_) => "Not implemented",
            Self::UnexpectedInput => "Unexpected input",
            Self::Coercion(_) => "Type coercion failed",
        }
    }

    /// The runtime error code associated with this error, if any.
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::FixedLength => Some(FIXED_LENGTH_ERROR_CODE),
            Self::IndexOutOfBounds { .. } => Some(OUT_OF_RANGE_ERROR_CODE),
            _ => None,
        }
    }

    /// Check whether this error surfaces to guest code as a catchable range error.
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::FixedLength | Self::IndexOutOfBounds { .. })
    }

    /// Generate a panic with this error as the reason.
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}", self);
    }
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "{}: {} (length {})", self.as_str(), index, length)
            }
            Self::NotImplemented(name) => write!(f, "{}: {}", self.as_str(), name),
            Self::Coercion(err) => write!(f, "{}: {}", self.as_str(), err),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl From<CoercionError> for VectorError {
    fn from(err: CoercionError) -> Self {
        Self::Coercion(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VectorError {}

/// An error raised by an element type when a value cannot be converted
/// to its canonical representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoercionError {
    type_name: &'static str,
    message: String,
}

impl CoercionError {
    /// Create a new coercion error for the named element type.
    pub fn new(type_name: &'static str, message: impl Into<String>) -> Self {
        Self {
            type_name,
            message: message.into(),
        }
    }

    /// The name of the element type which rejected the value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The element type's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoercionError {}
