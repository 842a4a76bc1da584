/// Create a resizable `NumericVector` from a list of elements, or from an
/// element and a count.
///
/// ```
/// use flex_vector::{vector, Int32Vector};
///
/// let v: Int32Vector = vector![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
/// let z: Int32Vector = vector![7; 2];
/// assert_eq!(z, [7, 7]);
/// ```
#[macro_export]
macro_rules! vector {
    () => (
        $crate::vec::NumericVector::new(0, false)
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::NumericVector::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::vec::NumericVector::from_slice(&[$($x),+])
    );
}
