use flex_vector::{
    vector, Float64Vector, GenericVector, GrowHalf, Indexable, Int32Vector, Source, Uint32Vector,
    Value, Vector, VectorError,
};

/// A host object with indexed reads but no length property.
struct Unsized;

impl Indexable for Unsized {
    fn get_length(&self) -> Option<usize> {
        None
    }

    fn get_indexed(&self, _index: usize) -> Value {
        Value::Number(1.0)
    }
}

/// A host object whose properties are all strings.
struct Record(Vec<&'static str>);

impl Indexable for Record {
    fn get_length(&self) -> Option<usize> {
        Some(self.0.len())
    }

    fn get_indexed(&self, index: usize) -> Value {
        self.0
            .get(index)
            .map_or(Value::Undefined, |item| Value::from(*item))
    }
}

#[test]
fn convert_array() {
    let v: Int32Vector = Int32Vector::callable(Source::Object(&[7i32, 8, 9])).unwrap();
    assert_eq!(v, [7, 8, 9]);
    assert_eq!(v.len(), 3);
    assert!(!v.is_fixed());
}

#[test]
fn convert_vector_identity() {
    let fixed: Uint32Vector = Uint32Vector::new(2, true);
    let v = Uint32Vector::callable(Source::Vector(fixed)).unwrap();
    assert!(v.is_fixed());
    assert_eq!(v, [0, 0]);
}

#[test]
fn convert_object_without_length() {
    assert_eq!(
        Float64Vector::<GrowHalf>::callable(Source::Object(&Unsized)).unwrap_err(),
        VectorError::UnexpectedInput
    );
    let err = GenericVector::<flex_vector::Untyped>::callable(Source::Object(&Unsized))
        .unwrap_err();
    assert_eq!(err, VectorError::UnexpectedInput);
}

#[test]
fn convert_coerces_elements() {
    let record = Record(vec!["1.5", "", "x", "0x10"]);
    let v: Float64Vector = Float64Vector::callable(Source::Object(&record)).unwrap();
    assert_eq!(v.get(0), Some(1.5));
    assert_eq!(v.get(1), Some(0.0));
    assert!(v.get(2).is_some_and(f64::is_nan));
    assert_eq!(v.get(3), Some(16.0));

    let v: Int32Vector = Int32Vector::callable(Source::Object(&record)).unwrap();
    assert_eq!(v, [1, 0, 0, 16]);
}

#[test]
fn convert_other_vector_kind() {
    let source: Float64Vector = vector![1.5, -2.5, 4294967297.0];
    let v: Uint32Vector = Uint32Vector::callable(Source::Object(&source)).unwrap();
    assert_eq!(v, [1, 4294967294, 1]);
    let g: GenericVector = GenericVector::callable(Source::Object(&v)).unwrap();
    assert_eq!(g.to_string(), "1,4294967294,1");
}

#[test]
fn convert_empty() {
    let empty: [f64; 0] = [];
    let v: Float64Vector = Float64Vector::callable(Source::Object(&empty)).unwrap();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 10);
}

#[test]
fn splice_from_host_object() {
    let mut v: Int32Vector = vector![1, 2];
    v.splice(1, 3, 0, &Record(vec!["7", "8", "9"]), 1);
    assert_eq!(v, [1, 8, 9, 2]);
    assert_eq!(
        v.try_splice(0, 1, 0, &Unsized, 0),
        Err(VectorError::UnexpectedInput)
    );
}
